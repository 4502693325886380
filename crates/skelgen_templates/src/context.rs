//! Context resolution and layering.
//!
//! Manifest defaults may themselves be expressions (for example
//! `"{{ docs != 'False' }}"`). Resolution evaluates those against a working
//! context and coerces the rendered text back to a typed scalar. The final
//! context for a run layers caller-supplied values over resolved defaults
//! over raw defaults.

use tracing::warn;

use crate::engine::{looks_like_expression, TemplateEngine};
use crate::value::{coerce_scalar, Context};

/// Evaluate expression-valued defaults against a working context.
///
/// Resolution degrades per key: a default whose expression fails to render
/// keeps its original unrendered string and the failure is logged. The run
/// is never aborted from here.
pub fn resolve_defaults(
    engine: &TemplateEngine,
    raw_defaults: &Context,
    context: &Context,
) -> Context {
    let mut resolved = Context::with_capacity(raw_defaults.len());

    for (key, value) in raw_defaults {
        let expression = match value.as_str() {
            Some(s) if looks_like_expression(s) => s,
            _ => {
                resolved.insert(key.clone(), value.clone());
                continue;
            }
        };

        match engine.render_str(expression, context) {
            Ok(rendered) => {
                resolved.insert(key.clone(), coerce_scalar(&rendered));
            }
            Err(err) => {
                warn!(
                    "could not resolve default '{}' = '{}': {}",
                    key, expression, err
                );
                resolved.insert(key.clone(), value.clone());
            }
        }
    }

    resolved
}

/// Build the full context for a run.
///
/// Later layers override identical keys in earlier ones:
/// raw defaults, then resolved defaults, then the caller context.
pub fn merge_context(
    raw_defaults: &Context,
    resolved_defaults: &Context,
    caller_context: &Context,
) -> Context {
    let mut full = raw_defaults.clone();
    full.extend(
        resolved_defaults
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    full.extend(
        caller_context
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    full
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ScalarValue;

    fn context(entries: &[(&str, ScalarValue)]) -> Context {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_merge_precedence() {
        let raw = context(&[("a", 1.into()), ("b", 2.into())]);
        let resolved = context(&[("b", 3.into()), ("c", 4.into())]);
        let caller = context(&[("c", 5.into())]);

        let full = merge_context(&raw, &resolved, &caller);
        assert_eq!(full.get("a"), Some(&ScalarValue::Int(1)));
        assert_eq!(full.get("b"), Some(&ScalarValue::Int(3)));
        assert_eq!(full.get("c"), Some(&ScalarValue::Int(5)));
        assert_eq!(full.len(), 3);
    }

    #[test]
    fn test_resolves_expression_defaults() {
        let engine = TemplateEngine::new();
        let raw = context(&[
            ("docs", ScalarValue::from("Read the docs")),
            ("uses_docs", ScalarValue::from("{{ docs != 'No' }}")),
            ("count", ScalarValue::Int(3)),
        ]);
        let working = raw.clone();

        let resolved = resolve_defaults(&engine, &raw, &working);
        assert_eq!(resolved.get("uses_docs"), Some(&ScalarValue::Bool(true)));
        // non-expression values pass through unchanged
        assert_eq!(resolved.get("docs"), Some(&ScalarValue::from("Read the docs")));
        assert_eq!(resolved.get("count"), Some(&ScalarValue::Int(3)));
    }

    #[test]
    fn test_rendered_values_are_coerced() {
        let engine = TemplateEngine::new();
        let raw = context(&[
            ("base", ScalarValue::Int(20)),
            ("total", ScalarValue::from("{{ base + 22 }}")),
            ("label", ScalarValue::from("{{ 'v' ~ base }}")),
        ]);

        let resolved = resolve_defaults(&engine, &raw, &raw.clone());
        assert_eq!(resolved.get("total"), Some(&ScalarValue::Int(42)));
        assert_eq!(resolved.get("label"), Some(&ScalarValue::from("v20")));
    }

    #[test]
    fn test_failed_resolution_keeps_raw_string() {
        let engine = TemplateEngine::new();
        let raw = context(&[("broken", ScalarValue::from("{{ undefined_var }}"))]);

        let resolved = resolve_defaults(&engine, &raw, &Context::new());
        assert_eq!(
            resolved.get("broken"),
            Some(&ScalarValue::from("{{ undefined_var }}"))
        );
    }

    #[test]
    fn test_one_failure_does_not_abort_others() {
        let engine = TemplateEngine::new();
        let raw = context(&[
            ("broken", ScalarValue::from("{% if %}")),
            ("name", ScalarValue::from("scaffold")),
            ("upper", ScalarValue::from("{{ name | upper }}")),
        ]);

        let resolved = resolve_defaults(&engine, &raw, &raw.clone());
        assert_eq!(resolved.get("broken"), Some(&ScalarValue::from("{% if %}")));
        assert_eq!(resolved.get("upper"), Some(&ScalarValue::from("SCAFFOLD")));
    }
}
