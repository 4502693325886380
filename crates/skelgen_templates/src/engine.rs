//! Adapter around the minijinja expression engine.
//!
//! This is the only module that talks to minijinja. Everything else renders
//! strings through [`TemplateEngine::render_str`] and pattern-matches on
//! [`EngineError`](crate::error::EngineError) classes.

use minijinja::{Environment, UndefinedBehavior};

use crate::error::EngineError;
use crate::value::Context;

/// Check whether a string contains an embedded expression.
///
/// Purely syntactic: probes for the inline-expression and control-statement
/// openers. False positives are fine, rendering them later either succeeds
/// as a no-op or degrades per the caller's fallback rules.
pub fn looks_like_expression(value: &str) -> bool {
    value.contains("{{") || value.contains("{%")
}

/// Expression engine with strict undefined-variable behavior.
///
/// Strict mode makes an undefined reference a distinguishable rendering
/// failure instead of an empty string, which the context and path
/// resolvers rely on for their fallback handling.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Render a template string against a context.
    pub fn render_str(&self, template: &str, context: &Context) -> Result<String, EngineError> {
        self.env
            .render_str(template, context)
            .map_err(EngineError::from)
    }
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
    fn test_looks_like_expression() {
        assert!(looks_like_expression("{{ project_name }}"));
        assert!(looks_like_expression("{% if docs %}docs{% endif %}"));
        assert!(looks_like_expression("prefix-{{ name }}-suffix"));
        assert!(!looks_like_expression("plain string"));
        assert!(!looks_like_expression("{ not an expression }"));
    }

    #[test]
    fn test_render_simple_expression() {
        let engine = TemplateEngine::new();
        let ctx = context(&[("project_name", ScalarValue::from("my-app"))]);
        let rendered = engine.render_str("{{ project_name }}-docs", &ctx).unwrap();
        assert_eq!(rendered, "my-app-docs");
    }

    #[test]
    fn test_undefined_variable_is_classified() {
        let engine = TemplateEngine::new();
        let err = engine
            .render_str("{{ missing_var }}", &Context::new())
            .unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Undefined(_)));
    }

    #[test]
    fn test_syntax_error_is_classified() {
        let engine = TemplateEngine::new();
        let err = engine
            .render_str("{% if %}", &Context::new())
            .unwrap_err();
        assert!(matches!(err, crate::error::EngineError::Syntax(_)));
    }

    #[test]
    fn test_conditional_renders_empty() {
        let engine = TemplateEngine::new();
        let ctx = context(&[("docs", ScalarValue::Bool(false))]);
        let rendered = engine
            .render_str("{% if docs %}docs{% endif %}", &ctx)
            .unwrap();
        assert_eq!(rendered, "");
    }
}
