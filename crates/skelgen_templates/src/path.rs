//! Output-path resolution for template files.
//!
//! Template paths carry the `.jinja` suffix and may embed expressions in
//! any segment. Each segment is rendered independently; a segment that
//! evaluates to an empty string gates the whole file out of the output
//! tree, which is how a boolean option conditionally omits a subtree.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::engine::{looks_like_expression, TemplateEngine};
use crate::value::Context;

/// File extension marking a file as a template source.
pub const TEMPLATE_SUFFIX: &str = "jinja";

/// Resolve a template path into its output path.
///
/// Returns `None` when the file must be skipped: a segment rendered to an
/// empty string (expected control flow), a segment failed to render
/// (logged as a warning), or nothing was left after resolution. The
/// empty-segment rule applies to every segment, filename included.
pub fn resolve_output_path(
    engine: &TemplateEngine,
    template_path: &Path,
    context: &Context,
) -> Option<PathBuf> {
    let stripped = strip_template_suffix(template_path);

    let mut segments: Vec<String> = Vec::new();
    for component in stripped.components() {
        let part = component.as_os_str().to_string_lossy();
        if !looks_like_expression(&part) {
            segments.push(part.into_owned());
            continue;
        }

        match engine.render_str(&part, context) {
            Ok(rendered) if rendered.is_empty() => {
                debug!(
                    "path segment '{}' of {} evaluated to empty",
                    part,
                    template_path.display()
                );
                return None;
            }
            Ok(rendered) => segments.push(rendered),
            Err(err) => {
                warn!(
                    "could not render path segment '{}' of {}: {}",
                    part,
                    template_path.display(),
                    err
                );
                return None;
            }
        }
    }

    if segments.is_empty() {
        return None;
    }

    Some(segments.iter().collect())
}

/// Remove the template-marker suffix from a path, if present.
fn strip_template_suffix(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == TEMPLATE_SUFFIX => path.with_extension(""),
        _ => path.to_path_buf(),
    }
}
