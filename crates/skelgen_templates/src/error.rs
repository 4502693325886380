//! Error types for template resolution and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that abort a generation run.
///
/// Manifest, default-resolution, and path-resolution failures never appear
/// here: they degrade locally to a fallback value or a per-file skip and
/// are only logged. A file body that fails to render is the one fatal
/// case, because writing unrendered content would corrupt the output.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to render content of {path}: {source}")]
    ContentRender {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure classes reported by the expression engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("template syntax error: {0}")]
    Syntax(minijinja::Error),

    #[error("undefined reference: {0}")]
    Undefined(minijinja::Error),

    #[error("template evaluation failed: {0}")]
    Eval(minijinja::Error),
}

impl From<minijinja::Error> for EngineError {
    fn from(err: minijinja::Error) -> Self {
        match err.kind() {
            minijinja::ErrorKind::SyntaxError => EngineError::Syntax(err),
            minijinja::ErrorKind::UndefinedError => EngineError::Undefined(err),
            _ => EngineError::Eval(err),
        }
    }
}
