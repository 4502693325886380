//! # skelgen_templates
//!
//! Template resolution and context merging for skelgen scaffolds.
//!
//! This crate renders a directory tree of parameterized templates into a
//! concrete output tree. Expressions are resolved in both file bodies and
//! path segments, and option values are layered from three sources:
//!
//! - raw defaults declared in the scaffold manifest (`copier.yml`)
//! - those defaults with their embedded expressions resolved
//! - the caller-supplied context, which always wins
//!
//! A path segment that evaluates to an empty string gates the whole file
//! out of the output tree, so a single boolean option can omit an entire
//! subtree.
//!
//! ## Example
//!
//! ```rust,no_run
//! use skelgen_templates::{Context, ScalarValue, TemplateRenderer};
//!
//! let mut context = Context::new();
//! context.insert("project_name".into(), ScalarValue::from("my-project"));
//! context.insert("uses_docs".into(), ScalarValue::Bool(true));
//!
//! let renderer = TemplateRenderer::new("template", "generated");
//! let outcome = renderer.render_all(&context, None).unwrap();
//! println!("rendered {} file(s)", outcome.rendered.len());
//! ```

pub mod context;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod path;
pub mod renderer;
pub mod value;

pub use context::{merge_context, resolve_defaults};
pub use defaults::{find_manifest, load_defaults, MANIFEST_CANDIDATES};
pub use engine::{looks_like_expression, TemplateEngine};
pub use error::{EngineError, TemplateError, TemplateResult};
pub use path::{resolve_output_path, TEMPLATE_SUFFIX};
pub use renderer::{RenderOutcome, TemplateRenderer};
pub use value::{coerce_scalar, Context, ScalarValue};
