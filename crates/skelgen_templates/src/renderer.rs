//! Template rendering orchestration.
//!
//! One [`TemplateRenderer::render_all`] call is one generation run: discover
//! template files, load manifest defaults, build the merged context, then
//! resolve each file's output path and render its body. Path skips and
//! default-resolution failures are non-fatal; a body that fails to render
//! aborts the remaining batch.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::context::{merge_context, resolve_defaults};
use crate::defaults::{find_manifest, load_defaults, MANIFEST_CANDIDATES};
use crate::engine::TemplateEngine;
use crate::error::{TemplateError, TemplateResult};
use crate::path::{resolve_output_path, TEMPLATE_SUFFIX};
use crate::value::Context;

/// Path markers identifying scaffold answers-file templates. These are
/// bookkeeping artifacts of the scaffold mechanism, never user output.
const ANSWERS_FILE_MARKERS: [&str; 2] = ["_copier_conf.answers_file", "copier-answers"];

/// Outcome of a generation run.
#[derive(Debug, Default)]
pub struct RenderOutcome {
    /// Output files that were written.
    pub rendered: Vec<PathBuf>,
    /// Template files skipped because their path resolved to nothing.
    pub skipped: Vec<PathBuf>,
    /// Non-fatal warnings raised during the run.
    pub warnings: Vec<String>,
}

/// Renders a template tree into an output tree.
pub struct TemplateRenderer {
    template_base: PathBuf,
    template_root: PathBuf,
    output_base: PathBuf,
    engine: TemplateEngine,
}

impl TemplateRenderer {
    /// Create a renderer for templates under `template_base`, writing to
    /// `output_base`. The template root (where the manifest lives) defaults
    /// to the parent of `template_base`.
    pub fn new(template_base: impl Into<PathBuf>, output_base: impl Into<PathBuf>) -> Self {
        let template_base = template_base.into();
        let template_root = template_base
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| template_base.clone());
        Self {
            template_base,
            template_root,
            output_base: output_base.into(),
            engine: TemplateEngine::new(),
        }
    }

    /// Override the template root containing the manifest.
    pub fn with_template_root(mut self, template_root: impl Into<PathBuf>) -> Self {
        self.template_root = template_root.into();
        self
    }

    /// Discover every template file under the template base, recursively,
    /// paths relative to the base.
    pub fn discover_templates(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.template_base)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .map_or(false, |ext| ext == TEMPLATE_SUFFIX)
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.template_base)
                    .ok()
                    .map(Path::to_path_buf)
            })
            .collect()
    }

    /// Render a batch of templates against a caller context.
    ///
    /// When `template_files` is `None` or empty, all template files under
    /// the base are discovered and rendered in discovery order.
    pub fn render_all(
        &self,
        context: &Context,
        template_files: Option<Vec<PathBuf>>,
    ) -> TemplateResult<RenderOutcome> {
        let template_files = match template_files {
            Some(files) if !files.is_empty() => files,
            _ => {
                let discovered = self.discover_templates();
                info!("auto-discovered {} template(s)", discovered.len());
                discovered
            }
        };

        let mut outcome = RenderOutcome::default();
        let full_context = self.build_full_context(context, &mut outcome.warnings);

        fs::create_dir_all(&self.output_base)?;

        let discovered = template_files.len();
        for template_file in template_files {
            if is_answers_file(&template_file) {
                debug!("skipping answers file template {}", template_file.display());
                continue;
            }

            let Some(output_relative) =
                resolve_output_path(&self.engine, &template_file, &full_context)
            else {
                info!("skipped {} (path resolved to absent)", template_file.display());
                outcome.skipped.push(template_file);
                continue;
            };

            let output_path = self.output_base.join(&output_relative);
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }

            let content = fs::read_to_string(self.template_base.join(&template_file))?;
            let rendered = self
                .engine
                .render_str(&content, &full_context)
                .map_err(|source| TemplateError::ContentRender {
                    path: template_file.clone(),
                    source,
                })?;

            fs::write(&output_path, rendered)?;
            debug!(
                "rendered {} -> {}",
                template_file.display(),
                output_path.display()
            );
            outcome.rendered.push(output_path);
        }

        info!(
            "rendered {} of {} template(s)",
            outcome.rendered.len(),
            discovered
        );
        Ok(outcome)
    }

    /// Render a single template body to a string without touching the
    /// output tree. Useful for previewing one file, e.g. a README.
    pub fn render_file(&self, template_file: &Path, context: &Context) -> TemplateResult<String> {
        let mut warnings = Vec::new();
        let full_context = self.build_full_context(context, &mut warnings);

        let content = fs::read_to_string(self.template_base.join(template_file))?;
        self.engine
            .render_str(&content, &full_context)
            .map_err(|source| TemplateError::ContentRender {
                path: template_file.to_path_buf(),
                source,
            })
    }

    /// Load manifest defaults and merge the context layers for this run.
    fn build_full_context(&self, context: &Context, warnings: &mut Vec<String>) -> Context {
        let raw_defaults = match find_manifest(&self.template_root) {
            Some(manifest_path) => {
                let defaults = load_defaults(&manifest_path);
                info!(
                    "loaded {} default value(s) from {}",
                    defaults.len(),
                    manifest_path.display()
                );
                defaults
            }
            None => {
                let message = format!(
                    "no {} found under {}",
                    MANIFEST_CANDIDATES.join(" or "),
                    self.template_root.display()
                );
                warn!("{}", message);
                warnings.push(message);
                Context::new()
            }
        };

        // Working context for resolving expression defaults: caller values
        // layered over the raw defaults.
        let mut working = raw_defaults.clone();
        working.extend(context.iter().map(|(k, v)| (k.clone(), v.clone())));

        let resolved_defaults = resolve_defaults(&self.engine, &raw_defaults, &working);
        merge_context(&raw_defaults, &resolved_defaults, context)
    }
}

fn is_answers_file(template_file: &Path) -> bool {
    let path_str = template_file.to_string_lossy();
    ANSWERS_FILE_MARKERS
        .iter()
        .any(|marker| path_str.contains(marker))
}
