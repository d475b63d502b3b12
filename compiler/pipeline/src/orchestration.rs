//! Pipeline orchestration for the main entry points.
//!
//! `render` runs every phase that can fail (loading, validation, IR
//! construction, emission) and returns the artifacts in memory; `run` commits
//! them only once `render` has succeeded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use analysis::IrValidator;
use codegen::render_namespace;
use ir::IrBuilder;
use path::namespace_output_dir;
use tracing::{info, warn};

use crate::generation_context::GenerationContext;
use crate::schema_loading::load_schemas;
use crate::staging::commit;
use crate::Result;

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Api namespaces rendered, sorted.
    pub namespaces: Vec<String>,
    /// Artifacts, relative to the output root in a dry run and absolute otherwise.
    pub files: Vec<PathBuf>,
    /// Whether nothing was written.
    pub dry_run: bool,
}

/// Render every artifact, keyed by its path relative to the output root.
pub fn render(ctx: &GenerationContext) -> Result<BTreeMap<PathBuf, String>> {
    let schemas = load_schemas(&ctx.schema_dir)?;

    let ir = IrBuilder::new(&ctx.settings.inflector)
        .with_default_layout(ctx.default_layout.clone())
        .build(&schemas.documents, &schemas.types)?;
    IrValidator::new().check(&ir)?;

    let mut files = BTreeMap::new();
    for namespace in ir.namespaces() {
        if namespace.has_endpoints() && !ctx.settings.synchronized_ratelimiters {
            warn!(
                api = %namespace.api,
                "rate limiters are created lazily without locking; set [ratelimiter] synchronized = true to guard them"
            );
        }
        for (file_name, source) in render_namespace(namespace, &ctx.settings)? {
            files.insert(namespace_output_dir(Path::new(""), &namespace.api).join(file_name), source);
        }
        info!(api = %namespace.api, "rendered namespace");
    }
    Ok(files)
}

/// Render every artifact and, unless this is a dry run, write them under the output root.
pub fn run(ctx: &GenerationContext) -> Result<RunReport> {
    let files = render(ctx)?;
    let mut namespaces: Vec<String> = files
        .keys()
        .filter_map(|p| p.components().next())
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    namespaces.dedup();

    if ctx.dry_run {
        info!(files = files.len(), "dry run, nothing written");
        return Ok(RunReport { namespaces, files: files.into_keys().collect(), dry_run: true });
    }

    let written = commit(&ctx.output_dir, &files, ctx.formatter.as_ref())?;
    Ok(RunReport { namespaces, files: written, dry_run: false })
}
