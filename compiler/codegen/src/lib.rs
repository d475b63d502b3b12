// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Go code generation for schema-described web APIs.
//!
//! This crate turns one IR namespace into the Go files of one client package:
//! model structs and decoders, request options, HTTP call stubs, path builders,
//! rate limiters and enum types. Each artifact is built as a Go syntax tree
//! (`go_ast`) and rendered once through `emit`.
//!
//! Writing files and running a source formatter over them is left to the pipeline.

pub mod emit;
pub mod generators;
pub mod go_ast;

use ir::Namespace;
use naming::Inflector;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::emit::Emit;
use crate::go_ast::GoFile;

/// Marker comment every generated file carries after its imports.
pub const GENERATED_MARKER: &str = "// * This is a generated file, do not edit";

/// Error type for code generation operations in this crate.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// An IR entity reached an emitter in a shape no emission rule covers.
    #[error("emission invariant violated: {0}")]
    EmissionInvariant(String),
    /// A generated name could not be derived.
    #[error(transparent)]
    Naming(#[from] naming::NamingError),
    /// A type descriptor could not be classified.
    #[error(transparent)]
    Type(#[from] types::TypeError),
}

/// Convenient result type for codegen functions in this crate.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Import paths of the runtime packages generated code calls into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoImports {
    /// JSON transform helpers used by decoders.
    pub serial: String,
    /// HTTP helpers used by stubs and option encoders.
    pub internal: String,
    /// Custom scalar types.
    pub scalar: String,
    /// Token-bucket rate limiter.
    pub rate: String,
}

impl Default for GoImports {
    fn default() -> Self {
        Self {
            serial: "github.com/alpine-hodler/web/internal/serial".to_string(),
            internal: "github.com/alpine-hodler/web/internal".to_string(),
            scalar: "github.com/alpine-hodler/web/pkg/scalar".to_string(),
            rate: "golang.org/x/time/rate".to_string(),
        }
    }
}

/// Settings shared by every artifact generator.
#[derive(Debug, Clone)]
pub struct GoSettings {
    /// Runtime import paths.
    pub imports: GoImports,
    /// Column budget for wrapped comments.
    pub comment_width: usize,
    /// Guard the lazily filled limiter table with a mutex.
    pub synchronized_ratelimiters: bool,
    /// Naming rules for names derived at emission time.
    pub inflector: Inflector,
}

impl Default for GoSettings {
    fn default() -> Self {
        Self {
            imports: GoImports::default(),
            comment_width: generators::doc_comment::DEFAULT_WIDTH,
            synchronized_ratelimiters: false,
            inflector: Inflector::default(),
        }
    }
}

/// Defines the interface for generating one Go file per namespace.
///
/// Implementors are pure functions of the IR: they return `None` when the
/// namespace has nothing to put in their file.
pub trait ArtifactGenerator {
    /// File name inside the namespace's output directory.
    fn file_name(&self) -> &'static str;

    /// Build the file for `namespace`.
    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>>;
}

/// Every artifact generator.
pub fn all_generators() -> Vec<Box<dyn ArtifactGenerator>> {
    vec![
        Box::new(generators::HttpGenerator),
        Box::new(generators::ModelsGenerator),
        Box::new(generators::OptionsGenerator),
        Box::new(generators::PathGenerator),
        Box::new(generators::RatelimiterGenerator),
        Box::new(generators::EnumsGenerator),
    ]
}

/// Render every artifact of `namespace` as `(file name, source)` pairs.
pub fn render_namespace(
    namespace: &Namespace,
    settings: &GoSettings,
) -> Result<Vec<(String, String)>> {
    let mut files = Vec::new();
    for generator in all_generators() {
        if let Some(file) = generator.generate(namespace, settings)? {
            debug!(api = %namespace.api, file = generator.file_name(), "rendered artifact");
            files.push((generator.file_name().to_string(), clean_generated_source(&file.emit())));
        }
    }
    Ok(files)
}

/// Trim trailing whitespace from each line and drop trailing blank lines.
/// Always ensures the returned string ends with a single newline when not empty.
pub fn clean_generated_source(src: &str) -> String {
    let mut lines: Vec<String> = src.lines().map(|l| l.trim_end().to_string()).collect();

    while matches!(lines.last(), Some(line) if line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("{}\n", lines.join("\n"))
    }
}
