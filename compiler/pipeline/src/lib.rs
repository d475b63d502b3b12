// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! High-level pipeline that turns a schema directory into Go client packages.
//!
//! ## Module Organization
//!
//! - `schema_loading` - discovery, JSON parsing and meta-schema validation
//! - `generation_context` - everything one run needs, assembled with a builder
//! - `formatter` - the post-processing step applied to each rendered file
//! - `staging` - writes every artifact into a staging area, then commits it
//! - `orchestration` - the `render` and `run` entry points

use std::path::PathBuf;

use thiserror::Error;

pub mod formatter;
pub mod generation_context;
pub mod orchestration;
pub mod schema_loading;
pub mod staging;

pub use formatter::{GoImportsFormatter, NoopFormatter, SourceFormatter};
pub use generation_context::{GenerationContext, GenerationContextBuilder};
pub use orchestration::{render, run, RunReport};

/// Convenient result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can occur while running the generation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Generic message-based error.
    #[error("{0}")]
    Message(String),
    /// The schema root could not be walked.
    #[error(transparent)]
    Discovery(#[from] path::DiscoveryError),
    /// A schema file is not valid JSON.
    #[error("failed to parse {}: {source}", file.display())]
    Json {
        /// The offending file.
        file: PathBuf,
        /// The parse failure.
        source: serde_json::Error,
    },
    /// A schema document or the built IR failed validation.
    #[error(transparent)]
    Validation(#[from] analysis::ValidationError),
    /// The IR could not be built.
    #[error(transparent)]
    Ir(#[from] ir::IrError),
    /// Error propagated from the codegen crate.
    #[error(transparent)]
    Codegen(#[from] codegen::CodegenError),
    /// I/O error while reading schemas or writing artifacts.
    #[error("{context}: {source}")]
    Io {
        /// What was being done.
        context: String,
        /// The underlying failure.
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(context: impl Into<String>) -> impl FnOnce(std::io::Error) -> Self {
        let context = context.into();
        move |source| PipelineError::Io { context, source }
    }
}
