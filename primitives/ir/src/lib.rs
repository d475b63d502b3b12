// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Metagen Intermediate Representation (IR)
//!
//! This crate defines the two layers every generator run passes through:
//!
//! - `schema` - the raw records read from schema documents. Their serde shape
//!   *is* the meta-schema: unknown keys and missing required keys are rejected.
//! - `model` - the immutable IR (documents, fields, endpoints, path parts, enums,
//!   rate-limiter bindings) grouped by api namespace, built once per run by the
//!   `builder`.

pub mod builder;
pub mod model;
pub mod path_template;
pub mod schema;

use thiserror::Error;

pub use builder::{IrBuilder, DEFAULT_DATETIME_LAYOUT};
pub use model::*;
pub use path_template::{PathPart, PathTemplate};
pub use schema::*;

/// Errors raised while reading schema records or building the IR.
#[derive(Debug, Error)]
pub enum IrError {
    /// Underlying I/O error while reading a schema document.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The document is not valid JSON for its record type.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// A name could not be derived.
    #[error(transparent)]
    Naming(#[from] naming::NamingError),
    /// A type descriptor could not be classified.
    #[error(transparent)]
    Type(#[from] types::TypeError),
    /// Regex compilation error used during path parsing.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// A path template contains a malformed parameter token.
    #[error("malformed path template `{template}`: {reason}")]
    PathTemplate {
        /// The template as written in the schema.
        template: String,
        /// What is wrong with it.
        reason: String,
    },
    /// A derived name is not a legal Go identifier.
    #[error("`{name}` (derived from `{origin}`) is not a valid Go identifier")]
    InvalidIdentifier {
        /// The derived name.
        name: String,
        /// The schema identifier it was derived from.
        origin: String,
    },
    /// The HTTP method is not one the generated client can issue.
    #[error("unsupported HTTP method `{0}`")]
    HttpMethod(String),
}

/// Convenient result type for IR operations.
pub type Result<T> = std::result::Result<T, IrError>;
