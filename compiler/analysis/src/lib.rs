// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Metagen analysis
//!
//! Checks that run before any Go source is rendered:
//!
//! - `schema_validator` - validates raw schema records against the meta-schema
//!   (structure via the typed records in `ir`, plus semantic rules)
//! - `validator` - validates the built IR, reporting generated-name collisions
//!
//! Both report every problem they find rather than stopping at the first one.

use std::path::PathBuf;

use thiserror::Error;

pub mod schema_validator;
pub mod validator;

pub use schema_validator::SchemaValidator;
pub use validator::IrValidator;

/// Errors reported by the analysis phase.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A schema document does not conform to the meta-schema.
    #[error("schema validation failed for {}: {}", file.display(), messages.join("; "))]
    Schema {
        /// The offending document.
        file: PathBuf,
        /// Every violation found in it.
        messages: Vec<String>,
    },
    /// Two generated names in one scope are identical.
    #[error("name collision: {}", .0.join("; "))]
    NameCollision(Vec<String>),
}

/// Convenient result type for analysis operations.
pub type Result<T> = std::result::Result<T, ValidationError>;
