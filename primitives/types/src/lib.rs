// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Go type-descriptor classification.
//!
//! Every schema field carries a raw Go type descriptor (`string`, `time.Time`,
//! `scalar.Money`, `[]*Fill`, `ProductStats`). [`GoType::parse`] classifies it
//! into exactly one shape and exposes the renderings the emitters need:
//!
//! - the *value* rendering used verbatim in model structs;
//! - the *optional* rendering used in request-option structs, which wraps
//!   every non-required member one level.

pub mod go_type;
pub mod primitive;

use thiserror::Error;

pub use go_type::{GoType, SCALAR_PREFIX};
pub use primitive::Primitive;

/// Errors raised while classifying a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The descriptor was empty.
    #[error("empty type descriptor")]
    Empty,
    /// The descriptor does not match any known shape.
    #[error("unrecognized type descriptor `{0}`")]
    UnrecognizedDescriptor(String),
    /// A name derived from the descriptor could not be built.
    #[error(transparent)]
    Naming(#[from] naming::NamingError),
}

/// Convenient result type for type classification.
pub type Result<T> = std::result::Result<T, TypeError>;
