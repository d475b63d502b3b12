// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Identifier transforms for generated Go source.
//!
//! Schema documents name things in snake, dot or dash case (`account_id`,
//! `product.stats`, `payment-method`). Everything emitted in Go is derived from
//! those identifiers through an [`Inflector`], which owns an immutable acronym
//! table supplied by [`InflectorConfig`].
//!
//! - `inflector` - camel/pascal/snake conversion with acronym preservation
//! - `plural` - English pluralization for collection type names
//! - `keywords` - Go reserved words and identifier checks

pub mod inflector;
pub mod keywords;
pub mod plural;

use thiserror::Error;

pub use inflector::{Inflector, InflectorConfig, DEFAULT_ACRONYMS};
pub use keywords::{go_safe_identifier, is_go_identifier, is_go_keyword};
pub use plural::pluralize;

/// Errors raised while deriving names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    /// The identifier was empty or only whitespace.
    #[error("cannot derive a name from an empty identifier")]
    EmptyIdentifier,
}

/// Convenient result type for naming operations.
pub type Result<T> = std::result::Result<T, NamingError>;
