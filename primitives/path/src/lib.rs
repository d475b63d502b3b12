// SPDX-License-Identifier: CC0-1.0

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Schema discovery and output-path utilities.
//!
//! This module provides utilities for locating schema documents under a schema
//! root and for resolving where each api namespace's artifacts are written.

pub mod path_utils;

// Re-export for convenience
pub use path_utils::*;
