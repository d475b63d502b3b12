// SPDX-License-Identifier: CC0-1.0

//! Schema discovery and output-path utilities.
//!
//! A schema root looks like:
//!
//! ```text
//! schema/
//!   schema.json            (meta-schema, ignored)
//!   coinbasepro/
//!     account.json         (model document)
//!     types.json           (enumeration document)
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// File name of an api's enumeration document.
pub const TYPES_FILE_NAME: &str = "types.json";

/// File name of the meta-schema, never treated as a document.
pub const META_SCHEMA_FILE_NAME: &str = "schema.json";

/// Errors raised while discovering schema documents.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The schema root does not exist.
    #[error("schema directory not found: {0}")]
    NotFound(PathBuf),
    /// The schema root is not a directory.
    #[error("schema path is not a directory: {0}")]
    NotADirectory(PathBuf),
    /// Walking the directory tree failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Which record type a schema file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaKind {
    /// A model document.
    Model,
    /// An enumeration (`types.json`) document.
    Types,
}

/// A discovered schema file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchemaFile {
    /// Path to the file.
    pub path: PathBuf,
    /// Record type held by the file.
    pub kind: SchemaKind,
}

/// Find every schema document one level below `root`, sorted by path.
///
/// # Arguments
///
/// * `root` - The schema root holding one directory per api
///
/// # Returns
///
/// Returns the discovered files; the order is independent of directory listing order.
pub fn discover_schema_files(root: &Path) -> Result<Vec<SchemaFile>, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(2).max_depth(2).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let kind = match path.file_name().and_then(|n| n.to_str()) {
            Some(META_SCHEMA_FILE_NAME) => continue,
            Some(TYPES_FILE_NAME) => SchemaKind::Types,
            _ => SchemaKind::Model,
        };
        files.push(SchemaFile { path: path.to_path_buf(), kind });
    }
    files.sort();
    Ok(files)
}

/// Directory an api namespace's artifacts are written to.
pub fn namespace_output_dir(output_root: &Path, api: &str) -> PathBuf { output_root.join(api) }

/// Find the workspace root by looking for a `Cargo.toml` containing `[workspace]`,
/// walking up from `start`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let cargo_toml = current.join("Cargo.toml");
        if let Ok(contents) = std::fs::read_to_string(&cargo_toml) {
            if contents.contains("[workspace]") {
                return Some(current);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_discover_schema_files() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let root = dir.path();
        fs::write(root.join("schema.json"), "{}").expect("write meta-schema");
        for api in ["kraken", "coinbasepro"] {
            fs::create_dir(root.join(api)).expect("create api dir");
            fs::write(root.join(api).join("types.json"), "{}").expect("write types");
            fs::write(root.join(api).join("account.json"), "{}").expect("write model");
            fs::write(root.join(api).join("README.md"), "").expect("write readme");
        }
        fs::create_dir_all(root.join("kraken/nested")).expect("create nested dir");
        fs::write(root.join("kraken/nested/deep.json"), "{}").expect("write nested");

        let files = discover_schema_files(root).expect("discovery should succeed");
        let found: Vec<(String, SchemaKind)> = files
            .iter()
            .map(|f| {
                let rel = f.path.strip_prefix(root).expect("under root");
                (rel.to_string_lossy().replace('\\', "/"), f.kind)
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("coinbasepro/account.json".to_string(), SchemaKind::Model),
                ("coinbasepro/types.json".to_string(), SchemaKind::Types),
                ("kraken/account.json".to_string(), SchemaKind::Model),
                ("kraken/types.json".to_string(), SchemaKind::Types),
            ]
        );
    }

    #[test]
    fn test_discover_missing_root() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        let missing = dir.path().join("missing");
        assert!(matches!(discover_schema_files(&missing), Err(DiscoveryError::NotFound(_))));

        let file = dir.path().join("file.json");
        fs::write(&file, "{}").expect("write file");
        assert!(matches!(discover_schema_files(&file), Err(DiscoveryError::NotADirectory(_))));
    }

    #[test]
    fn test_find_project_root() {
        let dir = tempfile::tempdir().expect("Failed to create temporary directory");
        fs::write(dir.path().join("Cargo.toml"), "[workspace]\nmembers = []\n")
            .expect("write manifest");
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).expect("create nested");
        assert_eq!(find_project_root(&nested), Some(dir.path().to_path_buf()));
    }
}
