//! Schema discovery, parsing and meta-schema validation.

use std::fs;
use std::path::Path;

use analysis::SchemaValidator;
use ir::{RawSchemaDocument, RawTypesDocument};
use path::{discover_schema_files, SchemaKind};
use tracing::info;

use crate::{PipelineError, Result};

/// Every validated record under a schema root.
#[derive(Debug, Default)]
pub struct LoadedSchemas {
    /// Model documents, in path order.
    pub documents: Vec<RawSchemaDocument>,
    /// Enumeration documents, in path order.
    pub types: Vec<RawTypesDocument>,
}

/// Load and validate every schema document under `root`.
///
/// Stops at the first file that is not JSON or violates the meta-schema.
pub fn load_schemas(root: &Path) -> Result<LoadedSchemas> {
    let files = discover_schema_files(root)?;
    let validator = SchemaValidator::new();
    let mut loaded = LoadedSchemas::default();

    for file in &files {
        let contents = fs::read_to_string(&file.path)
            .map_err(PipelineError::io(format!("failed to read {}", file.path.display())))?;
        let value: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|source| PipelineError::Json { file: file.path.clone(), source })?;

        match file.kind {
            SchemaKind::Model => loaded.documents.push(validator.validate_document(&file.path, value)?),
            SchemaKind::Types => loaded.types.push(validator.validate_types(&file.path, value)?),
        }
    }

    info!(
        root = %root.display(),
        documents = loaded.documents.len(),
        types = loaded.types.len(),
        "loaded schema documents"
    );
    Ok(loaded)
}
