//! Meta-schema validation.
//!
//! Structure (required keys, unknown keys, value types) is enforced by
//! deserializing into the typed records from `ir`. Rules that a JSON shape cannot
//! express are checked afterwards, on the typed record.

use std::path::Path;

use ir::{HttpMethod, PathTemplate, RawEndpoint, RawField, RawSchemaDocument, RawTypesDocument};
use serde_json::Value;
use tracing::debug;
use types::{GoType, Primitive};

use crate::{Result, ValidationError};

/// Validates schema records before any IR is built from them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Create a new schema validator
    pub fn new() -> Self { Self }

    /// Validate a model document.
    pub fn validate_document(&self, file: &Path, value: Value) -> Result<RawSchemaDocument> {
        let doc: RawSchemaDocument = serde_json::from_value(value).map_err(|e| {
            ValidationError::Schema { file: file.to_path_buf(), messages: vec![e.to_string()] }
        })?;
        let messages = self.check_document(&doc);
        if !messages.is_empty() {
            return Err(ValidationError::Schema { file: file.to_path_buf(), messages });
        }
        debug!(file = %file.display(), model = %doc.model, "schema document validated");
        Ok(doc)
    }

    /// Validate an enumeration document.
    pub fn validate_types(&self, file: &Path, value: Value) -> Result<RawTypesDocument> {
        let doc: RawTypesDocument = serde_json::from_value(value).map_err(|e| {
            ValidationError::Schema { file: file.to_path_buf(), messages: vec![e.to_string()] }
        })?;
        let messages = self.check_types(&doc);
        if !messages.is_empty() {
            return Err(ValidationError::Schema { file: file.to_path_buf(), messages });
        }
        debug!(file = %file.display(), enums = doc.enums.len(), "types document validated");
        Ok(doc)
    }

    /// Semantic rules for a model document; returns every violation.
    pub fn check_document(&self, doc: &RawSchemaDocument) -> Vec<String> {
        let mut errors = Vec::new();

        check_api(&doc.api, &mut errors);
        if doc.model.trim().is_empty() {
            errors.push("`model` must not be empty".to_string());
        }
        if doc.non_struct.is_some() && !doc.model_fields.is_empty() {
            errors.push(format!(
                "model `{}` declares both `nonStruct` and `modelFields`",
                doc.model
            ));
        }
        if doc.non_struct.is_none() && doc.model_fields.is_empty() && doc.custom_unmarshaler.is_none() {
            errors.push(format!(
                "model `{}` declares neither `modelFields` nor `nonStruct`",
                doc.model
            ));
        }
        if doc.model_only && !doc.endpoints.is_empty() {
            errors.push(format!("model `{}` is `modelOnly` but declares endpoints", doc.model));
        }

        for field in &doc.model_fields {
            check_field("modelFields", field, &mut errors);
        }
        for endpoint in &doc.endpoints {
            check_endpoint(endpoint, &mut errors);
        }

        errors
    }

    /// Semantic rules for an enumeration document; returns every violation.
    pub fn check_types(&self, doc: &RawTypesDocument) -> Vec<String> {
        let mut errors = Vec::new();
        check_api(&doc.api, &mut errors);
        for e in &doc.enums {
            if e.identifier.trim().is_empty() {
                errors.push("enum with empty `identifier`".to_string());
            }
            if e.values.is_empty() {
                errors.push(format!("enum `{}` declares no values", e.identifier));
            }
            for value in &e.values {
                if value.identifier.trim().is_empty() {
                    errors.push(format!("enum `{}` has a value with empty `identifier`", e.identifier));
                }
            }
        }
        errors
    }
}

fn check_api(api: &str, errors: &mut Vec<String>) {
    let valid = api.chars().next().is_some_and(|c| c.is_ascii_lowercase())
        && api.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        errors.push(format!("`api` must be a lower-case Go package name, got `{api}`"));
    }
}

fn check_field(scope: &str, field: &RawField, errors: &mut Vec<String>) {
    if field.identifier.trim().is_empty() {
        errors.push(format!("{scope}: field with empty `identifier`"));
        return;
    }
    match GoType::parse(&field.go_type) {
        Ok(ty) => {
            if field.datetime_layout.is_some() && ty.primitive() != Some(Primitive::Time) {
                errors.push(format!(
                    "{scope}: field `{}` sets `datetimeLayout` but is `{}`, not time.Time",
                    field.identifier, field.go_type
                ));
            }
        }
        Err(e) => errors.push(format!("{scope}: field `{}`: {e}", field.identifier)),
    }
}

fn check_endpoint(endpoint: &RawEndpoint, errors: &mut Vec<String>) {
    let root = &endpoint.enum_root;
    if root.trim().is_empty() {
        errors.push(format!("endpoint `{}` has an empty `enumRoot`", endpoint.path));
    }
    if endpoint.path.trim().is_empty() {
        errors.push(format!("endpoint `{root}` has an empty `path`"));
    } else if let Err(e) = PathTemplate::parse(&endpoint.path) {
        errors.push(format!("endpoint `{root}`: {e}"));
    }
    if let Err(e) = endpoint.http_method.parse::<HttpMethod>() {
        errors.push(format!("endpoint `{root}`: {e}"));
    }
    let scope = format!("endpoint `{root}` queryParams");
    for field in &endpoint.query_params {
        check_field(&scope, field, errors);
    }
    let scope = format!("endpoint `{root}` body");
    for field in &endpoint.body {
        check_field(&scope, field, errors);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_required_key() {
        let value = json!({ "api": "coinbasepro", "modelFields": [] });
        let err = SchemaValidator::new()
            .validate_document(Path::new("account.json"), value)
            .expect_err("model is required");
        match err {
            ValidationError::Schema { file, messages } => {
                assert_eq!(file, Path::new("account.json"));
                assert!(messages[0].contains("model"), "{messages:?}");
            }
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_datetime_layout_requires_time() {
        let value = json!({
            "api": "coinbasepro",
            "model": "account",
            "modelFields": [
                { "identifier": "created_at", "goType": "string", "datetimeLayout": "time.RFC3339" }
            ]
        });
        let err = SchemaValidator::new()
            .validate_document(Path::new("account.json"), value)
            .expect_err("layout on a string");
        assert!(err.to_string().contains("datetimeLayout"));
    }

    #[test]
    fn test_api_must_be_a_package_name() {
        let mut errors = Vec::new();
        check_api("CoinbasePro", &mut errors);
        check_api("", &mut errors);
        check_api("coinbase-pro", &mut errors);
        assert_eq!(errors.len(), 3);

        let mut errors = Vec::new();
        check_api("coinbasepro", &mut errors);
        check_api("v2_api", &mut errors);
        assert!(errors.is_empty());
    }
}
