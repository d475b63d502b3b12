//! Raw schema records.
//!
//! A schema root holds one directory per api. Each `*.json` file in it is a
//! [`RawSchemaDocument`]; `types.json` is a [`RawTypesDocument`]. Keys are
//! camel-cased in JSON and unknown keys are rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// One model document: a Go model plus the endpoints that return it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawSchemaDocument {
    /// Api namespace, also the Go package name.
    pub api: String,
    /// Model identifier.
    pub model: String,
    /// Free-text description of the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_description: Option<String>,
    /// The document only declares a model; no client stubs are expected.
    #[serde(default)]
    pub model_only: bool,
    /// Aliased type when the model is `type X <alias>` rather than a struct.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_struct: Option<String>,
    /// Hand-written `UnmarshalJSON` emitted in place of a generated one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_unmarshaler: Option<String>,
    /// Model attributes.
    #[serde(default)]
    pub model_fields: Vec<RawField>,
    /// Endpoints returning the model.
    #[serde(default)]
    pub endpoints: Vec<RawEndpoint>,
}

/// A model attribute, query parameter or body parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawField {
    /// Wire identifier (`product_id`).
    pub identifier: String,
    /// Go type descriptor.
    pub go_type: String,
    /// Whether the member is always present.
    #[serde(default)]
    pub required: bool,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit decode routine on the `serial` transform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unmarshaler: Option<String>,
    /// Go expression naming the timestamp layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datetime_layout: Option<String>,
}

/// One HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawEndpoint {
    /// Path template (`/accounts/{account_id}/holds`).
    pub path: String,
    /// Name every generated identifier for the endpoint derives from.
    pub enum_root: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link to the upstream API documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// HTTP verb.
    pub http_method: String,
    /// Permission scope required by the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Token-bucket burst size.
    #[serde(default)]
    pub rate_limit: u32,
    /// Go result type overriding the model; `none` for no result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    /// The endpoint returns a list of models.
    #[serde(default)]
    pub slice: bool,
    /// Query-string parameters.
    #[serde(default)]
    pub query_params: Vec<RawField>,
    /// JSON body parameters.
    #[serde(default)]
    pub body: Vec<RawField>,
}

/// Enumerations shared by one api.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawTypesDocument {
    /// Api namespace.
    pub api: String,
    /// Declared enumerations.
    #[serde(default)]
    pub enums: Vec<RawEnum>,
}

/// A string enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawEnum {
    /// Enum identifier.
    pub identifier: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Collection type declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pluralize: Option<PluralDecl>,
    /// Enum values, each emitted as a constant.
    #[serde(default)]
    pub values: Vec<RawEnumValue>,
}

/// A plural collection declaration: an explicit name, or `true` to derive one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluralDecl {
    /// Derive the collection name with the pluralizer when `true`.
    Derived(bool),
    /// Use this collection name.
    Named(String),
}

/// One enum value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawEnumValue {
    /// Literal string value.
    pub identifier: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RawSchemaDocument {
    /// Load a model document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl RawTypesDocument {
    /// Load an enumeration document from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl RawField {
    /// Field with a descriptor and defaults for everything else.
    pub fn new(identifier: impl Into<String>, go_type: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            go_type: go_type.into(),
            required: false,
            description: None,
            unmarshaler: None,
            datetime_layout: None,
        }
    }
}
