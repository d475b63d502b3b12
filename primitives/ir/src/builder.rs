//! Builds the IR from raw schema records.

use naming::{go_safe_identifier, is_go_identifier, Inflector};
use types::GoType;

use crate::model::{
    Endpoint, Enum, EnumValue, Field, GenerationIr, HttpMethod, PluralForm, ReturnType,
    SchemaDocument,
};
use crate::path_template::PathTemplate;
use crate::schema::{PluralDecl, RawEndpoint, RawEnum, RawField, RawSchemaDocument, RawTypesDocument};
use crate::{IrError, Result};

/// Timestamp layout used when a field does not name one.
pub const DEFAULT_DATETIME_LAYOUT: &str = "time.RFC3339Nano";

/// Return-type spelling meaning "the stub returns only an error".
const NO_RETURN: &str = "none";

/// Local names used inside generated decoders; a receiver must not shadow them.
const DECODER_LOCALS: &[&str] = &["bytes", "d", "data", "err", "item", "obj", "v"];

/// Turns raw schema records into IR entities.
///
/// Every derived name goes through the builder's [`Inflector`], so the acronym
/// table in effect for a run is fixed at construction.
#[derive(Debug, Clone)]
pub struct IrBuilder<'a> {
    inflector: &'a Inflector,
    default_layout: String,
}

impl<'a> IrBuilder<'a> {
    /// Create a builder using the default timestamp layout.
    pub fn new(inflector: &'a Inflector) -> Self {
        Self { inflector, default_layout: DEFAULT_DATETIME_LAYOUT.to_string() }
    }

    /// Override the default timestamp layout.
    pub fn with_default_layout(mut self, layout: impl Into<String>) -> Self {
        self.default_layout = layout.into();
        self
    }

    /// The timestamp layout fields fall back to.
    pub fn default_layout(&self) -> &str { &self.default_layout }

    /// Build the IR of a whole run.
    pub fn build(
        &self,
        documents: &[RawSchemaDocument],
        types: &[RawTypesDocument],
    ) -> Result<GenerationIr> {
        let documents =
            documents.iter().map(|doc| self.document(doc)).collect::<Result<Vec<_>>>()?;
        let mut enums = Vec::new();
        for doc in types {
            for raw in &doc.enums {
                enums.push(self.enumeration(&doc.api, raw)?);
            }
        }
        Ok(GenerationIr::new(documents, enums))
    }

    /// Build one model document.
    pub fn document(&self, raw: &RawSchemaDocument) -> Result<SchemaDocument> {
        let model_name = self.identifier(self.inflector.pascal(&raw.model)?, &raw.model)?;
        let mut model_var = go_safe_identifier(&self.inflector.camel(&model_name)?);
        if DECODER_LOCALS.contains(&model_var.as_str()) {
            model_var = format!("{model_var}Model");
        }

        Ok(SchemaDocument {
            api: raw.api.clone(),
            model_name,
            model_var,
            description: non_blank(&raw.model_description),
            fields: self.fields(&raw.model_fields)?,
            endpoints: raw
                .endpoints
                .iter()
                .map(|ep| self.endpoint(&raw.api, ep))
                .collect::<Result<Vec<_>>>()?,
            model_only: raw.model_only,
            non_struct_alias: non_blank(&raw.non_struct),
            custom_decoder: non_blank(&raw.custom_unmarshaler),
        })
    }

    /// Build one field.
    pub fn field(&self, raw: &RawField) -> Result<Field> {
        let member_name = self.identifier(self.inflector.pascal(&raw.identifier)?, &raw.identifier)?;
        let tag_const = self.identifier(
            self.inflector.camel(&format!("{}_json_tag", raw.identifier))?,
            &raw.identifier,
        )?;
        let layout = non_blank(&raw.datetime_layout);
        let custom_layout = layout.as_deref().is_some_and(|l| l != self.default_layout);

        Ok(Field {
            identifier: raw.identifier.clone(),
            go_type: GoType::parse(&raw.go_type)?,
            required: raw.required,
            description: non_blank(&raw.description),
            decoder_override: non_blank(&raw.unmarshaler),
            datetime_layout: layout.unwrap_or_else(|| self.default_layout.clone()),
            custom_layout,
            snake_name: self.inflector.snake(&raw.identifier)?,
            variable_name: go_safe_identifier(&self.inflector.camel(&member_name)?),
            tag_const,
            member_name,
        })
    }

    /// Build one endpoint of `api`.
    pub fn endpoint(&self, api: &str, raw: &RawEndpoint) -> Result<Endpoint> {
        let enum_root = self.inflector.camel(&raw.enum_root)?;
        let name = self.identifier(self.inflector.pascal(&enum_root)?, &raw.enum_root)?;
        let return_type = match non_blank(&raw.return_type) {
            None => ReturnType::Model,
            Some(t) if t == NO_RETURN => ReturnType::None,
            Some(t) => ReturnType::Named(t),
        };

        Ok(Endpoint {
            api: api.to_string(),
            enum_root,
            name,
            path: PathTemplate::parse(&raw.path)?,
            http_method: raw.http_method.parse::<HttpMethod>()?,
            scope: non_blank(&raw.scope),
            rate_limit: raw.rate_limit,
            description: non_blank(&raw.description),
            documentation: non_blank(&raw.documentation),
            return_type,
            slice: raw.slice,
            query_params: self.fields(&raw.query_params)?,
            body: self.fields(&raw.body)?,
        })
    }

    /// Build one enum of `api`.
    pub fn enumeration(&self, api: &str, raw: &RawEnum) -> Result<Enum> {
        let type_name = self.identifier(self.inflector.pascal(&raw.identifier)?, &raw.identifier)?;
        let plural = match &raw.pluralize {
            None | Some(PluralDecl::Derived(false)) => None,
            Some(PluralDecl::Derived(true)) => Some(self.inflector.plural(&type_name)?),
            Some(PluralDecl::Named(name)) => Some(self.inflector.pascal(name)?),
        };
        let plural = match plural {
            Some(plural_name) => {
                let type_name = self.identifier(plural_name, &raw.identifier)?;
                let var_name = go_safe_identifier(&self.inflector.camel(&type_name)?);
                Some(PluralForm { type_name, var_name })
            }
            None => None,
        };

        let mut values = raw
            .values
            .iter()
            .map(|value| -> Result<EnumValue> {
                let const_name = self.identifier(
                    format!("{type_name}{}", self.inflector.pascal(&value.identifier)?),
                    &value.identifier,
                )?;
                Ok(EnumValue {
                    identifier: value.identifier.clone(),
                    description: non_blank(&value.description),
                    const_name,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        values.sort_by(|a, b| a.const_name.cmp(&b.const_name));

        Ok(Enum {
            api: api.to_string(),
            identifier: raw.identifier.clone(),
            var_name: go_safe_identifier(&self.inflector.camel(&type_name)?),
            type_name,
            description: non_blank(&raw.description),
            plural,
            values,
        })
    }

    fn fields(&self, raw: &[RawField]) -> Result<Vec<Field>> {
        raw.iter().map(|f| self.field(f)).collect()
    }

    fn identifier(&self, name: String, origin: &str) -> Result<String> {
        if is_go_identifier(&name) {
            Ok(name)
        } else {
            Err(IrError::InvalidIdentifier { name, origin: origin.to_string() })
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
