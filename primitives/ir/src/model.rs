//! The immutable IR consumed by every emitter.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use types::GoType;

use crate::path_template::PathTemplate;
use crate::IrError;

/// A model attribute, query parameter or body parameter with its derived names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Wire identifier, used verbatim in `json` tags and encoder keys.
    pub identifier: String,
    /// Classified Go type.
    pub go_type: GoType,
    /// Whether the member is always present.
    pub required: bool,
    /// Free-text description.
    pub description: Option<String>,
    /// Explicit decode routine.
    pub decoder_override: Option<String>,
    /// Timestamp layout expression, resolved against the run's default.
    pub datetime_layout: String,
    /// Set when the schema asked for a layout other than the default.
    pub custom_layout: bool,
    /// Go struct member name (`ProductID`).
    pub member_name: String,
    /// Tag constant name used by decoders (`productIDJSONTag`).
    pub tag_const: String,
    /// Snake name used in `bson` and `sql` tags.
    pub snake_name: String,
    /// Keyword-safe variable name for setter parameters.
    pub variable_name: String,
}

/// What an HTTP stub returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    /// The owning document's model.
    Model,
    /// An explicit Go type.
    Named(String),
    /// Nothing but an error.
    None,
}

/// HTTP verbs the generated client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(IrError::HttpMethod(s.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Api namespace the endpoint belongs to.
    pub api: String,
    /// Lower-camel enum root (`accountHolds`).
    pub enum_root: String,
    /// Pascal form of the enum root (`AccountHolds`), the stem of every generated name.
    pub name: String,
    /// Parsed path template.
    pub path: PathTemplate,
    /// HTTP verb.
    pub http_method: HttpMethod,
    /// Permission scope.
    pub scope: Option<String>,
    /// Token-bucket burst size.
    pub rate_limit: u32,
    /// Free-text description.
    pub description: Option<String>,
    /// Link to upstream documentation.
    pub documentation: Option<String>,
    /// Result override.
    pub return_type: ReturnType,
    /// Whether the endpoint returns a list of models.
    pub slice: bool,
    /// Query-string parameters.
    pub query_params: Vec<Field>,
    /// JSON body parameters.
    pub body: Vec<Field>,
}

impl Endpoint {
    /// Path enumeration constant (`AccountHoldsPath`).
    pub fn path_const(&self) -> String { format!("{}Path", self.name) }

    /// Path builder function (`getAccountHoldsPath`).
    pub fn path_fn(&self) -> String { format!("get{}Path", self.name) }

    /// Rate-limiter enumeration constant (`AccountHoldsRatelimiter`).
    pub fn ratelimiter_const(&self) -> String { format!("{}Ratelimiter", self.name) }

    /// Request-options type (`AccountHoldsOptions`).
    pub fn options_type(&self) -> String { format!("{}Options", self.name) }

    /// Whether the endpoint has any query or body parameter.
    pub fn has_params(&self) -> bool { !self.query_params.is_empty() || !self.body.is_empty() }

    /// Query then body parameters, in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &Field> {
        self.query_params.iter().chain(self.body.iter())
    }

    /// The endpoint's rate-limiter binding.
    pub fn ratelimiter(&self) -> RatelimiterBinding {
        RatelimiterBinding { const_name: self.ratelimiter_const(), quota: self.rate_limit }
    }
}

/// A rate-limiter slot bound to one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RatelimiterBinding {
    /// Enumeration constant naming the slot.
    pub const_name: String,
    /// Burst size passed to the accessor.
    pub quota: u32,
}

/// One model document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Api namespace.
    pub api: String,
    /// Go model type name.
    pub model_name: String,
    /// Receiver variable name for methods on the model.
    pub model_var: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Model attributes, in declaration order.
    pub fields: Vec<Field>,
    /// Endpoints returning the model.
    pub endpoints: Vec<Endpoint>,
    /// The document only declares a model.
    pub model_only: bool,
    /// Aliased type for `type X <alias>` models.
    pub non_struct_alias: Option<String>,
    /// Hand-written decoder source, emitted verbatim.
    pub custom_decoder: Option<String>,
}

impl SchemaDocument {
    /// Fields sorted by Go member name.
    pub fn sorted_fields(&self) -> Vec<&Field> {
        let mut fields: Vec<&Field> = self.fields.iter().collect();
        fields.sort_by(|a, b| a.member_name.cmp(&b.member_name));
        fields
    }
}

/// One enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Literal string value.
    pub identifier: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Constant name: enum type name followed by the pascal value.
    pub const_name: String,
}

/// The derived collection type of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralForm {
    /// Collection type name.
    pub type_name: String,
    /// Receiver variable name.
    pub var_name: String,
}

/// A string enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    /// Api namespace.
    pub api: String,
    /// Schema identifier.
    pub identifier: String,
    /// Go type name.
    pub type_name: String,
    /// Receiver variable name.
    pub var_name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Collection type, when declared.
    pub plural: Option<PluralForm>,
    /// Values, sorted by constant name.
    pub values: Vec<EnumValue>,
}

/// Everything generated into one Go package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    /// Api namespace, also the Go package name.
    pub api: String,
    /// Documents sorted by model name.
    pub documents: Vec<SchemaDocument>,
    /// Enums sorted by type name.
    pub enums: Vec<Enum>,
}

impl Namespace {
    /// Every endpoint in the namespace, with its document, sorted by enum root.
    pub fn endpoints(&self) -> Vec<(&SchemaDocument, &Endpoint)> {
        let mut endpoints: Vec<(&SchemaDocument, &Endpoint)> = self
            .documents
            .iter()
            .flat_map(|doc| doc.endpoints.iter().map(move |ep| (doc, ep)))
            .collect();
        endpoints.sort_by(|(_, a), (_, b)| a.enum_root.cmp(&b.enum_root));
        endpoints
    }

    /// Rate-limiter bindings sorted by constant name.
    pub fn ratelimiters(&self) -> Vec<RatelimiterBinding> {
        let mut bindings: Vec<RatelimiterBinding> =
            self.endpoints().into_iter().map(|(_, ep)| ep.ratelimiter()).collect();
        bindings.sort();
        bindings
    }

    /// Whether any document in the namespace declares an endpoint.
    pub fn has_endpoints(&self) -> bool { self.documents.iter().any(|d| !d.endpoints.is_empty()) }
}

/// The IR of one generator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationIr {
    namespaces: BTreeMap<String, Namespace>,
}

impl GenerationIr {
    /// Assemble the IR from built documents and enums; every collection is sorted
    /// so the result does not depend on input order.
    pub fn new(documents: Vec<SchemaDocument>, enums: Vec<Enum>) -> Self {
        let mut namespaces: BTreeMap<String, Namespace> = BTreeMap::new();
        for doc in documents {
            namespace_entry(&mut namespaces, &doc.api).documents.push(doc);
        }
        for e in enums {
            namespace_entry(&mut namespaces, &e.api).enums.push(e);
        }
        for ns in namespaces.values_mut() {
            ns.documents.sort_by(|a, b| a.model_name.cmp(&b.model_name));
            ns.enums.sort_by(|a, b| a.type_name.cmp(&b.type_name));
        }
        Self { namespaces }
    }

    /// Namespaces in api order.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> { self.namespaces.values() }

    /// Look up one namespace.
    pub fn namespace(&self, api: &str) -> Option<&Namespace> { self.namespaces.get(api) }

    /// Number of namespaces.
    pub fn len(&self) -> usize { self.namespaces.len() }

    /// Whether the run produced no namespaces.
    pub fn is_empty(&self) -> bool { self.namespaces.is_empty() }
}

fn namespace_entry<'a>(
    namespaces: &'a mut BTreeMap<String, Namespace>,
    api: &str,
) -> &'a mut Namespace {
    namespaces
        .entry(api.to_string())
        .or_insert_with(|| Namespace { api: api.to_string(), ..Namespace::default() })
}
