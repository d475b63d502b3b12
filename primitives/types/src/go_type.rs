//! Classified Go types and their renderings.

use std::fmt;

use naming::{is_go_identifier, Inflector};

use crate::primitive::Primitive;
use crate::{Result, TypeError};

/// Prefix marking a custom scalar descriptor (`scalar.Money`).
pub const SCALAR_PREFIX: &str = "scalar.";

/// Generic query-encode routine for anything that is not a primitive.
const STRINGER_QUERY_ROUTINE: &str = "HTTPQueryEncodeStringer";

/// A classified type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GoType {
    /// One of the fixed primitives.
    Primitive(Primitive),
    /// A custom scalar from the `scalar` package; holds the name without the prefix.
    Scalar(String),
    /// A nested struct, optionally package-qualified.
    Struct(String),
    /// A slice; `pointer` is set for `[]*T`.
    List {
        /// Element type.
        element: Box<GoType>,
        /// Whether elements are held by pointer.
        pointer: bool,
    },
}

impl GoType {
    /// Classify a raw descriptor.
    ///
    /// Primitives are matched first so `[]string` is a primitive, not a list.
    ///
    /// # Examples
    /// ```
    /// use types::{GoType, Primitive};
    /// assert_eq!(GoType::parse("int32").unwrap(), GoType::Primitive(Primitive::Int32));
    /// assert_eq!(GoType::parse("scalar.Money").unwrap(), GoType::Scalar("Money".into()));
    /// assert!(GoType::parse("map[string]int").is_err());
    /// ```
    pub fn parse(descriptor: &str) -> Result<Self> {
        let descriptor = descriptor.trim();
        if descriptor.is_empty() {
            return Err(TypeError::Empty);
        }
        if let Some(primitive) = Primitive::from_descriptor(descriptor) {
            return Ok(GoType::Primitive(primitive));
        }
        if let Some(rest) = descriptor.strip_prefix("[]") {
            let (pointer, element) = match rest.strip_prefix('*') {
                Some(element) => (true, element),
                None => (false, rest),
            };
            let element = GoType::parse(element)
                .map_err(|_| TypeError::UnrecognizedDescriptor(descriptor.to_string()))?;
            return Ok(GoType::List { element: Box::new(element), pointer });
        }
        if let Some(name) = descriptor.strip_prefix(SCALAR_PREFIX) {
            if is_go_identifier(name) {
                return Ok(GoType::Scalar(name.to_string()));
            }
            return Err(TypeError::UnrecognizedDescriptor(descriptor.to_string()));
        }
        if is_struct_reference(descriptor) {
            return Ok(GoType::Struct(descriptor.to_string()));
        }
        Err(TypeError::UnrecognizedDescriptor(descriptor.to_string()))
    }

    /// Rendering used in model structs: the descriptor, verbatim.
    pub fn value_rendering(&self) -> String {
        match self {
            GoType::Primitive(p) => p.as_go().to_string(),
            GoType::Scalar(name) => format!("{SCALAR_PREFIX}{name}"),
            GoType::Struct(name) => name.clone(),
            GoType::List { element, pointer } => {
                format!("[]{}{}", if *pointer { "*" } else { "" }, element.value_rendering())
            }
        }
    }

    /// Rendering used in request-option structs.
    ///
    /// A required member keeps the value rendering. A non-required list becomes a
    /// list of pointers; a primitive string slice stays as is, a nil slice already
    /// means "absent". Everything else gains one pointer.
    pub fn optional_rendering(&self, required: bool) -> String {
        if required {
            return self.value_rendering();
        }
        match self {
            // HTTPQueryEncodeStrings takes a plain []string; nil already means absent.
            GoType::Primitive(Primitive::StringSlice) => self.value_rendering(),
            GoType::List { element, .. } => format!("[]*{}", element.value_rendering()),
            _ => format!("*{}", self.value_rendering()),
        }
    }

    /// Whether the type is a slice, either a list or the string-slice primitive.
    pub fn is_list(&self) -> bool {
        matches!(self, GoType::List { .. } | GoType::Primitive(Primitive::StringSlice))
    }

    /// The primitive, if this is one.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            GoType::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns true for primitives.
    pub fn is_primitive(&self) -> bool { self.primitive().is_some() }

    /// Element type and pointer flag of a list whose elements are structs.
    pub fn struct_list_element(&self) -> Option<(&str, bool)> {
        match self {
            GoType::List { element, pointer } => match element.as_ref() {
                GoType::Struct(name) => Some((name.as_str(), *pointer)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Query-encode routine for a member of this type.
    pub fn query_routine(&self) -> &'static str {
        match self {
            GoType::Primitive(p) => p.query_routine(),
            _ => STRINGER_QUERY_ROUTINE,
        }
    }

    /// Decode routine for a custom scalar: `Unmarshal<Name>`.
    pub fn scalar_decode_routine(&self, inflector: &Inflector) -> Result<Option<String>> {
        match self {
            GoType::Scalar(name) => Ok(Some(format!("Unmarshal{}", inflector.pascal(name)?))),
            _ => Ok(None),
        }
    }

    /// Go packages referenced by the rendering (`time`, `scalar`, or a qualifier).
    pub fn packages(&self) -> Vec<String> {
        match self {
            GoType::Primitive(Primitive::Time) => vec!["time".to_string()],
            GoType::Primitive(_) => Vec::new(),
            GoType::Scalar(_) => vec!["scalar".to_string()],
            GoType::Struct(name) => {
                name.split_once('.').map(|(pkg, _)| vec![pkg.to_string()]).unwrap_or_default()
            }
            GoType::List { element, .. } => element.packages(),
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.value_rendering()) }
}

fn is_struct_reference(descriptor: &str) -> bool {
    match descriptor.split_once('.') {
        Some((pkg, name)) => is_go_identifier(pkg) && is_go_identifier(name),
        None => is_go_identifier(descriptor),
    }
}
