//! The closed set of primitive Go types understood by the emitters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A primitive Go type with a fixed decode and query-encode routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Primitive {
    /// `string`
    String,
    /// `bool`
    Bool,
    /// `time.Time`
    Time,
    /// `int`
    Int,
    /// `int32`
    Int32,
    /// `[]string`
    StringSlice,
    /// `float64`
    Float64,
}

impl Primitive {
    /// Every primitive, in declaration order.
    pub const ALL: [Primitive; 7] = [
        Primitive::String,
        Primitive::Bool,
        Primitive::Time,
        Primitive::Int,
        Primitive::Int32,
        Primitive::StringSlice,
        Primitive::Float64,
    ];

    /// Look up a primitive by its Go spelling.
    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_go() == descriptor)
    }

    /// Go spelling of the type.
    pub fn as_go(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Bool => "bool",
            Primitive::Time => "time.Time",
            Primitive::Int => "int",
            Primitive::Int32 => "int32",
            Primitive::StringSlice => "[]string",
            Primitive::Float64 => "float64",
        }
    }

    /// Name of the `serial` transform method that decodes this primitive.
    pub fn decode_routine(&self) -> &'static str {
        match self {
            Primitive::String => "UnmarshalString",
            Primitive::Bool => "UnmarshalBool",
            Primitive::Time => "UnmarshalTime",
            Primitive::Int => "UnmarshalInt",
            Primitive::Int32 => "UnmarshalInt32",
            Primitive::StringSlice => "UnmarshalStringSlice",
            Primitive::Float64 => "UnmarshalFloat",
        }
    }

    /// Name of the `internal` routine that writes this primitive onto a query string.
    pub fn query_routine(&self) -> &'static str {
        match self {
            Primitive::String => "HTTPQueryEncodeString",
            Primitive::Bool => "HTTPQueryEncodeBool",
            Primitive::Time => "HTTPQueryEncodeTime",
            Primitive::Int => "HTTPQueryEncodeInt",
            Primitive::Int32 => "HTTPQueryEncodeInt32",
            Primitive::StringSlice => "HTTPQueryEncodeStrings",
            Primitive::Float64 => "HTTPQueryEncodeFloat",
        }
    }

    /// Whether the primitive is itself a slice.
    pub fn is_list(&self) -> bool { matches!(self, Primitive::StringSlice) }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_go()) }
}
