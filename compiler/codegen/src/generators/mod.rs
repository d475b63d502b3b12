//! Artifact generators, one per generated Go file, plus the pieces they share.

use ir::Field;
use types::GoType;

use crate::go_ast::{ident, GoDecl, GoFile, GoStructField, GoValueSpec};
use crate::{CodegenError, GoImports, Result};

/// Wrapped `//` and `/* */` comments.
pub mod doc_comment;

/// Per-field decode strategies and document decoders.
pub mod decoder;

pub mod enums;
pub mod http;
pub mod models;
pub mod options;
pub mod path;
pub mod ratelimiter;

pub use enums::EnumsGenerator;
pub use http::HttpGenerator;
pub use models::ModelsGenerator;
pub use options::OptionsGenerator;
pub use path::PathGenerator;
pub use ratelimiter::RatelimiterGenerator;

/// Struct member order: documented members first, each group by member name.
pub(crate) fn member_order<'a>(fields: impl IntoIterator<Item = &'a Field>) -> Vec<&'a Field> {
    let mut fields: Vec<&Field> = fields.into_iter().collect();
    fields.sort_by(|a, b| {
        a.description.is_none().cmp(&b.description.is_none()).then(a.member_name.cmp(&b.member_name))
    });
    fields
}

/// A tagged struct member rendered with `ty`.
pub(crate) fn struct_member(field: &Field, ty: String, width: usize) -> GoStructField {
    GoStructField {
        doc: doc_comment::line_comment(field.description.as_deref(), width),
        name: field.member_name.clone(),
        ty,
        tag: Some(format!(
            "bson:\"{snake}\" json:\"{id}\" sql:\"{snake}\"",
            snake = field.snake_name,
            id = field.identifier
        )),
    }
}

/// Import the packages a type rendering refers to.
///
/// Qualifiers other than `time` and `scalar` name packages this generator does not
/// know the path of; resolving them is left to the formatter.
pub(crate) fn import_type(ty: &GoType, imports: &GoImports, file: &mut GoFile) {
    for package in ty.packages() {
        match package.as_str() {
            "time" => file.import("time"),
            "scalar" => file.import(imports.scalar.clone()),
            _ => {}
        }
    }
}

/// `type <name> uint8` followed by an `iota` const block of `names`.
///
/// The zero value is kept unnamed, and tables indexed by the type are sized
/// `uint8(len + 1)`, so at most 254 names fit.
pub(crate) fn uint8_enumeration(type_name: &str, mut names: Vec<String>) -> Result<Vec<GoDecl>> {
    if names.len() >= usize::from(u8::MAX) {
        return Err(CodegenError::EmissionInvariant(format!(
            "{} {type_name} constants do not fit in a uint8",
            names.len()
        )));
    }
    names.sort();

    let mut specs = vec![GoValueSpec::typed("_", type_name, ident("iota"))];
    specs.extend(names.into_iter().map(GoValueSpec::name));
    Ok(vec![
        GoDecl::Type { doc: None, name: type_name.into(), underlying: "uint8".into() },
        GoDecl::Const(specs),
    ])
}

#[cfg(test)]
pub(crate) mod testing {
    //! IR fixtures shared by the generator tests.

    use ir::{GenerationIr, IrBuilder, Namespace, RawSchemaDocument, RawTypesDocument};
    use naming::Inflector;

    /// Build the single namespace described by `docs` and `types`.
    pub fn namespace(docs: &[serde_json::Value], types: &[serde_json::Value]) -> Namespace {
        let docs: Vec<RawSchemaDocument> = docs
            .iter()
            .map(|d| serde_json::from_value(d.clone()).expect("schema document"))
            .collect();
        let types: Vec<RawTypesDocument> = types
            .iter()
            .map(|t| serde_json::from_value(t.clone()).expect("types document"))
            .collect();
        let inflector = Inflector::default();
        let ir: GenerationIr = IrBuilder::new(&inflector).build(&docs, &types).expect("IR builds");
        let ns = ir.namespaces().next().cloned().expect("one namespace");
        ns
    }
}
