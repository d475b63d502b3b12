//! Decoder selection.
//!
//! Every model field gets one decode strategy, chosen in priority order: an explicit
//! override, the primitive's fixed routine, the scalar family routine, a re-encoding
//! loop for lists, and finally the generic struct decode. A document only gets an
//! `UnmarshalJSON` method when some field needs more than `encoding/json` would do.

use ir::{Field, SchemaDocument};
use naming::Inflector;
use types::{GoType, Primitive};

use crate::generators::doc_comment;
use crate::go_ast::{call, ident, GoDecl, GoExpr, GoFunc, GoParam, GoStmt, GoValueSpec};
use crate::{CodegenError, GoSettings, Result};

/// How one field is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// A routine named in the schema; its error is propagated.
    Override(String),
    /// The primitive's best-effort routine.
    Primitive(Primitive),
    /// `UnmarshalTime` with a layout; its error is propagated.
    Time {
        /// Go expression naming the layout.
        layout: String,
    },
    /// A scalar family routine.
    Scalar {
        /// Routine name, `Unmarshal<Scalar>`.
        routine: String,
    },
    /// Re-encode each raw element and decode it into `element`.
    List {
        /// Element type rendering.
        element: String,
        /// Elements are stored by pointer.
        pointer: bool,
        /// Elements are structs, zero-valued with a composite literal.
        is_struct: bool,
    },
    /// Generic struct decode; its error is propagated.
    Struct {
        /// Struct type rendering.
        ty: String,
    },
}

/// Choose the decode strategy for `field`.
pub fn select_strategy(field: &Field, inflector: &Inflector) -> Result<DecodeStrategy> {
    if let Some(routine) = &field.decoder_override {
        return Ok(DecodeStrategy::Override(routine.clone()));
    }
    Ok(match &field.go_type {
        GoType::Primitive(Primitive::Time) => {
            DecodeStrategy::Time { layout: field.datetime_layout.clone() }
        }
        GoType::Primitive(primitive) => DecodeStrategy::Primitive(*primitive),
        scalar @ GoType::Scalar(name) => {
            let routine = scalar.scalar_decode_routine(inflector)?.ok_or_else(|| {
                CodegenError::EmissionInvariant(format!("scalar `{name}` has no decode routine"))
            })?;
            DecodeStrategy::Scalar { routine }
        }
        GoType::List { element, pointer } => DecodeStrategy::List {
            element: element.value_rendering(),
            pointer: *pointer,
            is_struct: matches!(element.as_ref(), GoType::Struct(_)),
        },
        GoType::Struct(name) => DecodeStrategy::Struct { ty: name.clone() },
    })
}

/// Whether `field` needs anything beyond the plain primitive decode.
pub fn needs_custom_decoding(field: &Field) -> bool {
    field.decoder_override.is_some()
        || field.custom_layout
        || matches!(field.go_type, GoType::Scalar(_) | GoType::List { .. } | GoType::Struct(_))
}

/// Whether the generated code for `doc` carries an `UnmarshalJSON` method.
pub fn has_decoder(doc: &SchemaDocument) -> bool {
    doc.custom_decoder.is_some()
        || (doc.non_struct_alias.is_none()
            && !doc.fields.is_empty()
            && doc.fields.iter().any(needs_custom_decoding))
}

/// Whether the decoder of `doc` calls into `encoding/json`.
pub fn uses_json(doc: &SchemaDocument) -> bool {
    doc.custom_decoder.is_none() && doc.fields.iter().any(|f| matches!(f.go_type, GoType::List { .. }))
}

/// The `UnmarshalJSON` method of `doc`, when it needs one.
pub fn document_decoder(doc: &SchemaDocument, settings: &GoSettings) -> Result<Option<GoDecl>> {
    let comment = format!("UnmarshalJSON will deserialize bytes into a {} model", doc.model_name);
    let doc_comment = doc_comment::line_comment(Some(&comment), settings.comment_width);

    if let Some(source) = &doc.custom_decoder {
        return Ok(Some(GoDecl::Verbatim { doc: doc_comment, source: source.clone() }));
    }
    if !has_decoder(doc) {
        return Ok(None);
    }

    let mut body = vec![
        GoStmt::Const(
            doc.fields
                .iter()
                .map(|f| GoValueSpec::value(&f.tag_const, GoExpr::Str(f.identifier.clone())))
                .collect(),
        ),
        GoStmt::Define {
            names: vec!["data".into(), "err".into()],
            values: vec![call("serial.NewJSONTransform", vec![ident("d")])],
        },
        GoStmt::return_on_err(),
    ];
    for field in doc.sorted_fields() {
        let strategy = select_strategy(field, &settings.inflector)?;
        body.extend(decode_statements(&doc.model_var, field, &strategy));
    }
    body.push(GoStmt::Return(vec![ident("nil")]));

    Ok(Some(GoDecl::Func(
        GoFunc::new("UnmarshalJSON")
            .doc(doc_comment)
            .receiver(&doc.model_var, format!("*{}", doc.model_name))
            .param("d", "[]byte")
            .result(GoParam::unnamed("error"))
            .body(body),
    )))
}

/// Statements decoding `field` into `receiver`.
pub fn decode_statements(receiver: &str, field: &Field, strategy: &DecodeStrategy) -> Vec<GoStmt> {
    let tag = ident(&field.tag_const);
    let member = ident(receiver).field(&field.member_name);
    let data = |routine: &str| format!("data.{routine}");

    match strategy {
        DecodeStrategy::Override(routine) => vec![
            GoStmt::Assign {
                target: ident("err"),
                value: call(data(routine), vec![tag, member.addr()]),
            },
            GoStmt::return_on_err(),
        ],
        DecodeStrategy::Primitive(primitive) => {
            vec![GoStmt::Expr(call(data(primitive.decode_routine()), vec![tag, member.addr()]))]
        }
        DecodeStrategy::Time { layout } => vec![
            GoStmt::Assign {
                target: ident("err"),
                value: call(data(Primitive::Time.decode_routine()), vec![ident(layout), tag, member.addr()]),
            },
            GoStmt::return_on_err(),
        ],
        DecodeStrategy::Scalar { routine } => {
            vec![GoStmt::Expr(call(data(routine), vec![tag, member.addr()]))]
        }
        DecodeStrategy::List { element, pointer, is_struct } => {
            let zero = if *is_struct {
                GoStmt::Define {
                    names: vec!["obj".into()],
                    values: vec![GoExpr::Composite { ty: element.clone(), elems: Vec::new() }],
                }
            } else {
                GoStmt::Var { name: "obj".into(), ty: element.clone() }
            };
            let item = if *pointer { ident("obj").addr() } else { ident("obj") };
            let value = call("data.Value", vec![tag]);
            let each = vec![
                GoStmt::Define {
                    names: vec!["bytes".into(), "err".into()],
                    values: vec![call("json.Marshal", vec![ident("item")])],
                },
                GoStmt::return_on_err(),
                zero,
                GoStmt::If {
                    init: Some(Box::new(GoStmt::Define {
                        names: vec!["err".into()],
                        values: vec![call("json.Unmarshal", vec![ident("bytes"), ident("obj").addr()])],
                    })),
                    cond: GoExpr::not_nil(ident("err")),
                    body: vec![GoStmt::Return(vec![ident("err")])],
                },
                GoStmt::Assign { target: member.clone(), value: call("append", vec![member, item]) },
            ];
            vec![GoStmt::If {
                init: Some(Box::new(GoStmt::Define { names: vec!["v".into()], values: vec![value] })),
                cond: GoExpr::not_nil(ident("v")),
                body: vec![GoStmt::Range {
                    key: "_".into(),
                    value: "item".into(),
                    expr: GoExpr::TypeAssert(Box::new(ident("v")), "[]interface{}".into()),
                    body: each,
                }],
            }]
        }
        DecodeStrategy::Struct { ty } => vec![
            GoStmt::Assign {
                target: member.clone(),
                value: GoExpr::Composite { ty: ty.clone(), elems: Vec::new() },
            },
            GoStmt::If {
                init: Some(Box::new(GoStmt::Define {
                    names: vec!["err".into()],
                    values: vec![call(data("UnmarshalStruct"), vec![tag, member.addr()])],
                })),
                cond: GoExpr::not_nil(ident("err")),
                body: vec![GoStmt::Return(vec![ident("err")])],
            },
        ],
    }
}
