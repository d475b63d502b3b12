//! `types.go`: string enumerations and their CSV collections.

use ir::{Enum, Namespace, PluralForm};

use crate::generators::doc_comment;
use crate::go_ast::{
    call, ident, string, GoComment, GoDecl, GoExpr, GoFile, GoFunc, GoParam, GoStmt, GoValueSpec,
};
use crate::{ArtifactGenerator, GoSettings, Result};

fn string_method(doc: String, var: &str, ty: &str, body: Vec<GoStmt>) -> GoDecl {
    GoDecl::Func(
        GoFunc::new("String")
            .doc(Some(GoComment::Line(vec![doc])))
            .receiver(var, format!("*{ty}"))
            .result(GoParam::unnamed("string"))
            .body(body),
    )
}

fn value_string(e: &Enum) -> GoDecl {
    let var = &e.var_name;
    string_method(
        format!("String will convert a {} into a string.", e.type_name),
        var,
        &e.type_name,
        vec![
            GoStmt::If {
                init: None,
                cond: GoExpr::not_nil(ident(var)),
                body: vec![GoStmt::Return(vec![call("string", vec![ident(var).deref()])])],
            },
            GoStmt::Return(vec![string("")]),
        ],
    )
}

fn plural_string(e: &Enum, plural: &PluralForm) -> GoDecl {
    let var = &plural.var_name;
    let append = GoStmt::Assign {
        target: ident("slice"),
        value: call("append", vec![ident("slice"), ident("val").field("String").call(Vec::new())]),
    };
    string_method(
        format!("String will convert a slice of {} into a CSV.", e.type_name),
        var,
        &plural.type_name,
        vec![
            GoStmt::Var { name: "str".into(), ty: "string".into() },
            GoStmt::If {
                init: None,
                cond: GoExpr::not_nil(ident(var)),
                body: vec![
                    GoStmt::Define {
                        names: vec!["slice".into()],
                        values: vec![GoExpr::Composite { ty: "[]string".into(), elems: Vec::new() }],
                    },
                    GoStmt::Range { key: "_".into(), value: "val".into(), expr: ident(var).deref(), body: vec![append] },
                    GoStmt::Assign {
                        target: ident("str"),
                        value: call("strings.Join", vec![ident("slice"), string(",")]),
                    },
                ],
            },
            GoStmt::Return(vec![ident("str")]),
        ],
    )
}

/// Declarations of one enumeration, in emission order.
pub fn enum_decls(e: &Enum, width: usize) -> Vec<GoDecl> {
    let mut decls = vec![GoDecl::Type {
        doc: doc_comment::block_comment(e.description.as_deref(), width),
        name: e.type_name.clone(),
        underlying: "string".into(),
    }];
    if let Some(plural) = &e.plural {
        decls.push(GoDecl::Type {
            doc: None,
            name: plural.type_name.clone(),
            underlying: format!("[]{}", e.type_name),
        });
    }
    if !e.values.is_empty() {
        decls.push(GoDecl::Const(
            e.values
                .iter()
                .map(|v| {
                    GoValueSpec::typed(&v.const_name, &e.type_name, string(&v.identifier))
                        .doc(doc_comment::line_comment(v.description.as_deref(), width))
                })
                .collect(),
        ));
    }
    decls.push(value_string(e));
    if let Some(plural) = &e.plural {
        decls.push(plural_string(e, plural));
    }
    decls
}

/// Generates the enumerations of a namespace.
pub struct EnumsGenerator;

impl ArtifactGenerator for EnumsGenerator {
    fn file_name(&self) -> &'static str { "types.go" }

    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>> {
        if namespace.enums.is_empty() {
            return Ok(None);
        }

        let mut file = GoFile::new(&namespace.api);
        for e in &namespace.enums {
            if e.plural.is_some() {
                file.import("strings");
            }
            file.decls.extend(enum_decls(e, settings.comment_width));
        }
        Ok(Some(file))
    }
}
