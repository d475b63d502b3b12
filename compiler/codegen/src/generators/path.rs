//! `path.go`: endpoint path enumeration, builders and scopes.

use ir::{Namespace, PathPart, PathTemplate};

use crate::generators::{doc_comment, uint8_enumeration};
use crate::go_ast::{call, ident, string, GoDecl, GoExpr, GoFile, GoFunc, GoParam, GoStmt};
use crate::{ArtifactGenerator, GoSettings, Result};

const PATH_TYPE: &str = "rawPath";
const PARAMS_TYPE: &str = "map[string]string";

/// `path.Join(...)` over the parts of `template`, reading parameters from `params`.
pub fn join_expr(template: &PathTemplate) -> GoExpr {
    let args = template
        .parts()
        .iter()
        .map(|part| match part {
            PathPart::Literal(lit) => string(lit),
            PathPart::Param { name, .. } => ident("params").index(string(name)),
        })
        .collect();
    call("path.Join", args)
}

fn builder(name: String, template: &PathTemplate, doc: Option<&str>, width: usize) -> GoDecl {
    let param = if template.has_params() { "params" } else { "_" };
    GoDecl::Func(
        GoFunc::new(name)
            .doc(doc_comment::line_comment(doc, width))
            .param(param, PARAMS_TYPE)
            .result(GoParam::unnamed("string"))
            .body(vec![GoStmt::Return(vec![join_expr(template)])]),
    )
}

/// Generates the path enumeration of a namespace.
pub struct PathGenerator;

impl ArtifactGenerator for PathGenerator {
    fn file_name(&self) -> &'static str { "path.go" }

    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>> {
        let endpoints = namespace.endpoints();
        if endpoints.is_empty() {
            return Ok(None);
        }

        let mut file = GoFile::new(&namespace.api);
        file.import("path");
        file.decls.extend(uint8_enumeration(
            PATH_TYPE,
            endpoints.iter().map(|(_, ep)| ep.path_const()).collect(),
        )?);

        for (_, ep) in &endpoints {
            file.push(builder(ep.path_fn(), &ep.path, ep.description.as_deref(), settings.comment_width));
        }

        let dispatch = GoExpr::Composite {
            ty: format!("map[{PATH_TYPE}]func({PARAMS_TYPE}) string"),
            elems: endpoints.iter().map(|(_, ep)| (Some(ident(ep.path_const())), ident(ep.path_fn()))).collect(),
        };
        file.push(GoDecl::Func(
            GoFunc::new("Path")
                .doc(doc_comment::line_comment(
                    Some(&format!(
                        "Get takes an {PATH_TYPE} const and {PATH_TYPE} arguments to parse the URL {PATH_TYPE} path."
                    )),
                    settings.comment_width,
                ))
                .receiver("p", PATH_TYPE)
                .param("params", PARAMS_TYPE)
                .result(GoParam::unnamed("string"))
                .body(vec![GoStmt::Return(vec![dispatch.index(ident("p")).call(vec![ident("params")])])]),
        ));

        let scopes = GoExpr::Composite {
            ty: format!("map[{PATH_TYPE}]string"),
            elems: endpoints
                .iter()
                .filter_map(|(_, ep)| ep.scope.as_ref().map(|s| (Some(ident(ep.path_const())), string(s))))
                .collect(),
        };
        file.push(GoDecl::Func(
            GoFunc::new("Scope")
                .receiver("p", PATH_TYPE)
                .result(GoParam::unnamed("string"))
                .body(vec![GoStmt::Return(vec![scopes.index(ident("p"))])]),
        ));

        Ok(Some(file))
    }
}
