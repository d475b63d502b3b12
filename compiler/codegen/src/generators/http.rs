//! `http.go`: one client method per endpoint.

use ir::{Endpoint, Namespace, ReturnType, SchemaDocument};
use naming::go_safe_identifier;
use types::{GoType, Primitive};

use crate::generators::{doc_comment, import_type};
use crate::go_ast::{call, ident, multiline_call, string, GoDecl, GoExpr, GoFile, GoFunc, GoParam, GoStmt};
use crate::{ArtifactGenerator, GoSettings, Result};

/// A path parameter as it appears in a stub's signature.
struct PathArg {
    key: String,
    var: String,
    ty: String,
    conversion: Conversion,
}

enum Conversion {
    None,
    Sprint,
    Stringer,
}

impl PathArg {
    fn value(&self) -> GoExpr {
        match self.conversion {
            Conversion::None => ident(&self.var),
            Conversion::Sprint => call("fmt.Sprint", vec![ident(&self.var)]),
            Conversion::Stringer => ident(&self.var).field("String").call(Vec::new()),
        }
    }
}

/// Names a stub body already uses: its receiver, result, locals and the packages it calls.
const STUB_NAMES: &[&str] = &["c", "m", "opts", "req", "internal", "fmt", "scalar", "time"];

fn path_args(endpoint: &Endpoint, settings: &GoSettings) -> Result<Vec<PathArg>> {
    let mut args: Vec<PathArg> = Vec::new();
    for (name, ty) in endpoint.path.params() {
        // A repeated parameter resolves to the same value, so it is one argument.
        if args.iter().any(|a| a.key == name) {
            continue;
        }
        let conversion = match GoType::parse(ty) {
            Ok(GoType::Primitive(Primitive::String)) => Conversion::None,
            Ok(GoType::Primitive(_)) => Conversion::Sprint,
            _ => Conversion::Stringer,
        };
        let mut var = go_safe_identifier(&settings.inflector.camel(name)?);
        while STUB_NAMES.contains(&var.as_str()) || args.iter().any(|a| a.var == var) {
            var.push_str("Param");
        }
        args.push(PathArg { key: name.to_string(), var, ty: ty.to_string(), conversion });
    }
    Ok(args)
}

fn result_type(doc: &SchemaDocument, endpoint: &Endpoint) -> Option<String> {
    match &endpoint.return_type {
        ReturnType::None => None,
        ReturnType::Named(ty) => Some(ty.clone()),
        ReturnType::Model if endpoint.slice => Some(format!("[]*{}", doc.model_name)),
        ReturnType::Model => Some(format!("*{}", doc.model_name)),
    }
}

/// Build the client method of `endpoint`, registering the imports it needs on `file`.
pub fn endpoint_stub(
    doc: &SchemaDocument,
    endpoint: &Endpoint,
    settings: &GoSettings,
    file: &mut GoFile,
) -> Result<GoDecl> {
    let args = path_args(endpoint, settings)?;
    let opts = if endpoint.has_params() { ident("opts") } else { ident("nil") };

    let mut func = GoFunc::new(&endpoint.name)
        .doc(doc_comment::line_comment_with_source(
            endpoint.description.as_deref(),
            endpoint.documentation.as_deref(),
            settings.comment_width,
        ))
        .receiver("c", "*Client");
    for arg in &args {
        func = func.param(&arg.var, &arg.ty);
        if matches!(arg.conversion, Conversion::Sprint) {
            file.import("fmt");
        }
        if let Ok(ty) = GoType::parse(&arg.ty) {
            import_type(&ty, &settings.imports, file);
        }
    }
    if endpoint.has_params() {
        func = func.param("opts", format!("*{}", endpoint.options_type()));
    }

    let params = if args.is_empty() {
        ident("nil")
    } else {
        GoExpr::Composite {
            ty: "map[string]string".into(),
            elems: args.iter().map(|a| (Some(string(&a.key)), a.value())).collect(),
        }
    };

    let result = result_type(doc, endpoint);
    let target = if result.is_some() { ident("m").addr() } else { ident("nil") };
    let fetch = multiline_call(
        "internal.HTTPFetch",
        vec![
            target,
            call("internal.HTTPWithClient", vec![ident("c").field("Client")]),
            call("internal.HTTPWithEncoder", vec![opts.clone()]),
            call("internal.HTTPWithEndpoint", vec![ident(endpoint.path_const())]),
            call("internal.HTTPWithParams", vec![params]),
            call(
                "internal.HTTPWithRatelimiter",
                vec![call(
                    "getRateLimiter",
                    vec![ident(endpoint.ratelimiter_const()), GoExpr::Int(u64::from(endpoint.rate_limit))],
                )],
            ),
            call("internal.HTTPWithRequest", vec![ident("req")]),
        ],
    );

    let request = GoStmt::Define {
        names: vec!["req".into(), "_".into()],
        values: vec![call(
            "internal.HTTPNewRequest",
            vec![string(endpoint.http_method.as_str()), string(""), opts],
        )],
    };

    func = match result {
        Some(ty) => func
            .result(GoParam::new("m", ty))
            .result(GoParam::new("_", "error"))
            .body(vec![request, GoStmt::Return(vec![ident("m"), fetch])]),
        None => func.result(GoParam::unnamed("error")).body(vec![request, GoStmt::Return(vec![fetch])]),
    };
    Ok(GoDecl::Func(func))
}

/// Generates the client stubs of a namespace.
pub struct HttpGenerator;

impl ArtifactGenerator for HttpGenerator {
    fn file_name(&self) -> &'static str { "http.go" }

    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>> {
        let endpoints = namespace.endpoints();
        if endpoints.is_empty() {
            return Ok(None);
        }

        let mut file = GoFile::new(&namespace.api);
        file.import(settings.imports.internal.clone());
        for (doc, endpoint) in endpoints {
            let stub = endpoint_stub(doc, endpoint, settings, &mut file)?;
            file.push(stub);
        }
        Ok(Some(file))
    }
}
