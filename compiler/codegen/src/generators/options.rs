//! `options.go`: request option structs, fluent setters and the body/query encoders.

use ir::{Endpoint, Field, Namespace};
use types::GoType;

use crate::generators::{doc_comment, import_type, member_order, struct_member};
use crate::go_ast::{call, ident, string, GoDecl, GoExpr, GoFile, GoFunc, GoParam, GoStmt};
use crate::{ArtifactGenerator, GoSettings, Result};

const RECEIVER: &str = "opts";

/// Everything emitted for the options of one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointOptions {
    /// Name of the options struct.
    pub owner: String,
    /// The options struct.
    pub options: GoDecl,
    /// One setter per field, in declaration order.
    pub setters: Vec<GoDecl>,
    /// `EncodeBody`.
    pub body_encoder: GoDecl,
    /// `EncodeQuery`.
    pub query_encoder: GoDecl,
}

/// Build the options emission of `endpoint`.
///
/// An endpoint without fields yields an empty struct and no-op encoders.
pub fn endpoint_options(endpoint: &Endpoint, settings: &GoSettings) -> EndpointOptions {
    let owner = endpoint.options_type();
    let width = settings.comment_width;

    let fields = member_order(endpoint.params())
        .into_iter()
        .map(|f| struct_member(f, f.go_type.optional_rendering(f.required), width))
        .collect();
    let options = GoDecl::Struct {
        doc: doc_comment::line_comment(Some(&format!("{owner} are options for API requests.")), width),
        name: owner.clone(),
        fields,
    };

    EndpointOptions {
        setters: endpoint.params().map(|f| setter(&owner, f, width)).collect(),
        body_encoder: body_encoder(&owner, &endpoint.body),
        query_encoder: query_encoder(&owner, &endpoint.query_params),
        options,
        owner,
    }
}

fn setter(owner: &str, field: &Field, width: usize) -> GoDecl {
    let name = format!("Set{}", field.member_name);
    let mut comment = format!("{name} sets the {} field on {owner}.", field.member_name);
    if let Some(description) = &field.description {
        comment.push(' ');
        comment.push_str(description);
    }

    let param_ty = match &field.go_type {
        GoType::List { .. } if !field.required => field.go_type.optional_rendering(false),
        ty => ty.value_rendering(),
    };
    let value = if !field.required && !field.go_type.is_list() {
        ident(&field.variable_name).addr()
    } else {
        ident(&field.variable_name)
    };

    GoDecl::Func(
        GoFunc::new(name)
            .doc(doc_comment::line_comment(Some(&comment), width))
            .receiver(RECEIVER, format!("*{owner}"))
            .param(&field.variable_name, param_ty)
            .result(GoParam::unnamed(format!("*{owner}")))
            .body(vec![
                GoStmt::Assign { target: ident(RECEIVER).field(&field.member_name), value },
                GoStmt::Return(vec![ident(RECEIVER)]),
            ]),
    )
}

fn body_encoder(owner: &str, body: &[Field]) -> GoDecl {
    let func = GoFunc::new("EncodeBody")
        .receiver(RECEIVER, format!("*{owner}"))
        .result(GoParam::new("buf", "io.Reader"))
        .result(GoParam::new("err", "error"));
    if body.is_empty() {
        return GoDecl::Func(func.body(vec![GoStmt::bare_return()]));
    }

    let mut fill = vec![GoStmt::Define {
        names: vec!["body".into()],
        values: vec![call("make", vec![ident("map[string]interface{}")])],
    }];
    fill.extend(body.iter().map(|f| {
        GoStmt::Expr(call(
            "internal.HTTPBodyFragment",
            vec![ident("body"), string(&f.identifier), ident(RECEIVER).field(&f.member_name)],
        ))
    }));
    fill.extend([
        GoStmt::Define {
            names: vec!["raw".into(), "err".into()],
            values: vec![call("json.Marshal", vec![ident("body")])],
        },
        GoStmt::If {
            init: None,
            cond: GoExpr::not_nil(ident("err")),
            body: vec![GoStmt::Return(vec![ident("nil"), ident("err")])],
        },
        GoStmt::Assign { target: ident("buf"), value: call("bytes.NewBuffer", vec![ident("raw")]) },
    ]);

    GoDecl::Func(func.body(vec![
        GoStmt::If { init: None, cond: GoExpr::not_nil(ident(RECEIVER)), body: fill },
        GoStmt::bare_return(),
    ]))
}

fn query_encoder(owner: &str, query: &[Field]) -> GoDecl {
    let func = GoFunc::new("EncodeQuery")
        .receiver(RECEIVER, format!("*{owner}"))
        .param("req", "*http.Request");
    if query.is_empty() {
        return GoDecl::Func(func.body(vec![GoStmt::bare_return()]));
    }

    let encode = query
        .iter()
        .map(|f| {
            let member = ident(RECEIVER).field(&f.member_name);
            let member = if f.required && !f.go_type.is_list() { member.addr() } else { member };
            let routine = format!("internal.{}", f.go_type.query_routine());
            GoStmt::Expr(call(routine, vec![ident("req"), string(&f.identifier), member]))
        })
        .collect();

    GoDecl::Func(func.body(vec![
        GoStmt::If { init: None, cond: GoExpr::not_nil(ident(RECEIVER)), body: encode },
        GoStmt::bare_return(),
    ]))
}

/// Generates option types for every endpoint that takes parameters.
pub struct OptionsGenerator;

impl ArtifactGenerator for OptionsGenerator {
    fn file_name(&self) -> &'static str { "options.go" }

    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>> {
        let endpoints: Vec<&Endpoint> =
            namespace.endpoints().into_iter().map(|(_, ep)| ep).filter(|ep| ep.has_params()).collect();
        if endpoints.is_empty() {
            return Ok(None);
        }

        let mut file = GoFile::new(&namespace.api);
        file.import("io");
        file.import("net/http");
        file.import(settings.imports.internal.clone());
        for ep in &endpoints {
            if !ep.body.is_empty() {
                file.import("bytes");
                file.import("encoding/json");
            }
            for field in ep.params() {
                import_type(&field.go_type, &settings.imports, &mut file);
            }
        }

        let mut emissions: Vec<EndpointOptions> =
            endpoints.iter().map(|ep| endpoint_options(ep, settings)).collect();
        emissions.sort_by(|a, b| a.owner.cmp(&b.owner));

        // No-op encoders lead, then setters and the encoders that do work.
        let (noop_body, body): (Vec<_>, Vec<_>) =
            emissions.iter().partition(|e| !has_fields(&e.body_encoder));
        let (noop_query, query): (Vec<_>, Vec<_>) =
            emissions.iter().partition(|e| !has_fields(&e.query_encoder));

        file.decls.extend(emissions.iter().map(|e| e.options.clone()));
        file.decls.extend(noop_body.iter().map(|e| e.body_encoder.clone()));
        file.decls.extend(noop_query.iter().map(|e| e.query_encoder.clone()));
        file.decls.extend(emissions.iter().flat_map(|e| e.setters.iter().cloned()));
        file.decls.extend(body.iter().map(|e| e.body_encoder.clone()));
        file.decls.extend(query.iter().map(|e| e.query_encoder.clone()));

        Ok(Some(file))
    }
}

fn has_fields(encoder: &GoDecl) -> bool {
    matches!(encoder, GoDecl::Func(func) if func.body.len() > 1)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::emit::Emit;
    use crate::generators::testing::namespace;

    fn orders() -> Namespace {
        namespace(
            &[json!({
                "api": "coinbasepro",
                "model": "order",
                "modelFields": [{ "identifier": "id", "goType": "string" }],
                "endpoints": [
                    {
                        "path": "/orders",
                        "enumRoot": "create_order",
                        "httpMethod": "POST",
                        "rateLimit": 5,
                        "body": [
                            { "identifier": "type", "goType": "OrderType" },
                            { "identifier": "product_id", "goType": "string", "required": true },
                            { "identifier": "price", "goType": "float64", "description": "Price per unit." }
                        ]
                    },
                    {
                        "path": "/orders",
                        "enumRoot": "orders",
                        "httpMethod": "GET",
                        "rateLimit": 5,
                        "queryParams": [
                            { "identifier": "status", "goType": "[]string" },
                            { "identifier": "product_id", "goType": "string", "required": true },
                            { "identifier": "limit", "goType": "int" },
                            { "identifier": "fills", "goType": "[]Fill" }
                        ]
                    },
                    { "path": "/orders/{order_id}", "enumRoot": "order", "httpMethod": "GET", "rateLimit": 5 }
                ]
            })],
            &[],
        )
    }

    fn endpoint<'a>(ns: &'a Namespace, root: &str) -> &'a Endpoint {
        ns.endpoints().into_iter().map(|(_, ep)| ep).find(|ep| ep.enum_root == root).expect("endpoint")
    }

    #[test]
    fn test_required_and_optional_renderings() {
        let ns = orders();
        let out = endpoint_options(endpoint(&ns, "createOrder"), &GoSettings::default()).options.emit();
        assert_eq!(
            out,
            "// CreateOrderOptions are options for API requests.\ntype CreateOrderOptions struct {\n\t// Price per unit.\n\tPrice *float64 `bson:\"price\" json:\"price\" sql:\"price\"`\n\tProductID string `bson:\"product_id\" json:\"product_id\" sql:\"product_id\"`\n\tType *OrderType `bson:\"type\" json:\"type\" sql:\"type\"`\n}\n"
        );
    }

    #[test]
    fn test_setters() {
        let ns = orders();
        let emission = endpoint_options(endpoint(&ns, "createOrder"), &GoSettings::default());
        let setters: Vec<String> = emission.setters.iter().map(Emit::emit).collect();

        assert_eq!(
            setters[0],
            "// SetType sets the Type field on CreateOrderOptions.\nfunc (opts *CreateOrderOptions) SetType(typ OrderType) *CreateOrderOptions {\n\topts.Type = &typ\n\treturn opts\n}\n"
        );
        assert!(setters[1].contains("SetProductID(productID string) *CreateOrderOptions {\n\topts.ProductID = productID\n"));
        assert!(setters[2].starts_with("// SetPrice sets the Price field on CreateOrderOptions. Price per unit.\n"));

        let ns_orders = endpoint_options(endpoint(&ns, "orders"), &GoSettings::default());
        let fills = ns_orders.setters[3].emit();
        assert!(fills.contains("SetFills(fills []*Fill) *OrdersOptions {\n\topts.Fills = fills\n"), "{fills}");
        let status = ns_orders.setters[0].emit();
        assert!(status.contains("SetStatus(status []string) *OrdersOptions {\n\topts.Status = status\n"));
    }

    #[test]
    fn test_encoders() {
        let ns = orders();
        let create = endpoint_options(endpoint(&ns, "createOrder"), &GoSettings::default());
        assert_eq!(
            create.body_encoder.emit(),
            "func (opts *CreateOrderOptions) EncodeBody() (buf io.Reader, err error) {\n\tif opts != nil {\n\t\tbody := make(map[string]interface{})\n\t\tinternal.HTTPBodyFragment(body, \"type\", opts.Type)\n\t\tinternal.HTTPBodyFragment(body, \"product_id\", opts.ProductID)\n\t\tinternal.HTTPBodyFragment(body, \"price\", opts.Price)\n\t\traw, err := json.Marshal(body)\n\t\tif err != nil {\n\t\t\treturn nil, err\n\t\t}\n\t\tbuf = bytes.NewBuffer(raw)\n\t}\n\treturn\n}\n"
        );
        assert_eq!(
            create.query_encoder.emit(),
            "func (opts *CreateOrderOptions) EncodeQuery(req *http.Request) {\n\treturn\n}\n"
        );

        let list = endpoint_options(endpoint(&ns, "orders"), &GoSettings::default());
        let query = list.query_encoder.emit();
        assert!(query.contains("\t\tinternal.HTTPQueryEncodeStrings(req, \"status\", opts.Status)\n"));
        assert!(query.contains("\t\tinternal.HTTPQueryEncodeString(req, \"product_id\", &opts.ProductID)\n"));
        assert!(query.contains("\t\tinternal.HTTPQueryEncodeInt(req, \"limit\", opts.Limit)\n"));
        assert!(query.contains("\t\tinternal.HTTPQueryEncodeStringer(req, \"fills\", opts.Fills)\n"));
    }

    #[test]
    fn test_empty_options_are_degenerate() {
        let ns = orders();
        let emission = endpoint_options(endpoint(&ns, "order"), &GoSettings::default());
        assert!(matches!(&emission.options, GoDecl::Struct { fields, .. } if fields.is_empty()));
        assert!(emission.setters.is_empty());
        assert!(!has_fields(&emission.body_encoder));
        assert!(!has_fields(&emission.query_encoder));
        assert_eq!(
            emission.body_encoder.emit(),
            "func (opts *OrderOptions) EncodeBody() (buf io.Reader, err error) {\n\treturn\n}\n"
        );
    }

    #[test]
    fn test_namespace_file() {
        let ns = orders();
        let out = OptionsGenerator.generate(&ns, &GoSettings::default()).expect("generate").expect("file").emit();

        assert!(!out.contains("OrderOptions struct"));
        assert!(out.contains("import (\n\t\"bytes\"\n\t\"encoding/json\"\n\t\"io\"\n\t\"net/http\"\n\n\t\"github.com/alpine-hodler/web/internal\"\n)\n"));

        let create_struct = out.find("type CreateOrderOptions struct").expect("create struct");
        let orders_struct = out.find("type OrdersOptions struct").expect("orders struct");
        let noop_query = out.find("func (opts *CreateOrderOptions) EncodeQuery").expect("noop query");
        let setter = out.find("func (opts *CreateOrderOptions) SetType").expect("setter");
        let orders_setter = out.find("func (opts *OrdersOptions) SetStatus").expect("orders setter");
        let body = out.find("func (opts *CreateOrderOptions) EncodeBody").expect("body");
        assert!(create_struct < orders_struct);
        assert!(orders_struct < noop_query);
        assert!(noop_query < setter);
        assert!(setter < orders_setter);
        assert!(orders_setter < body);
    }

    #[test]
    fn test_no_params_no_file() {
        let ns = namespace(
            &[json!({
                "api": "coinbasepro",
                "model": "order",
                "endpoints": [{ "path": "/orders", "enumRoot": "orders", "httpMethod": "GET", "rateLimit": 5 }]
            })],
            &[],
        );
        assert!(OptionsGenerator.generate(&ns, &GoSettings::default()).expect("generate").is_none());
    }
}
