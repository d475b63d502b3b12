//! `ratelimiter.go`: one lazily created token bucket per endpoint.

use ir::Namespace;

use crate::generators::{doc_comment, uint8_enumeration};
use crate::go_ast::{call, ident, GoDecl, GoExpr, GoFile, GoFunc, GoParam, GoStmt, GoValueSpec};
use crate::{ArtifactGenerator, GoSettings, Result};

const LIMITER_TYPE: &str = "ratelimiter";
const TABLE: &str = "ratelimiters";
const TABLE_MUTEX: &str = "ratelimitersMu";

const ACCESSOR_DOC: &str = "getRateLimiter will load the rate limiter for a specific request, lazy loaded.";
const UNSYNCHRONIZED_DOC: &str =
    "The table is filled without locking, so the first concurrent requests for one limiter may each create one.";

fn accessor(synchronized: bool, width: usize) -> GoDecl {
    let slot = || ident(TABLE).index(ident("rl"));
    let limiter = call(
        "rate.NewLimiter",
        vec![
            call("rate.Every", vec![GoExpr::Binary(Box::new(GoExpr::Int(1)), "*", Box::new(ident("time.Second")))]),
            ident("b"),
        ],
    );

    let mut body = Vec::new();
    if synchronized {
        body.push(GoStmt::Expr(ident(TABLE_MUTEX).field("Lock").call(Vec::new())));
        body.push(GoStmt::Defer(ident(TABLE_MUTEX).field("Unlock").call(Vec::new())));
    }
    body.push(GoStmt::If {
        init: None,
        cond: GoExpr::is_nil(slot()),
        body: vec![GoStmt::Assign { target: slot(), value: limiter }],
    });
    body.push(GoStmt::Return(vec![slot()]));

    let doc = if synchronized {
        ACCESSOR_DOC.to_string()
    } else {
        format!("{ACCESSOR_DOC} {UNSYNCHRONIZED_DOC}")
    };
    GoDecl::Func(
        GoFunc::new("getRateLimiter")
            .doc(doc_comment::line_comment(Some(&doc), width))
            .param("rl", LIMITER_TYPE)
            .param("b", "int")
            .result(GoParam::unnamed("*rate.Limiter"))
            .body(body),
    )
}

/// Generates the limiter table of a namespace.
pub struct RatelimiterGenerator;

impl ArtifactGenerator for RatelimiterGenerator {
    fn file_name(&self) -> &'static str { "ratelimiter.go" }

    fn generate(&self, namespace: &Namespace, settings: &GoSettings) -> Result<Option<GoFile>> {
        let names: Vec<String> = namespace.ratelimiters().into_iter().map(|b| b.const_name).collect();
        if names.is_empty() {
            return Ok(None);
        }

        let mut file = GoFile::new(&namespace.api);
        file.import("time");
        file.import(settings.imports.rate.clone());
        if settings.synchronized_ratelimiters {
            file.import("sync");
        }

        let capacity = names.len() + 1;
        file.decls.extend(uint8_enumeration(LIMITER_TYPE, names.clone())?);

        let mut vars = Vec::new();
        if settings.synchronized_ratelimiters {
            vars.push(GoValueSpec::declared(TABLE_MUTEX, "sync.Mutex"));
        }
        vars.push(GoValueSpec::value(TABLE, ident(format!("[uint8({capacity})]*rate.Limiter{{}}"))));
        file.push(GoDecl::Var(vars));

        file.push(GoDecl::Func(
            GoFunc::new("init").body(
                names
                    .iter()
                    .map(|name| GoStmt::Assign { target: ident(TABLE).index(ident(name)), value: ident("nil") })
                    .collect(),
            ),
        ));
        file.push(accessor(settings.synchronized_ratelimiters, settings.comment_width));

        Ok(Some(file))
    }
}
