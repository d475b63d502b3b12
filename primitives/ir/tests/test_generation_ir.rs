//! Integration tests for schema loading and IR assembly.

use std::fs;

use metagen_ir::*;
use naming::Inflector;

const ACCOUNT: &str = r#"{
    "api": "coinbasepro",
    "model": "account",
    "modelDescription": "Account holds data for trading account from the profile of the API key",
    "modelFields": [
        { "identifier": "id", "goType": "string", "required": true },
        { "identifier": "balance", "goType": "string" },
        { "identifier": "trading_enabled", "goType": "bool" }
    ],
    "endpoints": [
        {
            "path": "/accounts/{account_id}",
            "enumRoot": "account",
            "httpMethod": "GET",
            "rateLimit": 5
        },
        {
            "path": "/accounts",
            "enumRoot": "accounts",
            "httpMethod": "GET",
            "slice": true,
            "rateLimit": 5
        }
    ]
}"#;

const TYPES: &str = r#"{
    "api": "coinbasepro",
    "enums": [
        {
            "identifier": "status",
            "pluralize": true,
            "values": [{ "identifier": "open" }, { "identifier": "done" }]
        }
    ]
}"#;

fn raw_account() -> RawSchemaDocument { serde_json::from_str(ACCOUNT).expect("account document") }

#[test]
fn loads_documents_from_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("account.json");
    fs::write(&path, ACCOUNT).expect("write schema");

    let doc = RawSchemaDocument::from_file(&path).expect("load document");
    assert_eq!(doc.api, "coinbasepro");
    assert_eq!(doc.model_fields.len(), 3);
    assert!(doc.endpoints[1].slice);

    let path = dir.path().join("types.json");
    fs::write(&path, TYPES).expect("write types");
    let types = RawTypesDocument::from_file(&path).expect("load types");
    assert_eq!(types.enums[0].pluralize, Some(PluralDecl::Derived(true)));
}

#[test]
fn unknown_keys_are_rejected() {
    let bad = ACCOUNT.replacen("\"modelFields\"", "\"modelField\"", 1);
    assert!(serde_json::from_str::<RawSchemaDocument>(&bad).is_err());
}

#[test]
fn negative_rate_limits_are_rejected() {
    let bad = ACCOUNT.replacen("\"rateLimit\": 5", "\"rateLimit\": -1", 1);
    assert!(serde_json::from_str::<RawSchemaDocument>(&bad).is_err());
}

#[test]
fn builds_sorted_namespaces() {
    let inflector = Inflector::default();
    let builder = IrBuilder::new(&inflector);
    let types: RawTypesDocument = serde_json::from_str(TYPES).expect("types document");
    let ir = builder.build(&[raw_account()], &[types]).expect("build");

    assert_eq!(ir.len(), 1);
    let ns = ir.namespace("coinbasepro").expect("namespace");
    assert_eq!(ns.documents[0].model_name, "Account");

    let members: Vec<&str> =
        ns.documents[0].sorted_fields().iter().map(|f| f.member_name.as_str()).collect();
    assert_eq!(members, vec!["Balance", "ID", "TradingEnabled"]);

    let roots: Vec<&str> = ns.endpoints().iter().map(|(_, ep)| ep.enum_root.as_str()).collect();
    assert_eq!(roots, vec!["account", "accounts"]);

    let limiters: Vec<String> = ns.ratelimiters().into_iter().map(|rl| rl.const_name).collect();
    assert_eq!(limiters, vec!["AccountRatelimiter", "AccountsRatelimiter"]);

    let status = &ns.enums[0];
    assert_eq!(status.plural.as_ref().map(|p| p.type_name.as_str()), Some("Statuses"));
    let values: Vec<&str> = status.values.iter().map(|v| v.const_name.as_str()).collect();
    assert_eq!(values, vec!["StatusDone", "StatusOpen"]);
}

#[test]
fn input_order_does_not_change_the_ir() {
    let inflector = Inflector::default();
    let builder = IrBuilder::new(&inflector);

    let mut product = raw_account();
    product.model = "product".to_string();
    product.endpoints.clear();
    let mut other_api = raw_account();
    other_api.api = "kraken".to_string();

    let forward =
        builder.build(&[raw_account(), product.clone(), other_api.clone()], &[]).expect("build");
    let backward = builder.build(&[other_api, product, raw_account()], &[]).expect("build");
    assert_eq!(forward, backward);

    let apis: Vec<&str> = forward.namespaces().map(|ns| ns.api.as_str()).collect();
    assert_eq!(apis, vec!["coinbasepro", "kraken"]);
}
