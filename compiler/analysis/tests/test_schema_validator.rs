use std::path::Path;

use metagen_analysis::{SchemaValidator, ValidationError};
use serde_json::json;

fn account() -> serde_json::Value {
    json!({
        "api": "coinbasepro",
        "model": "account",
        "modelFields": [
            { "identifier": "id", "goType": "string", "required": true },
            { "identifier": "created_at", "goType": "time.Time", "datetimeLayout": "time.RFC3339" }
        ],
        "endpoints": [
            {
                "path": "/accounts/{account_id}",
                "enumRoot": "account",
                "httpMethod": "GET",
                "rateLimit": 5
            }
        ]
    })
}

fn messages(err: ValidationError) -> Vec<String> {
    match err {
        ValidationError::Schema { messages, .. } => messages,
        other => panic!("Expected Schema error, got {:?}", other),
    }
}

#[test]
fn accepts_a_valid_document() {
    let doc = SchemaValidator::new()
        .validate_document(Path::new("coinbasepro/account.json"), account())
        .expect("valid document");
    assert_eq!(doc.model, "account");
    assert_eq!(doc.endpoints.len(), 1);
}

#[test]
fn rejects_unknown_keys() {
    let mut value = account();
    value["modelField"] = json!([]);
    let err = SchemaValidator::new()
        .validate_document(Path::new("account.json"), value)
        .expect_err("unknown key");
    assert!(messages(err)[0].contains("modelField"));
}

#[test]
fn reports_every_semantic_violation() {
    let value = json!({
        "api": "coinbasepro",
        "model": "account",
        "nonStruct": "string",
        "modelFields": [{ "identifier": "id", "goType": "map[string]int" }],
        "endpoints": [
            { "path": "/accounts/{account id}", "enumRoot": "", "httpMethod": "TRACE", "rateLimit": 1 }
        ]
    });
    let err = SchemaValidator::new()
        .validate_document(Path::new("account.json"), value)
        .expect_err("invalid document");
    let messages = messages(err);

    assert_eq!(messages.len(), 5, "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("nonStruct")));
    assert!(messages.iter().any(|m| m.contains("map[string]int")));
    assert!(messages.iter().any(|m| m.contains("empty `enumRoot`")));
    assert!(messages.iter().any(|m| m.contains("TRACE")));
    assert!(messages.iter().any(|m| m.contains("account id")));
}

#[test]
fn models_need_fields_or_an_alias() {
    let validator = SchemaValidator::new();
    let mut value = account();
    value["modelFields"] = json!([]);
    let err = validator.validate_document(Path::new("account.json"), value.clone()).expect_err("empty struct");
    assert_eq!(messages(err), vec!["model `account` declares neither `modelFields` nor `nonStruct`".to_string()]);

    let mut alias = value.clone();
    alias["nonStruct"] = json!("string");
    validator.validate_document(Path::new("account.json"), alias).expect("alias without fields");

    let mut custom = value;
    custom["customUnmarshaler"] = json!("func (a *Account) UnmarshalJSON(d []byte) error { return nil }");
    validator.validate_document(Path::new("account.json"), custom).expect("hand-written decoder");
}

#[test]
fn model_only_documents_have_no_endpoints() {
    let mut value = account();
    value["modelOnly"] = json!(true);
    let err = SchemaValidator::new()
        .validate_document(Path::new("account.json"), value)
        .expect_err("modelOnly with endpoints");
    assert!(messages(err)[0].contains("modelOnly"));
}

#[test]
fn validates_types_documents() {
    let validator = SchemaValidator::new();
    let good = json!({
        "api": "coinbasepro",
        "enums": [{ "identifier": "status", "pluralize": "statuses", "values": [{ "identifier": "open" }] }]
    });
    let types = validator.validate_types(Path::new("types.json"), good).expect("valid types");
    assert_eq!(types.enums.len(), 1);

    let bad = json!({ "api": "coinbasepro", "enums": [{ "identifier": "status", "values": [] }] });
    let err = validator.validate_types(Path::new("types.json"), bad).expect_err("no values");
    assert!(messages(err)[0].contains("declares no values"));
}
