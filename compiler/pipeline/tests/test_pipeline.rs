use std::fs;
use std::path::{Path, PathBuf};

use pipeline::{render, run, GenerationContext, PipelineError};

const ACCOUNT: &str = r#"{
    "api": "coinbasepro",
    "model": "account",
    "modelFields": [
        { "identifier": "id", "goType": "string", "required": true },
        { "identifier": "balance", "goType": "float64", "unmarshaler": "UnmarshalFloatString" }
    ],
    "endpoints": [
        { "path": "/accounts", "enumRoot": "accounts", "httpMethod": "GET", "rateLimit": 5, "slice": true },
        {
            "path": "/accounts/{account_id}/holds",
            "enumRoot": "account_holds",
            "httpMethod": "GET",
            "rateLimit": 5,
            "queryParams": [{ "identifier": "limit", "goType": "int" }]
        }
    ]
}"#;

const TYPES: &str = r#"{
    "api": "coinbasepro",
    "enums": [{ "identifier": "status", "values": [{ "identifier": "online" }, { "identifier": "offline" }] }]
}"#;

fn schema_root(dir: &Path) -> PathBuf {
    let root = dir.join("schema");
    fs::create_dir_all(root.join("coinbasepro")).expect("create api dir");
    fs::write(root.join("schema.json"), "{}").expect("write meta-schema");
    fs::write(root.join("coinbasepro/account.json"), ACCOUNT).expect("write account");
    fs::write(root.join("coinbasepro/types.json"), TYPES).expect("write types");
    root
}

fn context(schema: PathBuf, output: PathBuf, dry_run: bool) -> GenerationContext {
    GenerationContext::builder()
        .schema_dir(schema)
        .output_dir(output)
        .dry_run(dry_run)
        .build()
        .expect("context")
}

#[test]
fn test_run_writes_every_artifact() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let output = dir.path().join("web");
    let report = run(&context(schema_root(dir.path()), output.clone(), false)).expect("run");

    assert_eq!(report.namespaces, vec!["coinbasepro".to_string()]);
    assert!(!report.dry_run);
    for name in ["http.go", "models.go", "options.go", "path.go", "ratelimiter.go", "types.go"] {
        let path = output.join("coinbasepro").join(name);
        assert!(report.files.contains(&path), "{name}");
        let source = fs::read_to_string(&path).expect("read artifact");
        assert!(source.starts_with("package coinbasepro\n"), "{name}");
    }
}

#[test]
fn test_render_is_deterministic() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let ctx = context(schema_root(dir.path()), dir.path().join("web"), true);
    assert_eq!(render(&ctx).expect("first render"), render(&ctx).expect("second render"));
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let output = dir.path().join("web");
    let report = run(&context(schema_root(dir.path()), output.clone(), true)).expect("dry run");

    assert!(report.dry_run);
    assert!(report.files.contains(&PathBuf::from("coinbasepro/path.go")));
    assert!(!output.exists());
}

#[test]
fn test_invalid_document_leaves_output_untouched() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let schema = schema_root(dir.path());
    fs::write(
        schema.join("coinbasepro/order.json"),
        r#"{ "api": "coinbasepro", "model": "order", "modelFields": [{ "identifier": "id", "goType": "string" }], "endpoints": [{ "path": "/orders", "enumRoot": "orders", "httpMethod": "FETCH", "rateLimit": 5 }] }"#,
    )
    .expect("write invalid document");

    let output = dir.path().join("web");
    let err = run(&context(schema, output.clone(), false)).expect_err("invalid http method");
    assert!(matches!(err, PipelineError::Validation(_)), "{err:?}");
    assert!(!output.exists());
}

#[test]
fn test_name_collision_aborts() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let schema = schema_root(dir.path());
    fs::write(
        schema.join("coinbasepro/wallet.json"),
        r#"{ "api": "coinbasepro", "model": "wallet", "modelFields": [{ "identifier": "id", "goType": "string" }], "endpoints": [{ "path": "/wallets", "enumRoot": "accounts", "httpMethod": "GET", "rateLimit": 5 }] }"#,
    )
    .expect("write colliding document");

    let output = dir.path().join("web");
    let err = run(&context(schema, output.clone(), false)).expect_err("duplicate enum root");
    assert!(matches!(err, PipelineError::Validation(analysis::ValidationError::NameCollision(_))), "{err:?}");
    assert!(!output.exists());
}

#[test]
fn test_rerun_removes_artifacts_a_namespace_no_longer_needs() {
    let dir = tempfile::tempdir().expect("Failed to create temporary directory");
    let schema = schema_root(dir.path());
    let output = dir.path().join("web");
    let client = output.join("coinbasepro/client.go");
    fs::create_dir_all(output.join("coinbasepro")).expect("create api dir");
    fs::write(&client, "package coinbasepro\n\n// Client is written by hand.\ntype Client struct{}\n").expect("write client");
    run(&context(schema.clone(), output.clone(), false)).expect("first run");
    assert!(output.join("coinbasepro/ratelimiter.go").exists());

    fs::write(
        schema.join("coinbasepro/account.json"),
        r#"{ "api": "coinbasepro", "model": "account", "modelFields": [{ "identifier": "id", "goType": "string" }] }"#,
    )
    .expect("drop endpoints");
    let report = run(&context(schema, output.clone(), false)).expect("second run");

    for name in ["http.go", "options.go", "path.go", "ratelimiter.go"] {
        assert!(!output.join("coinbasepro").join(name).exists(), "{name} should be gone");
    }
    for name in ["models.go", "types.go"] {
        assert!(report.files.contains(&output.join("coinbasepro").join(name)), "{name}");
    }
    assert!(client.exists());
}
