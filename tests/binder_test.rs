mod common;

use labsmith::binder::{
    effective_context, missing_required, overrides_from_json, parse_overrides, redact,
};
use labsmith::constants::REDACTION_MARKER;
use labsmith::error::Error;
use serde_json::json;

#[test]
fn test_effective_context_prefers_non_empty_overrides() {
    let recipe = common::recipe(vec![
        common::variable("TAG", "latest", false),
        common::variable("PORT", "5432", false),
        common::variable("USER", "admin", false),
    ]);
    let overrides = common::context(&[("TAG", "16"), ("PORT", ""), ("UNKNOWN", "x")]);

    let context = effective_context(&recipe, &overrides);
    assert_eq!(context, common::context(&[("TAG", "16"), ("PORT", "5432"), ("USER", "admin")]));
}

#[test]
fn test_missing_required() {
    let recipe = common::recipe(vec![common::variable("DB_PASS", "", true)]);

    assert_eq!(missing_required(&recipe, &common::context(&[])), vec!["DB_PASS"]);
    assert_eq!(missing_required(&recipe, &common::context(&[("DB_PASS", "")])), vec!["DB_PASS"]);
    assert!(missing_required(&recipe, &common::context(&[("DB_PASS", "x")])).is_empty());
}

#[test]
fn test_missing_required_keeps_declaration_order() {
    let recipe = common::recipe(vec![
        common::variable("B", "", true),
        common::variable("OPTIONAL", "", false),
        common::variable("WITH_DEFAULT", "value", true),
        common::variable("A", "", true),
    ]);

    assert_eq!(missing_required(&recipe, &common::context(&[])), vec!["B", "A"]);
}

#[test]
fn test_redact_secret_from_any_source() {
    let mut secret = common::variable("DB_PASS", "s3cr3t", true);
    secret.secret = true;
    let recipe = common::recipe(vec![secret, common::variable("TAG", "latest", false)]);

    let from_default = redact(&recipe, &common::context(&[]));
    assert_eq!(from_default["DB_PASS"], REDACTION_MARKER);
    assert_eq!(from_default["TAG"], "latest");

    let from_override = redact(&recipe, &common::context(&[("DB_PASS", "s3cr3t")]));
    assert_eq!(from_override["DB_PASS"], REDACTION_MARKER);
    assert!(!from_override.values().any(|v| v == "s3cr3t"));

    // the render context keeps the real value
    assert_eq!(effective_context(&recipe, &common::context(&[]))["DB_PASS"], "s3cr3t");
}

#[test]
fn test_parse_overrides() {
    let overrides = parse_overrides(["TAG=16", "URL=postgres://u:p@h/db?x=1", "EMPTY="]).unwrap();
    assert_eq!(
        overrides,
        common::context(&[("TAG", "16"), ("URL", "postgres://u:p@h/db?x=1"), ("EMPTY", "")])
    );

    assert!(matches!(parse_overrides(["NOVALUE"]), Err(Error::ConfigError(_))));
    assert!(matches!(parse_overrides(["=value"]), Err(Error::ConfigError(_))));
}

#[test]
fn test_overrides_from_json() {
    let overrides =
        overrides_from_json(&json!({"TAG": "16", "PORT": 5432, "DEBUG": true, "SKIP": null}))
            .unwrap();
    assert_eq!(overrides, common::context(&[("TAG", "16"), ("PORT", "5432"), ("DEBUG", "true")]));

    assert!(overrides_from_json(&json!(null)).unwrap().is_empty());
    assert!(overrides_from_json(&json!(["TAG"])).is_err());
    assert!(overrides_from_json(&json!({"TAG": ["x"]})).is_err());
}
