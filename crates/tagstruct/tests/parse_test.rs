//! Masking and typed parsing of discriminated values.

mod fixtures;

use fixtures::{kind_schema, nested_schema};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use tagstruct::{
    collect_failures, mask, parse, validate_with, ParseError, ValidateOptions,
};

#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Event {
    A { c: f64 },
    B { d: String },
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum Outcome {
    Success,
    Failure { code: String },
}

#[test]
fn test_parse_into_tagged_enum() -> Result<(), Box<dyn std::error::Error>> {
    let event: Event = parse(&json!({ "kind": "a", "c": 1.5 }), &kind_schema())?;
    assert_eq!(event, Event::A { c: 1.5 });

    let event: Event = parse(&json!({ "kind": "b", "d": "x", "extra": 1 }), &kind_schema())?;
    assert_eq!(event, Event::B { d: "x".into() });
    Ok(())
}

#[test]
fn test_parse_reports_validation_failures() {
    let result: Result<Event, ParseError> = parse(&json!({ "kind": "c" }), &kind_schema());

    match result {
        Err(ParseError::Validation(err)) => assert_eq!(
            err.message(),
            "Expected 'kind' to be one of 'a', 'b', but received: 'c'"
        ),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_parse_reports_deserialize_failures() {
    // Valid for the schema, but `Outcome` has no `kind`-tagged shape.
    let result: Result<Event, ParseError> = parse(
        &json!({ "kind": "b", "status": "success" }),
        &nested_schema(),
    );

    assert!(matches!(result, Err(ParseError::Deserialize(_))));
}

#[test]
fn test_parse_nested_inner_value() -> Result<(), Box<dyn std::error::Error>> {
    let outcome: Outcome = parse(
        &json!({ "kind": "b", "status": "failure", "code": "E1" }),
        &nested_schema(),
    )?;
    assert_eq!(outcome, Outcome::Failure { code: "E1".into() });
    Ok(())
}

#[test]
fn test_mask_resolves_branch_before_stripping() -> Result<(), Box<dyn std::error::Error>> {
    let value = json!({ "kind": "a", "c": 1, "extra": true });

    let masked = mask(&value, &kind_schema())?;
    assert_eq!(masked, json!({ "kind": "a", "c": 1 }));
    Ok(())
}

#[test]
fn test_mask_keeps_open_branch_keys() -> Result<(), Box<dyn std::error::Error>> {
    let value = json!({ "kind": "b", "d": "x", "extra": true });

    assert_eq!(mask(&value, &kind_schema())?, value);
    Ok(())
}

#[test]
fn test_mask_still_reports_discriminant_errors() {
    let err = mask(&json!({ "c": 1 }), &kind_schema()).unwrap_err();
    assert_eq!(
        err.message(),
        r#"Expected an object with 'kind' property, but received: {"c":1}"#
    );
}

#[test]
fn test_custom_message_replaces_discriminator_message() {
    let options = ValidateOptions::new().with_message("not an event");
    let err = validate_with(&json!({ "kind": "z" }), &kind_schema(), &options).unwrap_err();

    assert_eq!(err.message(), "not an event");
    assert_eq!(
        err.failure().message,
        "Expected 'kind' to be one of 'a', 'b', but received: 'z'"
    );
}

#[test]
fn test_every_branch_failure_is_collected() {
    let failures = collect_failures(
        &json!({ "kind": "a", "c": "x", "y": 1 }),
        &kind_schema(),
        &ValidateOptions::default(),
    );

    let rendered: Vec<String> = failures.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "At path: c -- Expected a number, but received: \"x\"".to_string(),
            "At path: y -- Expected a value of type `never`, but received: `1`".to_string(),
        ]
    );
}
