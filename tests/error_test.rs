use std::io;

use labsmith::error::{Error, FieldError};

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::MissingRequiredVariable { keys: vec!["A".to_string(), "B".to_string()] };
    assert_eq!(err.to_string(), "Missing required variables: A, B.");

    let err = Error::PathEscape { path: "../x".to_string(), base: "/gen/p".to_string() };
    assert_eq!(err.to_string(), "Path '../x' escapes the project directory '/gen/p'.");
}

#[test]
fn test_validation_error_lists_every_field() {
    let err = Error::ValidationError(vec![
        FieldError::new("id", "is required"),
        FieldError::new("tags[1]", "expected a non-empty string"),
    ]);
    assert_eq!(
        err.to_string(),
        "Validation error: id: is required; tags[1]: expected a non-empty string."
    );
}

#[test]
fn test_field_error_serializes_as_object() {
    let value = serde_json::to_value(FieldError::new("name", "must not be empty")).unwrap();
    assert_eq!(value, serde_json::json!({"path": "name", "message": "must not be empty"}));
}
