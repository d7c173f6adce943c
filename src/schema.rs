//! Recipe schema validation.
//! Rules are declared as tables of field rules and applied to the raw parsed
//! document, so every failing field is reported instead of only the first one.

use crate::constants::{RECIPE_ID_PATTERN, VARIABLE_KEY_PATTERN};
use crate::error::{Error, FieldError, Result};
use crate::recipe::{Difficulty, Recipe};
use log::debug;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::LazyLock;

static RECIPE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RECIPE_ID_PATTERN).expect("recipe id pattern is valid"));
static VARIABLE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(VARIABLE_KEY_PATTERN).expect("variable key pattern is valid"));

pub fn is_valid_recipe_id(id: &str) -> bool {
    RECIPE_ID.is_match(id)
}

pub fn is_valid_variable_key(key: &str) -> bool {
    VARIABLE_KEY.is_match(key)
}

enum Rule {
    /// A string; `allow_empty` decides whether `""` passes.
    Text { allow_empty: bool },
    /// A non-empty string accepted by `matches`.
    Token { matches: fn(&str) -> bool, hint: &'static str },
    Flag,
    /// A list of non-empty strings.
    Labels,
    Choice(&'static [&'static str]),
}

struct FieldRule {
    name: &'static str,
    rule: Rule,
    optional: bool,
}

const fn required(name: &'static str, rule: Rule) -> FieldRule {
    FieldRule { name, rule, optional: false }
}

const fn optional(name: &'static str, rule: Rule) -> FieldRule {
    FieldRule { name, rule, optional: true }
}

const NON_EMPTY: Rule = Rule::Text { allow_empty: false };
const ANY_TEXT: Rule = Rule::Text { allow_empty: true };

const RECIPE_RULES: &[FieldRule] = &[
    required(
        "id",
        Rule::Token {
            matches: is_valid_recipe_id,
            hint: "must be lowercase letters and digits separated by single hyphens",
        },
    ),
    required("name", NON_EMPTY),
    required("description", NON_EMPTY),
    required("tags", Rule::Labels),
    required("difficulty", Rule::Choice(&Difficulty::ALL)),
    required("composeTemplate", NON_EMPTY),
    required("envTemplate", NON_EMPTY),
    required("readmeTemplate", NON_EMPTY),
];

const VARIABLE_RULES: &[FieldRule] = &[
    required(
        "key",
        Rule::Token {
            matches: is_valid_variable_key,
            hint: "must be uppercase letters, digits and underscores, starting with a letter",
        },
    ),
    required("label", NON_EMPTY),
    required("default", ANY_TEXT),
    required("required", Rule::Flag),
    optional("options", Rule::Labels),
    optional("secret", Rule::Flag),
    optional("description", ANY_TEXT),
];

const FILE_RULES: &[FieldRule] = &[required("path", NON_EMPTY), required("content", ANY_TEXT)];

fn field_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn check_rule(path: &str, value: &Value, rule: &Rule, errors: &mut Vec<FieldError>) {
    match rule {
        Rule::Text { allow_empty } => match value.as_str() {
            None => errors.push(FieldError::new(path, "expected a string")),
            Some("") if !allow_empty => errors.push(FieldError::new(path, "must not be empty")),
            Some(_) => {}
        },
        Rule::Token { matches, hint } => match value.as_str() {
            None => errors.push(FieldError::new(path, "expected a string")),
            Some("") => errors.push(FieldError::new(path, "must not be empty")),
            Some(s) if !matches(s) => errors.push(FieldError::new(path, *hint)),
            Some(_) => {}
        },
        Rule::Flag => {
            if !value.is_boolean() {
                errors.push(FieldError::new(path, "expected a boolean"));
            }
        }
        Rule::Labels => match value.as_array() {
            None => errors.push(FieldError::new(path, "expected a list")),
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.as_str().is_some_and(|s| !s.is_empty()) {
                        errors.push(FieldError::new(
                            format!("{path}[{i}]"),
                            "expected a non-empty string",
                        ));
                    }
                }
            }
        },
        Rule::Choice(allowed) => {
            if !value.as_str().is_some_and(|s| allowed.contains(&s)) {
                errors.push(FieldError::new(
                    path,
                    format!("expected one of: {}", allowed.join(", ")),
                ));
            }
        }
    }
}

fn check_fields(
    object: &Map<String, Value>,
    prefix: &str,
    rules: &[FieldRule],
    errors: &mut Vec<FieldError>,
) {
    for field in rules {
        let path = field_path(prefix, field.name);
        match object.get(field.name) {
            None | Some(Value::Null) if field.optional => {}
            None | Some(Value::Null) => errors.push(FieldError::new(path, "is required")),
            Some(value) => check_rule(&path, value, &field.rule, errors),
        }
    }
}

/// Applies `rules` to every mapping of the list stored under `name`.
/// Returns the mappings that were checked so callers can add cross-item rules.
fn check_list<'a>(
    object: &'a Map<String, Value>,
    name: &str,
    is_optional: bool,
    rules: &[FieldRule],
    errors: &mut Vec<FieldError>,
) -> Vec<(String, &'a Map<String, Value>)> {
    let mut checked = Vec::new();
    let items = match object.get(name) {
        None | Some(Value::Null) if is_optional => return checked,
        None | Some(Value::Null) => {
            errors.push(FieldError::new(name, "is required"));
            return checked;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(FieldError::new(name, "expected a list"));
            return checked;
        }
    };

    for (i, item) in items.iter().enumerate() {
        let prefix = format!("{name}[{i}]");
        match item.as_object() {
            Some(entry) => {
                check_fields(entry, &prefix, rules, errors);
                checked.push((prefix, entry));
            }
            None => errors.push(FieldError::new(prefix, "expected a mapping")),
        }
    }
    checked
}

/// Runs every schema rule against `document` and returns all violations in
/// document order. An empty list means the document is a valid recipe.
pub fn check_document(document: &Value) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let Some(object) = document.as_object() else {
        errors.push(FieldError::new("", "expected a mapping"));
        return errors;
    };

    check_fields(object, "", RECIPE_RULES, &mut errors);

    let variables = check_list(object, "variables", false, VARIABLE_RULES, &mut errors);
    let mut seen = HashSet::new();
    for (prefix, variable) in variables {
        if let Some(key) = variable.get("key").and_then(Value::as_str) {
            if !seen.insert(key) {
                errors.push(FieldError::new(field_path(&prefix, "key"), "duplicate key"));
            }
        }
    }

    check_list(object, "seedFiles", true, FILE_RULES, &mut errors);
    check_list(object, "extraFiles", true, FILE_RULES, &mut errors);

    errors
}

/// Validates a parsed document and converts it into a typed [`Recipe`].
///
/// # Errors
/// * `Error::ValidationError` carrying every field violation
pub fn validate(document: &Value) -> Result<Recipe> {
    let errors = check_document(document);
    if !errors.is_empty() {
        debug!("Recipe document rejected with {} error(s)", errors.len());
        return Err(Error::ValidationError(errors));
    }

    serde_json::from_value(document.clone())
        .map_err(|e| Error::ValidationError(vec![FieldError::new("", e.to_string())]))
}

/// Parses raw recipe text, trying JSON first and then YAML.
pub fn parse_document(content: &str) -> Result<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_yaml::from_str(content)?),
    }
}

/// Serializes a recipe to its YAML source form.
pub fn to_yaml(recipe: &Recipe) -> Result<String> {
    Ok(serde_yaml::to_string(recipe)?)
}
