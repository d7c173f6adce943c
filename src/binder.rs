//! Variable binding: merges recipe defaults with caller overrides.

use crate::constants::REDACTION_MARKER;
use crate::error::{Error, Result};
use crate::recipe::{Context, Recipe, Variable};

fn resolve<'a>(variable: &'a Variable, overrides: &'a Context) -> &'a str {
    match overrides.get(&variable.key) {
        Some(value) if !value.is_empty() => value,
        _ => &variable.default,
    }
}

/// Builds the render context: for every declared variable the non-empty
/// override, else the default. Overrides for undeclared keys are ignored.
pub fn effective_context(recipe: &Recipe, overrides: &Context) -> Context {
    recipe
        .variables
        .iter()
        .map(|variable| (variable.key.clone(), resolve(variable, overrides).to_string()))
        .collect()
}

/// Keys of required variables that resolve to an empty value, in declaration order.
pub fn missing_required(recipe: &Recipe, overrides: &Context) -> Vec<String> {
    recipe
        .variables
        .iter()
        .filter(|variable| variable.required && resolve(variable, overrides).is_empty())
        .map(|variable| variable.key.clone())
        .collect()
}

/// Same as [`effective_context`] with secret values replaced by a fixed marker.
/// Only for persisted or displayed bindings, never for rendering.
pub fn redact(recipe: &Recipe, overrides: &Context) -> Context {
    recipe
        .variables
        .iter()
        .map(|variable| {
            let value = if variable.secret {
                REDACTION_MARKER
            } else {
                resolve(variable, overrides)
            };
            (variable.key.clone(), value.to_string())
        })
        .collect()
}

/// Parses `KEY=VALUE` pairs as given on the command line.
/// The value may be empty and may itself contain `=`.
pub fn parse_overrides<I, S>(pairs: I) -> Result<Context>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut overrides = Context::new();
    for pair in pairs {
        let pair = pair.as_ref();
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                overrides.insert(key.trim().to_string(), value.to_string());
            }
            _ => {
                return Err(Error::ConfigError(format!(
                    "invalid variable binding '{pair}', expected KEY=VALUE"
                )))
            }
        }
    }
    Ok(overrides)
}

/// Reads overrides from a JSON object. Non-string scalars are stringified;
/// `null` entries are skipped.
pub fn overrides_from_json(value: &serde_json::Value) -> Result<Context> {
    let object = match value {
        serde_json::Value::Null => return Ok(Context::new()),
        serde_json::Value::Object(object) => object,
        _ => {
            return Err(Error::ConfigError(
                "variable overrides must be a JSON object".to_string(),
            ))
        }
    };

    let mut overrides = Context::new();
    for (key, value) in object {
        let value = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Bool(_) | serde_json::Value::Number(_) => value.to_string(),
            _ => {
                return Err(Error::ConfigError(format!(
                    "override '{key}' must be a scalar value"
                )))
            }
        };
        overrides.insert(key.clone(), value);
    }
    Ok(overrides)
}
