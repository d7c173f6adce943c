//! Interactive collection of variable values.

use crate::binder::missing_required;
use crate::error::{Error, Result};
use crate::recipe::{Context, Recipe, Variable};
use dialoguer::{FuzzySelect, Input, Password};

pub trait Prompter {
    /// Asks for a value of `variable`.
    fn answer(&self, variable: &Variable) -> Result<String>;
}

pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

fn prompt_text(variable: &Variable) -> String {
    match &variable.description {
        Some(description) if !description.is_empty() => {
            format!("{} ({})", variable.label, description)
        }
        _ => variable.label.clone(),
    }
}

impl Prompter for DialoguerPrompter {
    fn answer(&self, variable: &Variable) -> Result<String> {
        let prompt = prompt_text(variable);

        if let Some(options) = variable.options.as_ref().filter(|o| !o.is_empty()) {
            let default = options.iter().position(|o| *o == variable.default).unwrap_or(0);
            let selection = FuzzySelect::new()
                .with_prompt(prompt)
                .default(default)
                .items(options)
                .interact()
                .map_err(|e| Error::PromptError(e.to_string()))?;
            return Ok(options[selection].clone());
        }

        if variable.secret {
            return Password::new()
                .with_prompt(prompt)
                .interact()
                .map_err(|e| Error::PromptError(e.to_string()));
        }

        Input::<String>::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}

/// Asks for every required variable that is still missing and returns the
/// overrides extended with the answers.
///
/// # Errors
/// * `Error::MissingRequiredVariable` if an answer is empty
pub fn prompt_missing(
    prompter: &dyn Prompter,
    recipe: &Recipe,
    overrides: &Context,
) -> Result<Context> {
    let mut answers = overrides.clone();
    for key in missing_required(recipe, overrides) {
        let Some(variable) = recipe.variable(&key) else {
            continue;
        };
        let value = prompter.answer(variable)?;
        if value.is_empty() {
            return Err(Error::MissingRequiredVariable { keys: vec![key] });
        }
        answers.insert(key, value);
    }
    Ok(answers)
}
