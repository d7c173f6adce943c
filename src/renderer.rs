//! Placeholder substitution for recipe templates.
//! Templates contain `{{TOKEN}}` placeholders that are replaced with values
//! from a flat string context.

use crate::constants::PLACEHOLDER_PATTERN;
use crate::recipe::Context;
use regex::{Captures, Regex};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// Rendering never fails: placeholders without a binding render as an
    /// empty string.
    fn render(&self, template: &str, context: &Context) -> String;
}

/// Single-pass `{{TOKEN}}` substitution engine.
///
/// Tokens are ASCII letters, digits and underscores, optionally padded with
/// whitespace inside the braces, and are case-sensitive. Substituted values
/// are never scanned again, so a value such as `{{B}}` is emitted literally.
pub struct PlaceholderRenderer {
    pattern: Regex,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        let pattern = Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern is valid");
        Self { pattern }
    }

    /// Returns the distinct token names referenced by `template`, in order of
    /// first appearance.
    pub fn tokens<'t>(&self, template: &'t str) -> Vec<&'t str> {
        let mut tokens: Vec<&str> = Vec::new();
        for caps in self.pattern.captures_iter(template) {
            if let Some(token) = caps.get(1).map(|m| m.as_str()) {
                if !tokens.contains(&token) {
                    tokens.push(token);
                }
            }
        }
        tokens
    }
}

impl Default for PlaceholderRenderer {
    fn default() -> Self {
        PlaceholderRenderer::new()
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, context: &Context) -> String {
        self.pattern
            .replace_all(template, |caps: &Captures| {
                context.get(&caps[1]).cloned().unwrap_or_default()
            })
            .into_owned()
    }
}
