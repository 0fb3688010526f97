//! Prompt template parsing and rendering
//!
//! Supports named placeholders: `{name}`
//! - `{name}` - Required parameter, error if not provided
//! - `{{` / `}}` - Literal braces

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Regex to tokenize a template: escaped braces, placeholders, or stray braces
static TOKEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").unwrap());

/// Valid placeholder names
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Template processing errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TemplateError {
    #[error("Missing required parameter for formatting: '{name}'")]
    MissingVariable { name: String },

    #[error("Invalid placeholder '{{{placeholder}}}'")]
    InvalidPlaceholder { placeholder: String },

    #[error("Single '{brace}' encountered in template at position {position}")]
    UnbalancedBrace { brace: char, position: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
}

/// A parsed prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// Original template content
    content: String,
    segments: Vec<Segment>,
    /// Distinct placeholder names, in order of first appearance
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Parse a template string and extract placeholders
    pub fn parse(content: impl Into<String>) -> Result<Self, TemplateError> {
        let content = content.into();
        let mut segments = Vec::new();
        let mut variables: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for cap in TOKEN_PATTERN.captures_iter(&content) {
            let token = cap.get_match();
            literal.push_str(&content[last..token.start()]);
            last = token.end();

            match token.as_str() {
                "{{" => literal.push('{'),
                "}}" => literal.push('}'),
                "{" | "}" => {
                    return Err(TemplateError::UnbalancedBrace {
                        brace: token.as_str().chars().next().unwrap_or('{'),
                        position: token.start(),
                    });
                }
                _ => {
                    let name = cap.get(1).map(|m| m.as_str()).unwrap_or_default();

                    if !NAME_PATTERN.is_match(name) {
                        return Err(TemplateError::InvalidPlaceholder {
                            placeholder: name.to_string(),
                        });
                    }

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }

                    if !variables.iter().any(|v| v == name) {
                        variables.push(name.to_string());
                    }
                    segments.push(Segment::Variable(name.to_string()));
                }
            }
        }

        literal.push_str(&content[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            content,
            segments,
            variables,
        })
    }

    /// Get the original template content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get all placeholder names
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Check if the template has any placeholders
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    /// Render the template with provided values
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        self.render_with_defaults(values, &HashMap::new())
    }

    /// Render the template, falling back to `defaults` for values not supplied
    pub fn render_with_defaults(
        &self,
        values: &HashMap<String, String>,
        defaults: &HashMap<String, String>,
    ) -> Result<String, TemplateError> {
        let mut result = String::with_capacity(self.content.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Variable(name) => {
                    let value = values.get(name).or_else(|| defaults.get(name)).ok_or_else(
                        || TemplateError::MissingVariable { name: name.clone() },
                    )?;
                    result.push_str(value);
                }
            }
        }

        Ok(result)
    }
}

/// Convenience function to render a template string directly
pub fn render_template(
    template: &str,
    values: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let parsed = PromptTemplate::parse(template)?;
    parsed.render(values)
}

/// Extract placeholder names from a template string
pub fn extract_variables(template: &str) -> Vec<String> {
    match PromptTemplate::parse(template) {
        Ok(t) => t.variables,
        Err(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_no_variables() {
        let template = PromptTemplate::parse("Hello, world!").unwrap();
        assert!(!template.has_variables());
        assert_eq!(template.render(&HashMap::new()).unwrap(), "Hello, world!");
    }

    #[test]
    fn test_parse_duplicate_variables() {
        let template = PromptTemplate::parse("{name} and {name} again, {other}").unwrap();
        assert_eq!(template.variables(), &["name".to_string(), "other".to_string()]);
    }

    #[test]
    fn test_render_required_variable() {
        let template = PromptTemplate::parse("Hello, {name}!").unwrap();
        let result = template.render(&values(&[("name", "Alice")])).unwrap();
        assert_eq!(result, "Hello, Alice!");
    }

    #[test]
    fn test_render_missing_variable_reports_first_in_order() {
        let template = PromptTemplate::parse("{first} then {second}").unwrap();

        match template.render(&values(&[("second", "x")])) {
            Err(TemplateError::MissingVariable { name }) => assert_eq!(name, "first"),
            other => panic!("Expected MissingVariable error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_ignores_extra_values() {
        let template = PromptTemplate::parse("top_k={top_k}").unwrap();
        let result = template
            .render(&values(&[("top_k", "5"), ("unused", "ignored")]))
            .unwrap();
        assert_eq!(result, "top_k=5");
    }

    #[test]
    fn test_escaped_braces() {
        let template = PromptTemplate::parse("{{literal}} and {value}").unwrap();
        assert_eq!(template.variables(), &["value".to_string()]);

        let result = template.render(&values(&[("value", "v")])).unwrap();
        assert_eq!(result, "{literal} and v");
    }

    #[test]
    fn test_values_are_not_reinterpreted() {
        let template = PromptTemplate::parse("Input: '{text}'").unwrap();
        let result = template.render(&values(&[("text", "{not_a_placeholder}")])).unwrap();
        assert_eq!(result, "Input: '{not_a_placeholder}'");
    }

    #[test]
    fn test_defaults_are_overridden_by_values() {
        let template = PromptTemplate::parse("index '{index_name}'").unwrap();
        let defaults = values(&[("index_name", "default-index")]);

        let result = template.render_with_defaults(&HashMap::new(), &defaults).unwrap();
        assert_eq!(result, "index 'default-index'");

        let result = template
            .render_with_defaults(&values(&[("index_name", "other")]), &defaults)
            .unwrap();
        assert_eq!(result, "index 'other'");
    }

    #[test]
    fn test_unbalanced_braces() {
        assert_eq!(
            PromptTemplate::parse("oops { here").unwrap_err(),
            TemplateError::UnbalancedBrace {
                brace: '{',
                position: 5
            }
        );
        assert!(matches!(
            PromptTemplate::parse("{a}}"),
            Err(TemplateError::UnbalancedBrace { brace: '}', .. })
        ));
    }

    #[test]
    fn test_invalid_placeholder() {
        assert!(matches!(
            PromptTemplate::parse("positional {}"),
            Err(TemplateError::InvalidPlaceholder { .. })
        ));
        assert!(matches!(
            PromptTemplate::parse("{1st}"),
            Err(TemplateError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_multiline_template() {
        let template = PromptTemplate::parse(
            "You are a technical expert. Provide a guide on:\n**{topic}**\n\nAnswer:",
        )
        .unwrap();

        let result = template.render(&values(&[("topic", "memory leaks")])).unwrap();
        assert!(result.contains("**memory leaks**"));
        assert!(result.ends_with("Answer:"));
    }

    #[test]
    fn test_convenience_functions() {
        let result = render_template("Hello, {name}!", &values(&[("name", "World")])).unwrap();
        assert_eq!(result, "Hello, World!");

        assert_eq!(extract_variables("{a} {b} {a}"), vec!["a", "b"]);
        assert!(extract_variables("broken {").is_empty());
    }
}
