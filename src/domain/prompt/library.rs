//! Keyed prompt library: (category, key) -> template

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use super::catalog;
use super::template::{PromptTemplate, TemplateError};

/// Prompt lookup and formatting errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PromptError {
    #[error("Invalid category '{category}' or key '{key}'.")]
    NotFound { category: String, key: String },

    #[error("Missing required parameter for formatting: '{name}'")]
    MissingParameter { name: String },

    #[error("Invalid template for '{category}/{key}': {source}")]
    InvalidTemplate {
        category: String,
        key: String,
        source: TemplateError,
    },
}

impl PromptError {
    pub fn not_found(category: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            category: category.into(),
            key: key.into(),
        }
    }
}

/// Values bound into the library at construction time
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    pub api_key: Option<String>,
    pub index_name: Option<String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = Some(index_name.into());
        self
    }

    fn into_defaults(self) -> HashMap<String, String> {
        let mut defaults = HashMap::new();

        if let Some(api_key) = self.api_key {
            defaults.insert("api_key".to_string(), mask_secret(&api_key));
        }

        if let Some(index_name) = self.index_name {
            defaults.insert("index_name".to_string(), index_name);
        }

        defaults
    }
}

/// Mask a secret, keeping only the last four characters
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();

    if chars.len() <= 4 {
        return "****".to_string();
    }

    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// Immutable lookup table of prompt templates
#[derive(Debug, Clone, Default)]
pub struct PromptLibrary {
    prompts: HashMap<String, HashMap<String, PromptTemplate>>,
    defaults: HashMap<String, String>,
}

impl PromptLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the built-in library, binding `context` values as defaults
    pub fn builtin(context: Option<PromptContext>) -> Result<Self, PromptError> {
        let mut library = Self::new();

        for &(category, key, template) in catalog::BUILTIN_PROMPTS {
            library.insert(category, key, template)?;
        }

        if let Some(context) = context {
            library.defaults = context.into_defaults();
        }

        debug!(
            categories = library.prompts.len(),
            defaults = library.defaults.len(),
            "Built-in prompt library loaded"
        );

        Ok(library)
    }

    /// Add a template under (category, key), replacing any previous one
    pub fn insert(
        &mut self,
        category: impl Into<String>,
        key: impl Into<String>,
        template: &str,
    ) -> Result<(), PromptError> {
        let category = category.into();
        let key = key.into();

        let parsed = PromptTemplate::parse(template).map_err(|source| {
            PromptError::InvalidTemplate {
                category: category.clone(),
                key: key.clone(),
                source,
            }
        })?;

        self.prompts.entry(category).or_default().insert(key, parsed);
        Ok(())
    }

    /// Bind a default value used when a caller does not supply `name`
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    /// Resolve the template for (category, key)
    pub fn get_template(&self, category: &str, key: &str) -> Result<&PromptTemplate, PromptError> {
        self.prompts
            .get(category)
            .and_then(|entries| entries.get(key))
            .ok_or_else(|| PromptError::not_found(category, key))
    }

    /// Resolve and format a prompt
    pub fn get_prompt(
        &self,
        category: &str,
        key: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, PromptError> {
        let template = self.get_template(category, key)?;

        template
            .render_with_defaults(params, &self.defaults)
            .map_err(|e| match e {
                TemplateError::MissingVariable { name } => PromptError::MissingParameter { name },
                source => PromptError::InvalidTemplate {
                    category: category.to_string(),
                    key: key.to_string(),
                    source,
                },
            })
    }

    /// All categories, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self.prompts.keys().map(String::as_str).collect();
        categories.sort_unstable();
        categories
    }

    /// All keys within a category, sorted
    pub fn keys(&self, category: &str) -> Result<Vec<&str>, PromptError> {
        let entries = self
            .prompts
            .get(category)
            .ok_or_else(|| PromptError::not_found(category, ""))?;

        let mut keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        Ok(keys)
    }

    /// Parameters a caller must supply for (category, key), given the bound defaults
    pub fn required_parameters(&self, category: &str, key: &str) -> Result<Vec<&str>, PromptError> {
        let template = self.get_template(category, key)?;

        Ok(template
            .variables()
            .iter()
            .filter(|name| !self.defaults.contains_key(name.as_str()))
            .map(String::as_str)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn context() -> PromptContext {
        PromptContext::new()
            .with_api_key("pc-secret-abcd1234")
            .with_index_name("faq-index")
    }

    #[test]
    fn test_lookup_existing_template() {
        let library = PromptLibrary::builtin(None).unwrap();
        let template = library.get_template("embedding", "generate").unwrap();

        assert_eq!(
            template.content(),
            "Generate an embedding vector for the following text: '{text}'"
        );
    }

    #[test]
    fn test_get_prompt_substitutes_parameters() {
        let library = PromptLibrary::builtin(None).unwrap();

        let prompt = library
            .get_prompt("embedding", "generate", &params(&[("text", "What is Pinecone?")]))
            .unwrap();
        assert_eq!(
            prompt,
            "Generate an embedding vector for the following text: 'What is Pinecone?'"
        );

        let prompt = library
            .get_prompt(
                "similarity_search",
                "debug",
                &params(&[("query_text", "Find similar articles about AI"), ("top_k", "5")]),
            )
            .unwrap();
        assert_eq!(
            prompt,
            "Explain the similarity search process for input query: 'Find similar articles about AI' with top_k=5"
        );
    }

    #[test]
    fn test_unknown_category_or_key() {
        let library = PromptLibrary::builtin(None).unwrap();

        assert_eq!(
            library.get_prompt("nope", "generate", &HashMap::new()),
            Err(PromptError::not_found("nope", "generate"))
        );

        let err = library
            .get_prompt("embedding", "nope", &HashMap::new())
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid category 'embedding' or key 'nope'.");
    }

    #[test]
    fn test_missing_parameter() {
        let library = PromptLibrary::builtin(None).unwrap();

        let err = library
            .get_prompt("similarity_search", "debug", &params(&[("query_text", "q")]))
            .unwrap_err();

        assert_eq!(
            err,
            PromptError::MissingParameter {
                name: "top_k".to_string()
            }
        );
        assert_eq!(
            err.to_string(),
            "Missing required parameter for formatting: 'top_k'"
        );
    }

    #[test]
    fn test_system_prompts_use_bound_context() {
        let library = PromptLibrary::builtin(Some(context())).unwrap();

        let prompt = library.get_prompt("system", "setup", &HashMap::new()).unwrap();
        assert_eq!(
            prompt,
            "Configure Pinecone with the API key '****1234' and index 'faq-index'."
        );

        let prompt = library
            .get_prompt("debugging", "validate_index", &HashMap::new())
            .unwrap();
        assert!(prompt.contains("Pinecone index 'faq-index'"));
    }

    #[test]
    fn test_system_prompts_without_context_require_parameters() {
        let library = PromptLibrary::builtin(None).unwrap();

        assert!(matches!(
            library.get_prompt("system", "test_connection", &HashMap::new()),
            Err(PromptError::MissingParameter { .. })
        ));
        assert_eq!(
            library.required_parameters("system", "setup").unwrap(),
            vec!["api_key", "index_name"]
        );

        let bound = PromptLibrary::builtin(Some(context())).unwrap();
        assert!(bound.required_parameters("system", "setup").unwrap().is_empty());
    }

    #[test]
    fn test_caller_parameters_override_context() {
        let library = PromptLibrary::builtin(Some(context())).unwrap();

        let prompt = library
            .get_prompt("system", "setup", &params(&[("index_name", "other-index")]))
            .unwrap();
        assert!(prompt.ends_with("index 'other-index'."));
    }

    #[test]
    fn test_categories_and_keys_are_sorted() {
        let library = PromptLibrary::builtin(None).unwrap();

        assert_eq!(
            library.categories(),
            vec!["debugging", "embedding", "faq", "similarity_search", "system"]
        );
        assert_eq!(
            library.keys("similarity_search").unwrap(),
            vec!["debug", "query"]
        );
        assert!(library.keys("unknown").is_err());
    }

    #[test]
    fn test_insert_rejects_invalid_template() {
        let mut library = PromptLibrary::new();

        let err = library.insert("custom", "broken", "half { open").unwrap_err();
        assert!(matches!(err, PromptError::InvalidTemplate { .. }));

        library.insert("custom", "greeting", "Hello, {name}!").unwrap();
        let library = library.with_default("name", "World");
        assert_eq!(
            library.get_prompt("custom", "greeting", &HashMap::new()).unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("abcdef123456"), "****3456");
        assert_eq!(mask_secret("abc"), "****");
    }
}
