use std::env;

use serde::Deserialize;

use crate::domain::DomainError;

/// Plain environment variables honored on top of the layered sources
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("gemini.api_key", "GEMINI_API_KEY"),
    ("gemini.model", "GEMINI_MODEL"),
    ("pinecone.api_key", "PINECONE_API_KEY"),
    ("pinecone.environment", "PINECONE_ENVIRONMENT"),
    ("pinecone.index_name", "PINECONE_INDEX_NAME"),
];

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub gemini: GeminiConfig,
    pub pinecone: PineconeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub max_output_tokens: Option<u32>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PineconeConfig {
    pub api_key: Option<String>,
    pub environment: Option<String>,
    pub index_name: Option<String>,
    pub namespace: Option<String>,
    pub control_url: String,
}

/// Pinecone settings with every required value present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PineconeCredentials {
    pub api_key: String,
    pub environment: String,
    pub index_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.0-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            max_output_tokens: None,
            timeout_secs: 60,
        }
    }
}

impl Default for PineconeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            environment: None,
            index_name: None,
            namespace: None,
            control_url: "https://api.pinecone.io".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Load configuration, resolving plain variables through `lookup`
    pub fn load_with(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            );

        for (key, var) in ENV_OVERRIDES {
            let value = lookup(var).filter(|v| !v.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Gemini API key, or an error naming the missing variable
    pub fn require_gemini(&self) -> Result<&str, DomainError> {
        present(&self.gemini.api_key)
            .ok_or_else(|| missing_variables(&["GEMINI_API_KEY"]))
    }

    /// Pinecone settings, or an error naming every missing variable
    pub fn require_pinecone(&self) -> Result<PineconeCredentials, DomainError> {
        let api_key = present(&self.pinecone.api_key);
        let environment = present(&self.pinecone.environment);
        let index_name = present(&self.pinecone.index_name);

        match (api_key, environment, index_name) {
            (Some(api_key), Some(environment), Some(index_name)) => Ok(PineconeCredentials {
                api_key: api_key.to_string(),
                environment: environment.to_string(),
                index_name: index_name.to_string(),
            }),
            _ => {
                let mut missing = Vec::new();
                if api_key.is_none() {
                    missing.push("PINECONE_API_KEY");
                }
                if environment.is_none() {
                    missing.push("PINECONE_ENVIRONMENT");
                }
                if index_name.is_none() {
                    missing.push("PINECONE_INDEX_NAME");
                }
                Err(missing_variables(&missing))
            }
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn missing_variables(names: &[&str]) -> DomainError {
    DomainError::configuration(format!(
        "The following environment variables are missing: {}",
        names.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| vars.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.pinecone.control_url, "https://api.pinecone.io");
    }

    #[test]
    fn test_plain_variables_are_applied() {
        let config = AppConfig::load_with(lookup(&[
            ("GEMINI_API_KEY", "gm-key"),
            ("GEMINI_MODEL", "gemini-pro"),
            ("PINECONE_API_KEY", "pc-key"),
            ("PINECONE_ENVIRONMENT", "us-east-1"),
            ("PINECONE_INDEX_NAME", "faq-index"),
        ]))
        .unwrap();

        assert_eq!(config.require_gemini().unwrap(), "gm-key");
        assert_eq!(config.gemini.model, "gemini-pro");
        assert_eq!(
            config.require_pinecone().unwrap(),
            PineconeCredentials {
                api_key: "pc-key".to_string(),
                environment: "us-east-1".to_string(),
                index_name: "faq-index".to_string(),
            }
        );
    }

    #[test]
    fn test_blank_variables_count_as_missing() {
        let config = AppConfig::load_with(lookup(&[("GEMINI_API_KEY", "  ")])).unwrap();

        let err = config.require_gemini().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: The following environment variables are missing: GEMINI_API_KEY"
        );
    }

    #[test]
    fn test_all_missing_pinecone_variables_are_listed() {
        let mut config = AppConfig::default();
        config.pinecone.environment = Some("us-east-1".to_string());

        let err = config.require_pinecone().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: The following environment variables are missing: PINECONE_API_KEY, PINECONE_INDEX_NAME"
        );
    }
}
