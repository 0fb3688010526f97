//! Shared bootstrap for every subcommand

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::debug;

use crate::config::AppConfig;
use crate::domain::{PromptContext, PromptLibrary};
use crate::infrastructure::embedding::GeminiEmbeddingProvider;
use crate::infrastructure::llm::{GeminiProvider, HttpClient};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::services::{PromptService, SearchService};
use crate::infrastructure::vector_store::PineconeStore;

/// Loaded configuration plus factories for the remote clients
pub struct CliContext {
    config: AppConfig,
}

impl CliContext {
    /// Read `.env`, load configuration, and install logging
    pub fn init() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = AppConfig::load().context("Failed to load configuration")?;
        init_logging(&config.logging);

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Built-in library with whatever Pinecone settings are present
    pub fn prompt_library(&self) -> anyhow::Result<PromptLibrary> {
        let mut context = PromptContext::new();
        if let Some(api_key) = present(&self.config.pinecone.api_key) {
            context = context.with_api_key(api_key);
        }
        if let Some(index_name) = present(&self.config.pinecone.index_name) {
            context = context.with_index_name(index_name);
        }

        Ok(PromptLibrary::builtin(Some(context))?)
    }

    fn http_client(&self) -> anyhow::Result<HttpClient> {
        Ok(HttpClient::with_timeout(Duration::from_secs(
            self.config.gemini.timeout_secs,
        ))?)
    }

    /// Prompt service backed by Gemini; requires `GEMINI_API_KEY`
    pub fn prompt_service(&self) -> anyhow::Result<PromptService> {
        let gemini = &self.config.gemini;
        let api_key = self.config.require_gemini()?;

        let mut provider =
            GeminiProvider::with_base_url(self.http_client()?, api_key, &gemini.base_url)
                .with_default_model(&gemini.model);
        if let Some(max_output_tokens) = gemini.max_output_tokens {
            provider = provider.with_max_output_tokens(max_output_tokens);
        }

        debug!(model = %gemini.model, "Gemini provider configured");
        Ok(PromptService::new(self.prompt_library()?, Arc::new(provider)))
    }

    /// Pinecone store connected to the configured index
    pub async fn search_service(&self, with_embedder: bool) -> anyhow::Result<SearchService> {
        let store = self.pinecone_store()?;
        let credentials = self.config.require_pinecone()?;
        let index = store.connect(&credentials.index_name).await?;

        let mut service = SearchService::new(Arc::new(store), index);

        if with_embedder {
            let gemini = &self.config.gemini;
            let api_key = self.config.require_gemini()?;
            let embedder =
                GeminiEmbeddingProvider::with_base_url(self.http_client()?, api_key, &gemini.base_url)
                    .with_default_model(&gemini.embedding_model);
            service = service
                .with_embedder(Arc::new(embedder))
                .with_embedding_model(&gemini.embedding_model);
        }

        Ok(service)
    }

    /// Pinecone client; requires every `PINECONE_*` variable
    pub fn pinecone_store(&self) -> anyhow::Result<PineconeStore<HttpClient>> {
        let credentials = self.config.require_pinecone()?;

        Ok(PineconeStore::with_control_url(
            self.http_client()?,
            credentials.api_key,
            credentials.environment,
            &self.config.pinecone.control_url,
        ))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_library_masks_api_key() {
        let mut config = AppConfig::default();
        config.pinecone.api_key = Some("pc-1234567890abcd".to_string());
        config.pinecone.index_name = Some("faq-index".to_string());

        let ctx = CliContext::from_config(config);
        let library = ctx.prompt_library().unwrap();
        let prompt = library
            .get_prompt("system", "setup", &Default::default())
            .unwrap();

        assert!(prompt.contains("****abcd"));
        assert!(prompt.contains("faq-index"));
        assert!(!prompt.contains("pc-1234567890abcd"));
    }

    #[test]
    fn test_services_require_credentials() {
        let ctx = CliContext::from_config(AppConfig::default());

        let err = ctx.prompt_service().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = ctx.pinecone_store().unwrap_err();
        assert!(err.to_string().contains("PINECONE_API_KEY"));
    }
}
