//! Prompt service - rendering library prompts and sending them to a model

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponse, PromptLibrary};

/// Renders prompts from a library and sends them to a provider
#[derive(Debug)]
pub struct PromptService {
    library: PromptLibrary,
    provider: Arc<dyn LlmProvider>,
    model: Option<String>,
}

impl PromptService {
    pub fn new(library: PromptLibrary, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            library,
            provider,
            model: None,
        }
    }

    /// Use `model` instead of the provider default
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    /// Model requests are sent to
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Format a prompt from the library
    pub fn render(
        &self,
        category: &str,
        key: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, DomainError> {
        Ok(self.library.get_prompt(category, key, params)?)
    }

    /// Format a prompt from the library and send it as a single user message
    pub async fn generate(
        &self,
        category: &str,
        key: &str,
        params: &HashMap<String, String>,
    ) -> Result<LlmResponse, DomainError> {
        let prompt = self.render(category, key, params)?;
        debug!(category, key, chars = prompt.len(), "Prompt rendered");

        self.send(LlmRequest::from_prompt(prompt)).await
    }

    /// Send a prepared request
    pub async fn send(&self, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let model = self.model().to_string();
        info!(
            provider = self.provider.provider_name(),
            model = %model,
            "Sending generation request"
        );

        self.provider.chat(&model, request).await
    }
}
