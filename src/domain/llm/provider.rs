use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for generative-language providers
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Send a chat request
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Model used when the caller does not pick one
    fn default_model(&self) -> &str;
}
