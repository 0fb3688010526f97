//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Embedding, EmbeddingRequest};
use crate::domain::DomainError;

/// Trait for embedding providers
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate an embedding for the given text
    async fn embed(&self, request: EmbeddingRequest) -> Result<Embedding, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider
    fn default_model(&self) -> &str;

    /// Get the embedding dimensions for a model
    fn dimensions(&self, model: &str) -> Option<usize>;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<Embedding, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            // Deterministic vector derived from the text bytes
            let hash = request
                .text()
                .bytes()
                .fold(0u64, |acc, b| acc.wrapping_add(b as u64));
            let vector: Vec<f32> = (0..self.dimensions)
                .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                .collect();

            Ok(Embedding::new(vector))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &str {
            "mock-embedding"
        }

        fn dimensions(&self, _model: &str) -> Option<usize> {
            Some(self.dimensions)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_provider_is_deterministic() {
            let provider = MockEmbeddingProvider::new("test", 128);

            let a = provider
                .embed(EmbeddingRequest::new("mock-embedding", "Hello"))
                .await
                .unwrap();
            let b = provider
                .embed(EmbeddingRequest::new("mock-embedding", "Hello"))
                .await
                .unwrap();

            assert_eq!(a.dimensions(), 128);
            assert_eq!(a, b);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new("test", 8).with_error("boom");
            let result = provider.embed(EmbeddingRequest::new("m", "x")).await;
            assert!(matches!(result, Err(DomainError::Provider { .. })));
        }
    }
}
