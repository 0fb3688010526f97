//! Search service - nearest-neighbor lookups by text or by raw vector

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use crate::domain::{
    DomainError, EmbeddingProvider, EmbeddingRequest, EmbeddingTaskType, IndexDescription,
    QueryRequest, QueryResponse, VectorStore,
};

/// Probe vector size when the index does not report one
pub const DEFAULT_PROBE_DIMENSION: usize = 768;

/// Queries one vector index, optionally embedding text first
#[derive(Debug)]
pub struct SearchService {
    store: Arc<dyn VectorStore>,
    index: IndexDescription,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
    embedding_model: Option<String>,
}

impl SearchService {
    pub fn new(store: Arc<dyn VectorStore>, index: IndexDescription) -> Self {
        Self {
            store,
            index,
            embedder: None,
            embedding_model: None,
        }
    }

    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = Some(model.into());
        self
    }

    pub fn index(&self) -> &IndexDescription {
        &self.index
    }

    /// Dimension a probe vector must have for this index
    pub fn probe_dimension(&self) -> usize {
        match self.index.dimension {
            0 => DEFAULT_PROBE_DIMENSION,
            d => d as usize,
        }
    }

    /// Embed `text` and return its nearest neighbors
    pub async fn search_text(
        &self,
        text: &str,
        top_k: u32,
        namespace: Option<&str>,
    ) -> Result<QueryResponse, DomainError> {
        let embedder = self.embedder.as_ref().ok_or_else(|| {
            DomainError::configuration("Text search requires an embedding provider")
        })?;

        let model = self
            .embedding_model
            .as_deref()
            .unwrap_or_else(|| embedder.default_model());

        let request =
            EmbeddingRequest::new(model, text).with_task_type(EmbeddingTaskType::RetrievalQuery);
        let embedding = embedder.embed(request).await?;
        debug!(dimensions = embedding.dimensions(), "Query text embedded");

        self.search_vector(embedding.into_vector(), top_k, namespace)
            .await
    }

    /// Return the nearest neighbors of `vector`
    pub async fn search_vector(
        &self,
        vector: Vec<f32>,
        top_k: u32,
        namespace: Option<&str>,
    ) -> Result<QueryResponse, DomainError> {
        let mut request = QueryRequest::new(vector).with_top_k(top_k);
        if let Some(namespace) = namespace {
            request = request.with_namespace(namespace);
        }

        info!(
            store = self.store.provider_type(),
            index = %self.index.name,
            top_k,
            "Querying vector index"
        );

        self.store.query(&self.index, request).await
    }

    /// Uniformly random probe vector with components in `[0, 1)`
    pub fn random_vector(dimension: usize) -> Vec<f32> {
        let mut rng = rand::thread_rng();
        (0..dimension).map(|_| rng.r#gen::<f32>()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::MockEmbeddingProvider;
    use crate::domain::vector_store::MockVectorStore;
    use crate::domain::ScoredMatch;

    fn store() -> Arc<MockVectorStore> {
        Arc::new(
            MockVectorStore::new()
                .with_index("faq-index", 16)
                .with_match(
                    ScoredMatch::new("doc-1", 0.93)
                        .with_metadata("title", serde_json::json!("App crashes")),
                )
                .with_match(ScoredMatch::new("doc-2", 0.71))
                .with_match(ScoredMatch::new("doc-3", 0.42)),
        )
    }

    async fn service(store: Arc<MockVectorStore>) -> SearchService {
        let index = store.describe_index("faq-index").await.unwrap();
        SearchService::new(store, index)
    }

    #[tokio::test]
    async fn test_search_text_embeds_then_queries() {
        let store = store();
        let service = service(store.clone())
            .await
            .with_embedder(Arc::new(MockEmbeddingProvider::new("mock", 16)));

        let response = service
            .search_text("application crashes", 2, Some("faq"))
            .await
            .unwrap();

        assert_eq!(response.matches.len(), 2);
        assert_eq!(response.matches[0].id, "doc-1");
        assert_eq!(response.namespace, "faq");

        let queries = store.queries();
        assert_eq!(queries[0].vector.len(), 16);
        assert_eq!(queries[0].top_k, 2);
    }

    #[tokio::test]
    async fn test_search_text_without_embedder() {
        let service = service(store()).await;

        let result = service.search_text("hello", 5, None).await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_search_random_vector() {
        let store = store();
        let service = service(store.clone()).await;

        let vector = SearchService::random_vector(service.probe_dimension());
        assert_eq!(vector.len(), 16);
        assert!(vector.iter().all(|v| (0.0..1.0).contains(v)));

        let response = service.search_vector(vector, 5, None).await.unwrap();
        assert_eq!(response.matches.len(), 3);
        assert_eq!(store.queries()[0].top_k, 5);
    }

    #[tokio::test]
    async fn test_embedding_error_propagates() {
        let service = service(store())
            .await
            .with_embedder(Arc::new(MockEmbeddingProvider::new("mock", 16).with_error("quota")));

        let result = service.search_text("hello", 5, None).await;
        assert!(matches!(result, Err(DomainError::Provider { .. })));
    }

    #[test]
    fn test_probe_dimension_fallback() {
        let index = IndexDescription {
            name: "serverless".to_string(),
            host: "h".to_string(),
            dimension: 0,
            metric: "cosine".to_string(),
        };
        let service = SearchService::new(Arc::new(MockVectorStore::new()), index);
        assert_eq!(service.probe_dimension(), DEFAULT_PROBE_DIMENSION);
    }
}
