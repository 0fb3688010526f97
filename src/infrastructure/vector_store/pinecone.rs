//! Pinecone vector store implementation

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::domain::{
    DomainError, IndexDescription, QueryRequest, QueryResponse, ScoredMatch, VectorStore,
};
use crate::infrastructure::llm::HttpClientTrait;

pub const DEFAULT_PINECONE_CONTROL_URL: &str = "https://api.pinecone.io";
const PINECONE_API_VERSION: &str = "2024-07";

/// Pinecone control-plane and data-plane client
#[derive(Debug)]
pub struct PineconeStore<C: HttpClientTrait> {
    client: C,
    api_key: String,
    control_url: String,
    environment: String,
}

impl<C: HttpClientTrait> PineconeStore<C> {
    pub fn new(client: C, api_key: impl Into<String>, environment: impl Into<String>) -> Self {
        Self::with_control_url(client, api_key, environment, DEFAULT_PINECONE_CONTROL_URL)
    }

    pub fn with_control_url(
        client: C,
        api_key: impl Into<String>,
        environment: impl Into<String>,
        control_url: impl Into<String>,
    ) -> Self {
        let control_url = control_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            api_key: api_key.into(),
            control_url,
            environment: environment.into(),
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Resolve `index_name`, failing if the index does not exist
    pub async fn connect(&self, index_name: &str) -> Result<IndexDescription, DomainError> {
        let indexes = self.list_indexes().await?;

        let index = indexes
            .into_iter()
            .find(|i| i.name == index_name)
            .ok_or_else(|| {
                DomainError::configuration(format!(
                    "Index '{}' does not exist in the Pinecone environment '{}'.",
                    index_name, self.environment
                ))
            })?;

        info!(index = %index.name, host = %index.host, "Connected to Pinecone index");
        Ok(index)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Api-Key", self.api_key.as_str()),
            ("X-Pinecone-API-Version", PINECONE_API_VERSION),
            ("Content-Type", "application/json"),
        ]
    }

    fn query_url(host: &str) -> String {
        let host = host.trim_end_matches('/');

        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/query", host)
        } else {
            format!("https://{}/query", host)
        }
    }

    fn build_query(request: &QueryRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "vector": request.vector,
            "topK": request.top_k,
            "includeMetadata": request.include_metadata,
            "includeValues": request.include_values,
        });

        if let Some(ref namespace) = request.namespace {
            body["namespace"] = serde_json::json!(namespace);
        }

        body
    }
}

#[async_trait]
impl<C: HttpClientTrait> VectorStore for PineconeStore<C> {
    fn provider_type(&self) -> &'static str {
        "pinecone"
    }

    async fn list_indexes(&self) -> Result<Vec<IndexDescription>, DomainError> {
        let url = format!("{}/indexes", self.control_url);
        let json = self.client.get_json(&url, self.headers()).await?;

        let response: ListIndexesResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::vector_store(format!("Failed to parse index list: {}", e))
        })?;

        Ok(response
            .indexes
            .into_iter()
            .map(PineconeIndex::into_domain)
            .collect())
    }

    async fn describe_index(&self, name: &str) -> Result<IndexDescription, DomainError> {
        let url = format!("{}/indexes/{}", self.control_url, name);
        let json = self.client.get_json(&url, self.headers()).await?;

        let index: PineconeIndex = serde_json::from_value(json).map_err(|e| {
            DomainError::vector_store(format!("Failed to parse index description: {}", e))
        })?;

        Ok(index.into_domain())
    }

    #[instrument(skip(self, index, request), fields(index = %index.name, top_k = request.top_k))]
    async fn query(
        &self,
        index: &IndexDescription,
        request: QueryRequest,
    ) -> Result<QueryResponse, DomainError> {
        request.validate()?;

        if index.dimension != 0 && request.vector.len() != index.dimension as usize {
            return Err(DomainError::vector_store(format!(
                "Vector dimension {} does not match index '{}' dimension {}",
                request.vector.len(),
                index.name,
                index.dimension
            )));
        }

        let url = Self::query_url(&index.host);
        let body = Self::build_query(&request);

        let json = self
            .client
            .post_json(&url, self.headers(), &body)
            .await
            .map_err(|e| DomainError::vector_store(format!("Error querying Pinecone: {}", e)))?;

        let response: PineconeQueryResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::vector_store(format!("Failed to parse query response: {}", e))
        })?;

        debug!(matches = response.matches.len(), "Pinecone query completed");

        Ok(QueryResponse {
            namespace: response.namespace,
            matches: response
                .matches
                .into_iter()
                .map(|m| ScoredMatch {
                    id: m.id,
                    score: m.score,
                    metadata: m.metadata.unwrap_or_default(),
                    values: m.values,
                })
                .collect(),
        })
    }
}

// Pinecone API types

#[derive(Debug, Deserialize)]
struct ListIndexesResponse {
    #[serde(default)]
    indexes: Vec<PineconeIndex>,
}

#[derive(Debug, Deserialize)]
struct PineconeIndex {
    name: String,
    #[serde(default)]
    host: String,
    #[serde(default)]
    dimension: u32,
    #[serde(default)]
    metric: String,
}

impl PineconeIndex {
    fn into_domain(self) -> IndexDescription {
        IndexDescription {
            name: self.name,
            host: self.host,
            dimension: self.dimension,
            metric: self.metric,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PineconeQueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
    #[serde(default)]
    namespace: String,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    values: Vec<f32>,
    metadata: Option<HashMap<String, serde_json::Value>>,
}
