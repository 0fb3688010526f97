//! Embedding request types

use serde::{Deserialize, Serialize};

/// Intended use of an embedding, which lets the provider tune the vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbeddingTaskType {
    RetrievalQuery,
    RetrievalDocument,
    SemanticSimilarity,
}

/// Request to embed a single text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    model: String,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    task_type: Option<EmbeddingTaskType>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
            task_type: None,
        }
    }

    pub fn with_task_type(mut self, task_type: EmbeddingTaskType) -> Self {
        self.task_type = Some(task_type);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn task_type(&self) -> Option<EmbeddingTaskType> {
        self.task_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_request() {
        let request = EmbeddingRequest::new("text-embedding-004", "What is Pinecone?")
            .with_task_type(EmbeddingTaskType::RetrievalQuery);

        assert_eq!(request.model(), "text-embedding-004");
        assert_eq!(request.text(), "What is Pinecone?");
        assert_eq!(request.task_type(), Some(EmbeddingTaskType::RetrievalQuery));
    }

    #[test]
    fn test_task_type_wire_name() {
        let json = serde_json::to_value(EmbeddingTaskType::RetrievalQuery).unwrap();
        assert_eq!(json, serde_json::json!("RETRIEVAL_QUERY"));
    }
}
