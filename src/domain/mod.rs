//! Domain layer - Prompt templates, model and vector store contracts

pub mod embedding;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod vector_store;

pub use embedding::{Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingTaskType};
pub use error::DomainError;
pub use llm::{
    FinishReason, LlmProvider, LlmRequest, LlmRequestBuilder, LlmResponse, Message, MessageRole,
    Usage,
};
pub use prompt::{
    FaqKind, PromptContext, PromptError, PromptLibrary, PromptTechnique, PromptTemplate,
    StructuredTask, TemplateError,
};
pub use vector_store::{
    IndexDescription, QueryRequest, QueryResponse, ScoredMatch, VectorStore, DEFAULT_TOP_K,
};
