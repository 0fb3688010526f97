//! Infrastructure services

mod faq_service;
mod prompt_service;
mod search_service;

pub use faq_service::{FaqAnswer, FaqService, EMPTY_ANSWER_MESSAGE};
pub use prompt_service::PromptService;
pub use search_service::{SearchService, DEFAULT_PROBE_DIMENSION};
