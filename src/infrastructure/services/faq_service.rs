//! FAQ service - routes a question to a structured prompt and asks the model

use std::collections::HashMap;

use tracing::{info, warn};

use super::PromptService;
use crate::domain::prompt::{FAQ_CATEGORY, FAQ_TOPIC_PARAM};
use crate::domain::{DomainError, FaqKind, LlmRequest, PromptLibrary};

/// Returned in place of a blank model answer
pub const EMPTY_ANSWER_MESSAGE: &str =
    "AI did not return a valid response. Try again with a different question.";

/// Answer to an FAQ question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqAnswer {
    pub kind: FaqKind,
    pub prompt: String,
    pub text: String,
}

/// Answers FAQ questions using the `faq` prompt category
#[derive(Debug)]
pub struct FaqService {
    prompts: PromptService,
}

impl FaqService {
    pub fn new(prompts: PromptService) -> Self {
        Self { prompts }
    }

    /// Build the prompt for `question` without sending it
    pub fn prepare(&self, question: &str) -> Result<(FaqKind, String), DomainError> {
        Self::prepare_with(self.prompts.library(), question)
    }

    /// Classify `question` and render its prompt from `library`
    pub fn prepare_with(
        library: &PromptLibrary,
        question: &str,
    ) -> Result<(FaqKind, String), DomainError> {
        let question = question.trim().to_lowercase();
        if question.is_empty() {
            return Err(DomainError::validation("Question must not be empty"));
        }

        let kind = FaqKind::classify(&question);

        let mut params = HashMap::new();
        params.insert(FAQ_TOPIC_PARAM.to_string(), question);

        let prompt = library.get_prompt(FAQ_CATEGORY, kind.key(), &params)?;
        Ok((kind, prompt))
    }

    /// Classify, render, and send `question`
    pub async fn answer(&self, question: &str) -> Result<FaqAnswer, DomainError> {
        let (kind, prompt) = self.prepare(question)?;
        info!(kind = %kind, "Answering FAQ question");

        let response = self
            .prompts
            .send(LlmRequest::from_prompt(prompt.clone()))
            .await?;

        let text = response.content().trim();
        let text = if text.is_empty() {
            warn!("Model returned an empty answer");
            EMPTY_ANSWER_MESSAGE.to_string()
        } else {
            text.to_string()
        };

        Ok(FaqAnswer { kind, prompt, text })
    }
}
