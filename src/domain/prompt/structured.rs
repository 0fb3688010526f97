//! System + human message tasks

use crate::domain::{DomainError, LlmRequest};

/// A task expressed as a system message plus a human message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuredTask {
    Summarization {
        system: String,
        text: String,
    },
    QuestionAnswering {
        system: String,
        question: String,
        context: Option<String>,
    },
}

impl StructuredTask {
    pub fn summarization(system: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Summarization {
            system: system.into(),
            text: text.into(),
        }
    }

    pub fn question_answering(
        system: impl Into<String>,
        question: impl Into<String>,
        context: Option<String>,
    ) -> Self {
        Self::QuestionAnswering {
            system: system.into(),
            question: question.into(),
            context,
        }
    }

    pub fn system_message(&self) -> &str {
        match self {
            Self::Summarization { system, .. } | Self::QuestionAnswering { system, .. } => system,
        }
    }

    /// Build the human message, validating task inputs
    pub fn human_message(&self) -> Result<String, DomainError> {
        match self {
            Self::Summarization { text, .. } => Ok(text.clone()),
            Self::QuestionAnswering {
                question, context, ..
            } => {
                let context = context
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| DomainError::validation("Context is required for Q&A task."))?;

                Ok(format!("Context:\n{}\n\nQuestion: {}", context, question))
            }
        }
    }

    /// Build the request sent to the model
    pub fn to_request(&self) -> Result<LlmRequest, DomainError> {
        let human = self.human_message()?;

        Ok(LlmRequest::builder()
            .system(self.system_message())
            .user(human)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageRole;

    const PASSAGE: &str = "Artificial Intelligence (AI) is a branch of computer science that aims to create machines that can perform tasks that require human intelligence.";

    #[test]
    fn test_summarization_request() {
        let task = StructuredTask::summarization(
            "Provide a brief summary of the following passage:",
            PASSAGE,
        );

        let request = task.to_request().unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.messages[1].content_text(), PASSAGE);
    }

    #[test]
    fn test_question_answering_includes_context() {
        let task = StructuredTask::question_answering(
            "Extract the correct answer from the given passage.",
            "What does AI aim to do?",
            Some(PASSAGE.to_string()),
        );

        let human = task.human_message().unwrap();
        assert!(human.starts_with("Context:\n"));
        assert!(human.ends_with("Question: What does AI aim to do?"));
    }

    #[test]
    fn test_question_answering_requires_context() {
        let task = StructuredTask::question_answering("system", "What?", None);
        let err = task.to_request().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Context is required for Q&A task.");

        let blank = StructuredTask::question_answering("system", "What?", Some("   ".into()));
        assert!(blank.human_message().is_err());
    }
}
