//! Prompting techniques: zero-shot, few-shot, chain-of-thought

use std::fmt;

use crate::domain::DomainError;

const STEP_BY_STEP_CUE: &str = "Let's think step by step.";

/// A prompt shaped by a prompting technique
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptTechnique {
    ZeroShot {
        prompt: String,
    },
    FewShot {
        prompt: String,
        examples: Vec<(String, String)>,
    },
    ChainOfThought {
        prompt: String,
    },
}

impl PromptTechnique {
    pub fn zero_shot(prompt: impl Into<String>) -> Self {
        Self::ZeroShot {
            prompt: prompt.into(),
        }
    }

    pub fn few_shot(prompt: impl Into<String>, examples: Vec<(String, String)>) -> Self {
        Self::FewShot {
            prompt: prompt.into(),
            examples,
        }
    }

    pub fn chain_of_thought(prompt: impl Into<String>) -> Self {
        Self::ChainOfThought {
            prompt: prompt.into(),
        }
    }

    /// Human-readable technique name
    pub fn name(&self) -> &'static str {
        match self {
            Self::ZeroShot { .. } => "Zero-Shot",
            Self::FewShot { .. } => "Few-Shot",
            Self::ChainOfThought { .. } => "Chain-of-Thought",
        }
    }

    /// Build the final prompt text
    pub fn build(&self) -> Result<String, DomainError> {
        match self {
            Self::ZeroShot { prompt } => Ok(prompt.clone()),
            Self::FewShot { prompt, examples } => {
                if examples.is_empty() {
                    return Err(DomainError::validation(
                        "Few-shot prompting requires at least one example",
                    ));
                }

                let shots = examples
                    .iter()
                    .map(|(input, output)| format!("- {} -> {}", input, output))
                    .collect::<Vec<_>>()
                    .join("\n");

                Ok(format!("{}\n{} ->", shots, prompt))
            }
            Self::ChainOfThought { prompt } => {
                if prompt.to_lowercase().contains("step by step") {
                    Ok(prompt.clone())
                } else {
                    Ok(format!("{}\n\n{}", prompt.trim_end(), STEP_BY_STEP_CUE))
                }
            }
        }
    }
}

impl fmt::Display for PromptTechnique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
