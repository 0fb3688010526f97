//! Prompt domain - Keyed prompt templates with named parameters

mod catalog;
mod faq;
mod library;
mod structured;
mod technique;
mod template;

pub use faq::{FaqKind, FAQ_CATEGORY, FAQ_TOPIC_PARAM};
pub use library::{mask_secret, PromptContext, PromptError, PromptLibrary};
pub use structured::StructuredTask;
pub use technique::PromptTechnique;
pub use template::{extract_variables, render_template, PromptTemplate, TemplateError};
