//! FAQ question routing

use std::fmt;

/// Category under which the FAQ templates are registered
pub const FAQ_CATEGORY: &str = "faq";

/// Parameter the FAQ templates substitute the question into
pub const FAQ_TOPIC_PARAM: &str = "topic";

/// Shape of answer an FAQ question asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaqKind {
    BestPractices,
    Troubleshooting,
    Definition,
    General,
}

impl FaqKind {
    /// Pick a template by keyword; earlier rules win
    pub fn classify(query: &str) -> Self {
        let query = query.trim().to_lowercase();

        if query.contains("best practices") {
            Self::BestPractices
        } else if query.contains("troubleshooting") {
            Self::Troubleshooting
        } else if query.contains("define") || query.contains("what is") {
            Self::Definition
        } else {
            Self::General
        }
    }

    /// Template key within the `faq` category
    pub fn key(&self) -> &'static str {
        match self {
            Self::BestPractices => "best_practices",
            Self::Troubleshooting => "troubleshooting",
            Self::Definition => "definition",
            Self::General => "general",
        }
    }
}

impl fmt::Display for FaqKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
