//! Citation analysis records.

use serde::{Deserialize, Serialize};

/// How an in-text citation was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CitationStyle {
    /// `(Author 2020)`
    Parenthetical,
    /// `[1, 2]`
    Numeric,
    #[default]
    Unknown,
}

/// An in-text citation and the sentence it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub text: String,
    pub context: String,
    #[serde(default)]
    pub style: CitationStyle,
}

/// A quoted passage and the sentence it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotation {
    pub text: String,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptTarget {
    Citation,
    Quotation,
}

impl PromptTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptTarget::Citation => "citation",
            PromptTarget::Quotation => "quotation",
        }
    }
}

/// A prompt asking a model to recover bibliographic details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub target: PromptTarget,
    pub subject: String,
    pub context: String,
    pub prompt: String,
}

/// Everything found in one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub citations: Vec<Citation>,
    pub quotations: Vec<Quotation>,
    pub prompts: Vec<Prompt>,
}
