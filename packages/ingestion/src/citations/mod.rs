//! Citation and quotation analysis for article text.
//!
//! Finds parenthetical `(Author 2020)` and numeric `[1, 2]` citations plus
//! double-quoted passages, and builds one lookup prompt per finding.
//!
//! ```rust,ignore
//! use ingestion::citations::analyze_text;
//!
//! let analysis = analyze_text(r#"As argued (Smith 2020), "power is relational"."#);
//! assert_eq!(analysis.prompts.len(), 2);
//! ```

mod analyzer;
mod models;

pub use analyzer::{
    analyze_text, extract_citations, extract_quotations, generate_prompts, split_sentences,
};
pub use models::{Analysis, Citation, CitationStyle, Prompt, PromptTarget, Quotation};
