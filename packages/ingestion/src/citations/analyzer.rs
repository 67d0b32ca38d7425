use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use super::models::{Analysis, Citation, CitationStyle, Prompt, PromptTarget, Quotation};

/// Characters of surrounding text used when no sentence contains a match.
const SNIPPET_RADIUS: usize = 75;

lazy_static! {
    static ref PARENTHETICAL_REGEX: Regex =
        Regex::new(r"\((?P<citation>[^()]*?\d{4}[^()]*)\)").unwrap();
    static ref NUMERIC_REGEX: Regex = Regex::new(r"\[(?P<citation>\d+(?:\s*,\s*\d+)*)\]").unwrap();
    static ref QUOTE_REGEX: Regex = Regex::new(r#""(?P<quote>[^"]{3,})""#).unwrap();
}

/// Collapse whitespace and split after `.`, `!` or `?` when the next word
/// starts with an uppercase letter, a digit or a double quote.
pub fn split_sentences(text: &str) -> Vec<String> {
    let cleaned = collapse_whitespace(text);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = cleaned.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for window in chars.windows(3) {
        let [(_, end), (space_at, space), (_, next)] = [window[0], window[1], window[2]];
        let opens_sentence = next.is_ascii_uppercase() || next.is_ascii_digit() || next == '"';
        if matches!(end, '.' | '!' | '?') && space == ' ' && opens_sentence {
            sentences.push(cleaned[start..space_at].to_string());
            start = space_at + 1;
        }
    }
    sentences.push(cleaned[start..].to_string());

    sentences
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// In-text citations with their context, parenthetical first.
pub fn extract_citations(text: &str) -> Vec<Citation> {
    let sentences = split_sentences(text);

    let parenthetical = PARENTHETICAL_REGEX
        .captures_iter(text)
        .map(|caps| (caps, CitationStyle::Parenthetical));
    let numeric = NUMERIC_REGEX
        .captures_iter(text)
        .map(|caps| (caps, CitationStyle::Numeric));

    let mut seen = HashSet::new();
    parenthetical
        .chain(numeric)
        .filter_map(|(caps, style)| {
            let whole = caps.get(0)?;
            let citation = caps.name("citation")?.as_str().trim().to_string();
            let context = find_context(&sentences, whole.start(), whole.end(), text);
            Some(Citation {
                text: citation,
                context,
                style,
            })
        })
        .filter(|c| seen.insert((c.text.clone(), c.context.clone())))
        .collect()
}

/// Double-quoted passages of three or more characters.
pub fn extract_quotations(text: &str) -> Vec<Quotation> {
    let sentences = split_sentences(text);

    QUOTE_REGEX
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let quote = caps.name("quote")?.as_str().trim();
            if quote.is_empty() {
                return None;
            }
            Some(Quotation {
                text: quote.to_string(),
                context: find_context(&sentences, whole.start(), whole.end(), text),
            })
        })
        .collect()
}

/// One lookup prompt per citation, then one per quotation.
pub fn generate_prompts(citations: &[Citation], quotations: &[Quotation]) -> Vec<Prompt> {
    let citation_prompts = citations.iter().map(|citation| Prompt {
        target: PromptTarget::Citation,
        subject: citation.text.clone(),
        context: citation.context.clone(),
        prompt: format!(
            "You are a research assistant. Given the following in-text citation, \
             identify the most likely bibliographic reference with complete \
             details (authors, title, venue, year, publisher as applicable). If \
             multiple works are implied, list each separately.\n\
             Citation: {}\n\
             Context: {}\n\
             Respond with a structured JSON array where each entry contains \
             `title`, `authors`, `venue`, `year`, and `additional_info`.",
            citation.text, citation.context
        ),
    });

    let quotation_prompts = quotations.iter().map(|quotation| Prompt {
        target: PromptTarget::Quotation,
        subject: quotation.text.clone(),
        context: quotation.context.clone(),
        prompt: format!(
            "You are a literature analyst. Determine the original source of the \
             following quotation and provide bibliographic details if possible.\n\
             Quotation: \"{}\"\n\
             Context: {}\n\
             Respond in JSON with fields `suspected_source`, `supporting_evidence`, \
             and `confidence` (0-1).",
            quotation.text, quotation.context
        ),
    });

    citation_prompts.chain(quotation_prompts).collect()
}

/// Citations, quotations and their prompts for one text.
pub fn analyze_text(text: &str) -> Analysis {
    let citations = extract_citations(text);
    let quotations = extract_quotations(text);
    let prompts = generate_prompts(&citations, &quotations);

    Analysis {
        citations,
        quotations,
        prompts,
    }
}

/// The sentence that contains `start`, or a collapsed snippet around the match.
fn find_context(sentences: &[String], start: usize, end: usize, text: &str) -> String {
    let containing = sentences.iter().find(|sentence| {
        text.find(sentence.as_str())
            .is_some_and(|idx| idx <= start && start < idx + sentence.len())
    });
    if let Some(sentence) = containing {
        return sentence.clone();
    }

    let lo = text[..start]
        .char_indices()
        .rev()
        .nth(SNIPPET_RADIUS - 1)
        .map_or(0, |(i, _)| i);
    let hi = text[end..]
        .char_indices()
        .nth(SNIPPET_RADIUS)
        .map_or(text.len(), |(i, _)| end + i);
    collapse_whitespace(&text[lo..hi])
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
