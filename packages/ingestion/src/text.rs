//! Text utilities shared by handlers and the server.

use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Average adult silent reading speed.
pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref NON_SLUG_REGEX: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Reading time in whole minutes, rounded up.
pub fn calculate_reading_time(text: &str) -> u32 {
    let word_count = text.split_whitespace().count();
    word_count.div_ceil(WORDS_PER_MINUTE) as u32
}

/// URL-safe slug from a title.
///
/// "Turkey & Syria: A New Chapter" becomes "turkey-syria-a-new-chapter".
pub fn generate_slug(title: &str) -> String {
    let lower = title.to_lowercase();
    NON_SLUG_REGEX
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Generate a content hash for duplicate detection
///
/// Uses SHA256 of normalized text so that formatting-only changes
/// between two scrapes of the same article hash identically.
/// Normalization rules:
/// - Convert to lowercase
/// - Remove all non-alphanumeric characters (except spaces)
/// - Collapse multiple spaces into single spaces
pub fn generate_content_hash(text: &str) -> String {
    let normalized = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_time_rounds_up() {
        assert_eq!(calculate_reading_time(""), 0);
        assert_eq!(calculate_reading_time("one"), 1);

        let words_200 = vec!["word"; 200].join(" ");
        assert_eq!(calculate_reading_time(&words_200), 1);

        let words_201 = vec!["word"; 201].join(" ");
        assert_eq!(calculate_reading_time(&words_201), 2);
    }

    #[test]
    fn test_reading_time_ignores_extra_whitespace() {
        assert_eq!(calculate_reading_time("  a \n\n b\t c  "), 1);
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(
            generate_slug("Turkey & Syria: A New Chapter"),
            "turkey-syria-a-new-chapter"
        );
        assert_eq!(generate_slug("  --Hello, World!--  "), "hello-world");
        assert_eq!(generate_slug("2024 Outlook"), "2024-outlook");
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn test_slug_drops_non_ascii() {
        assert_eq!(generate_slug("Türkiye’s Gulf Policy"), "t-rkiye-s-gulf-policy");
    }

    #[test]
    fn test_content_hash_normalizes() {
        let a = generate_content_hash("Energy politics remain central.");
        let b = generate_content_hash("  ENERGY   politics remain central ");
        assert_eq!(a, b);
        assert_ne!(a, generate_content_hash("Energy politics remain peripheral."));
    }

    #[test]
    fn test_content_hash_format() {
        let hash = generate_content_hash("Test content");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
