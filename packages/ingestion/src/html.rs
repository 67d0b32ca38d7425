//! Regex-based HTML scraping primitives.
//!
//! No DOM is built. Every helper is a pattern match over the raw markup,
//! which is enough for meta tags and the first article-like container.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_REGEX: Regex = Regex::new(r"(?is)<title[^>]*>([^<]+)</title>").unwrap();
    static ref SCRIPT_REGEX: Regex = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    static ref STYLE_REGEX: Regex = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref MULTI_NEWLINE_REGEX: Regex = Regex::new(r"\n{3,}").unwrap();
    static ref MULTI_SPACE_REGEX: Regex = Regex::new(r"\s{2,}").unwrap();
    static ref NUMERIC_ENTITY_REGEX: Regex = Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap();
    static ref META_TAG_REGEX: Regex = Regex::new(r"(?is)<meta\s[^>]*>").unwrap();
    static ref META_ATTR_REGEX: Regex =
        Regex::new(r#"(?i)(?:^|\s)(property|name|content)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap();

    /// Body containers for Forbes articles
    pub static ref FORBES_BODY: Vec<Regex> = compile(&[
        r"(?is)<article[^>]*>(.*?)</article>",
        r#"(?is)<div[^>]*class="[^"]*article-body[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*body-content[^"]*"[^>]*>(.*?)</div>"#,
    ]);

    /// Body containers for BBC articles
    pub static ref BBC_BODY: Vec<Regex> = compile(&[
        r"(?is)<article[^>]*>(.*?)</article>",
        r#"(?is)<div[^>]*data-component="text-block"[^>]*>(.*?)</div>"#,
        r"(?is)<main[^>]*>(.*?)</main>",
    ]);

    /// Body containers for arbitrary sites
    pub static ref GENERIC_BODY: Vec<Regex> = compile(&[
        r"(?is)<article[^>]*>(.*?)</article>",
        r#"(?is)<div[^>]*class="[^"]*article[^"]*"[^>]*>(.*?)</div>"#,
        r#"(?is)<div[^>]*class="[^"]*content[^"]*"[^>]*>(.*?)</div>"#,
        r"(?is)<main[^>]*>(.*?)</main>",
    ]);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// Attributes of one `<meta>` tag that matter for lookups.
#[derive(Default)]
struct MetaTag<'a> {
    property: Option<&'a str>,
    name: Option<&'a str>,
    content: Option<&'a str>,
}

fn meta_tags(html: &str) -> impl Iterator<Item = MetaTag<'_>> {
    META_TAG_REGEX.find_iter(html).map(|tag| {
        let mut meta = MetaTag::default();
        for cap in META_ATTR_REGEX.captures_iter(tag.as_str()) {
            let value = cap.get(2).or_else(|| cap.get(3)).map(|m| m.as_str());
            match cap[1].to_ascii_lowercase().as_str() {
                "property" => meta.property = meta.property.or(value),
                "name" => meta.name = meta.name.or(value),
                _ => meta.content = meta.content.or(value),
            }
        }
        meta
    })
}

/// Extract a `<meta>` value by `property` or `name`.
///
/// A tag matching on `property` wins over one matching on `name`. Attribute
/// order, quote style and case do not matter.
pub fn extract_meta(html: &str, key: &str) -> Option<String> {
    let is_key = |value: Option<&str>| value.is_some_and(|v| v.eq_ignore_ascii_case(key));
    let content = |tag: &MetaTag| {
        tag.content
            .map(|c| decode_entities(c).trim().to_string())
            .filter(|c| !c.is_empty())
    };

    meta_tags(html)
        .find_map(|tag| if is_key(tag.property) { content(&tag) } else { None })
        .or_else(|| meta_tags(html).find_map(|tag| if is_key(tag.name) { content(&tag) } else { None }))
}

/// First meta value found among `keys`, in order.
pub fn extract_meta_any(html: &str, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| extract_meta(html, key))
}

/// Extract the document `<title>`.
pub fn extract_title(html: &str) -> Option<String> {
    TITLE_REGEX
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Return the stripped text of the first container that matches.
///
/// Empty when no pattern matches.
pub fn extract_body(html: &str, patterns: &[Regex]) -> String {
    patterns
        .iter()
        .find_map(|pattern| pattern.captures(html).and_then(|cap| cap.get(1)))
        .map(|m| strip_html(m.as_str()))
        .unwrap_or_default()
}

/// Remove scripts, styles and tags, leaving single-spaced text.
pub fn strip_html(html: &str) -> String {
    let text = SCRIPT_REGEX.replace_all(html, "");
    let text = STYLE_REGEX.replace_all(&text, "");
    let text = TAG_REGEX.replace_all(&text, " ");
    let text = decode_entities(&text);
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

/// Normalize extracted text.
pub fn clean_content(text: &str) -> String {
    let text = MULTI_NEWLINE_REGEX.replace_all(text, "\n\n");
    MULTI_SPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

/// Decode the handful of entities that show up in meta tags and body text.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let decoded = NUMERIC_ENTITY_REGEX.replace_all(text, |caps: &regex::Captures| {
        let raw = &caps[1];
        let code = match raw.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => raw.parse::<u32>().ok(),
        };
        code.and_then(char::from_u32)
            .map(|c| c.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    });

    // &amp; last so "&amp;lt;" stays "&lt;"
    decoded
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
