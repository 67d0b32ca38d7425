//! Source classification types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a URL points at written or video content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Video,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "article",
            ContentKind::Video => "video",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publishers and platforms the detection table knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownSource {
    YouTube,
    Vimeo,
    LinkedIn,
    Forbes,
    #[serde(rename = "BBC")]
    Bbc,
    #[serde(rename = "SWP Berlin")]
    SwpBerlin,
    #[serde(rename = "ECFR")]
    Ecfr,
    #[serde(rename = "MEI")]
    Mei,
    Other,
}

impl KnownSource {
    /// Display name, identical to the serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            KnownSource::YouTube => "YouTube",
            KnownSource::Vimeo => "Vimeo",
            KnownSource::LinkedIn => "LinkedIn",
            KnownSource::Forbes => "Forbes",
            KnownSource::Bbc => "BBC",
            KnownSource::SwpBerlin => "SWP Berlin",
            KnownSource::Ecfr => "ECFR",
            KnownSource::Mei => "MEI",
            KnownSource::Other => "Other",
        }
    }
}

impl fmt::Display for KnownSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which extraction handler processes a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlerKind {
    YouTube,
    Vimeo,
    LinkedIn,
    Forbes,
    Bbc,
    Generic,
}

/// Result of source detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSource {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub source: KnownSource,
    pub handler: HandlerKind,
}

impl ContentSource {
    pub const fn new(kind: ContentKind, source: KnownSource, handler: HandlerKind) -> Self {
        Self {
            kind,
            source,
            handler,
        }
    }
}
