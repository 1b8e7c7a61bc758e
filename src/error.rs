//! Structured error types for fxregion.
//!
//! Four variants cover the real error sources: scene JSON parsing, value
//! construction, scene structure, and image loading. CSS resolution never
//! fails; it falls back to defaults instead.

use thiserror::Error;

/// The unified error type returned by all fallible fxregion functions.
#[derive(Debug, Error)]
pub enum RegionError {
    /// JSON input failed to parse as a valid scene.
    #[error("Failed to parse scene: {source}{hint}")]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A value type was constructed with arguments that break its invariants.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The scene tree is structurally wrong (missing or duplicate slots, etc).
    #[error("Invalid scene: {0}")]
    InvalidScene(String),
    /// An image source could not be read or decoded.
    #[error("Image error: {0}")]
    ImageError(String),
}

impl RegionError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        RegionError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for RegionError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters."
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the scene schema. Check field names, node types, and that padding is not null."
            }
            serde_json::error::Category::Eof => "Unexpected end of input, is the JSON truncated?",
            serde_json::error::Category::Io => "",
        };
        let hint = if hint.is_empty() {
            String::new()
        } else {
            format!("\n  Hint: {}", hint)
        };
        RegionError::ParseError { source: e, hint }
    }
}
