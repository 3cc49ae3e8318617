use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::types::Validate;
use super::ResponseError;

// ```json ... ``` or ``` ... ```, first block wins
static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[\w-]*[ \t]*\r?\n?(.*?)```").expect("valid fence regex"));

/// Content of the first fenced block, or the whole text when there is none.
pub fn extract_json(text: &str) -> &str {
    FENCED_BLOCK
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
        .trim()
}

/// How strictly a response body is treated.
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Strip a fenced block before parsing.
    pub allow_fence: bool,
    /// Attach the raw response to parse and schema failures.
    pub include_raw: bool,
}

/// Parse and validate a model reply into `T`. Never returns a partial value.
pub fn parse_response<T>(text: &str, options: ParseOptions) -> Result<T, ResponseError>
where
    T: DeserializeOwned + Validate,
{
    let raw = || options.include_raw.then(|| text.to_string());
    let body = if options.allow_fence {
        extract_json(text)
    } else {
        text
    };

    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        log::warn!("Model reply is not valid JSON: {}", e);
        ResponseError::MalformedJson { raw: raw() }
    })?;

    let parsed: T = serde_json::from_value(value).map_err(|e| {
        log::warn!("Model reply has the wrong shape: {}", e);
        ResponseError::InvalidStructure {
            detail: e.to_string(),
            raw: raw(),
        }
    })?;

    parsed
        .validate()
        .map_err(|detail| ResponseError::InvalidStructure { detail, raw: raw() })?;

    Ok(parsed)
}
