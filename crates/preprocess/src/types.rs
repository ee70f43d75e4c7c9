use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};

/// JSON object printed by the preprocessing script
///
/// Only `cleaned_text` is consumed; the rest is logged. Unknown fields are
/// ignored, and a field of an unexpected type reads as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreprocessorOutput {
    /// Normalized text
    #[serde(default, deserialize_with = "lenient")]
    pub cleaned_text: Option<String>,

    /// Extracted keywords
    #[serde(default, deserialize_with = "lenient")]
    pub keywords: Option<Vec<String>>,

    /// Short summary
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<String>,

    /// Word count of the cleaned text
    #[serde(default, deserialize_with = "lenient")]
    pub word_count: Option<u64>,
}

/// Accept any JSON value, keeping it only when it has the expected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl PreprocessorOutput {
    /// Parse captured script output, which must be a single JSON object
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Cleaned text, falling back to `original` when missing or empty
    pub fn cleaned_or(self, original: &str) -> String {
        match self.cleaned_text {
            Some(text) if !text.is_empty() => text,
            _ => original.to_string(),
        }
    }
}
