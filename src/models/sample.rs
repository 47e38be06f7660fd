use serde::{Deserialize, Deserializer, Serialize};

fn deserialize_symbol<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One reading from `GET /api/device/{address}/sample`.
///
/// `value` is opaque: it is never parsed, rounded or localised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub value: String,
    #[serde(default, deserialize_with = "deserialize_symbol")]
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl Sample {
    pub fn new(value: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            symbol: symbol.into(),
            timestamp: None,
            value_type: None,
        }
    }

    /// Shown until the first successful poll.
    pub fn placeholder() -> Self {
        Self::new("...", "")
    }
}
