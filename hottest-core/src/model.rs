use serde::{Deserialize, Deserializer, Serialize};

/// The weather snapshot for the currently-displayed location.
///
/// Produced by a [`crate::ReadingSource`], consumed once by the renderer,
/// then discarded; the most recent fetch wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceReading {
    pub city: String,
    pub country: String,
    /// Two-letter country code, case-insensitive on the wire.
    pub country_code: String,
    /// Pre-formatted display value; the endpoint sometimes emits a bare number.
    #[serde(deserialize_with = "string_or_number")]
    pub temperature: String,
    pub condition: String,
    /// Free-form UTC timestamp text, used verbatim.
    pub last_updated: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
