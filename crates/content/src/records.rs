//! Records served by the content API, narrowed at the fetch boundary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    Http(String),
    Decode(String),
    NotFound(String),
    InvalidSlug(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Http(msg) => write!(f, "request failed: {msg}"),
            ContentError::Decode(msg) => write!(f, "malformed response: {msg}"),
            ContentError::NotFound(msg) => write!(f, "{msg}"),
            ContentError::InvalidSlug(slug) => write!(f, "invalid slug: {slug:?}"),
        }
    }
}

impl std::error::Error for ContentError {}

pub const EPIC_JOURNEY_TYPE: &str = "epic";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration_days: Option<f64>,
    /// Older records carry the day count here instead.
    #[serde(default, deserialize_with = "lenient_number")]
    pub duration: Option<f64>,
    #[serde(default)]
    pub focus: Option<String>,
    /// Free text, e.g. "Marrakech, Atlas Mountains, Fes".
    #[serde(default)]
    pub destinations: Option<String>,
    #[serde(default)]
    pub journey_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: Option<f64>,
}

impl Journey {
    pub fn is_epic(&self) -> bool {
        self.journey_type.as_deref() == Some(EPIC_JOURNEY_TYPE)
    }

    pub fn href(&self) -> String {
        format!("/journeys/{}", self.slug)
    }

    pub fn days(&self) -> Option<u32> {
        [self.duration_days, self.duration]
            .into_iter()
            .flatten()
            .find(|d| *d > 0.0)
            .map(|d| d.round() as u32)
    }

    /// The per-person price, only when positive.
    pub fn listed_price(&self) -> Option<f64> {
        self.price.filter(|p| *p > 0.0)
    }

    pub fn summary(&self) -> &str {
        present(&self.short_description)
            .or(present(&self.description))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub fees: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub hero_image: Option<String>,
    #[serde(default)]
    pub hero_caption: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub sources: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl Place {
    pub fn destination(&self) -> &str {
        present(&self.destination).unwrap_or_default()
    }
}

/// `Some` only for non-blank text.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[derive(Deserialize)]
struct RawJourneys {
    #[serde(default)]
    journeys: Option<Vec<Value>>,
}

/// Decode `{journeys: [...]}`. Records missing required fields are skipped.
pub fn decode_journeys(body: &str) -> Result<Vec<Journey>, ContentError> {
    let raw: RawJourneys =
        serde_json::from_str(body).map_err(|e| ContentError::Decode(e.to_string()))?;
    let mut journeys = Vec::new();
    for value in raw.journeys.unwrap_or_default() {
        match serde_json::from_value::<Journey>(value) {
            Ok(journey) => journeys.push(journey),
            Err(err) => warn!("skipping journey record: {err}"),
        }
    }
    Ok(journeys)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub place: Option<Place>,
    #[serde(default)]
    pub error: Option<String>,
}

pub const PLACE_NOT_FOUND: &str = "Place not found";

impl PlaceResponse {
    pub fn from_json_str(body: &str) -> Result<Self, ContentError> {
        serde_json::from_str(body).map_err(|e| ContentError::Decode(e.to_string()))
    }

    pub fn into_result(self) -> Result<Place, ContentError> {
        match self {
            PlaceResponse {
                success: true,
                place: Some(place),
                ..
            } => Ok(place),
            PlaceResponse { error, .. } => Err(ContentError::NotFound(
                present(&error).unwrap_or(PLACE_NOT_FOUND).to_string(),
            )),
        }
    }
}

/// Accepts a number, a numeric string, or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn price_accepts_numbers_and_numeric_strings() {
        let body = r#"{"journeys":[
            {"slug":"a","title":"A","price":1250},
            {"slug":"b","title":"B","price":"980.50"},
            {"slug":"c","title":"C","price":"on request"},
            {"slug":"d","title":"D","price":null},
            {"slug":"e","title":"E","price":0}
        ]}"#;
        let prices: Vec<_> = decode_journeys(body)
            .unwrap()
            .iter()
            .map(Journey::listed_price)
            .collect();
        assert_eq!(prices, vec![Some(1250.0), Some(980.5), None, None, None]);
    }

    #[test]
    fn malformed_records_are_skipped() {
        let body = r#"{"journeys":[{"slug":"ok","title":"Ok"},{"title":"no slug"}]}"#;
        let journeys = decode_journeys(body).unwrap();
        assert_eq!(journeys.len(), 1);
        assert_eq!(journeys[0].slug, "ok");
    }

    #[test]
    fn missing_journeys_key_is_an_empty_list() {
        assert!(decode_journeys("{}").unwrap().is_empty());
        assert!(matches!(
            decode_journeys("<html>"),
            Err(ContentError::Decode(_))
        ));
    }

    #[test]
    fn day_count_falls_back_to_duration() {
        let body = r#"{"journeys":[
            {"slug":"a","title":"A","durationDays":7},
            {"slug":"b","title":"B","duration":"5"},
            {"slug":"c","title":"C"}
        ]}"#;
        let days: Vec<_> = decode_journeys(body).unwrap().iter().map(Journey::days).collect();
        assert_eq!(days, vec![Some(7), Some(5), None]);
    }

    #[test]
    fn summary_prefers_short_description() {
        let body = r#"{"journeys":[
            {"slug":"a","title":"A","description":"Long","shortDescription":"Short"},
            {"slug":"b","title":"B","description":"Long","shortDescription":"  "}
        ]}"#;
        let journeys = decode_journeys(body).unwrap();
        assert_eq!(journeys[0].summary(), "Short");
        assert_eq!(journeys[1].summary(), "Long");
        assert_eq!(journeys[0].href(), "/journeys/a");
    }

    #[test]
    fn place_response_narrows_to_place_or_error() {
        let ok = PlaceResponse::from_json_str(
            r#"{"success":true,"place":{"slug":"bahia","title":"Bahia Palace","openingHours":"9-17"}}"#,
        )
        .unwrap()
        .into_result()
        .unwrap();
        assert_eq!(ok.title, "Bahia Palace");
        assert_eq!(ok.opening_hours.as_deref(), Some("9-17"));

        let err = PlaceResponse::from_json_str(r#"{"success":false,"error":"Gone"}"#)
            .unwrap()
            .into_result();
        assert_eq!(err, Err(ContentError::NotFound("Gone".to_string())));

        let missing = PlaceResponse::from_json_str(r#"{"success":true}"#)
            .unwrap()
            .into_result();
        assert_eq!(
            missing,
            Err(ContentError::NotFound(PLACE_NOT_FOUND.to_string()))
        );
    }
}
