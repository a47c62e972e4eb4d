use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of a style's `layers` array, reduced to what placement needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StyleLayer {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub layout: Option<Map<String, Value>>,
}

impl StyleLayer {
    /// A symbol layer that actually draws text.
    pub fn is_label(&self) -> bool {
        if self.kind != "symbol" {
            return false;
        }
        let Some(text) = self.layout.as_ref().and_then(|l| l.get("text-field")) else {
            return false;
        };
        match text {
            Value::Null | Value::Bool(false) => false,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }
}

/// The subset of a live map style this crate reads.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct StyleDocument {
    #[serde(default)]
    pub layers: Vec<StyleLayer>,
}

impl StyleDocument {
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn first_label_layer(&self) -> Option<&str> {
        self.layers
            .iter()
            .find(|layer| layer.is_label())
            .map(|layer| layer.id.as_str())
    }
}

/// Where a derived layer goes in the draw order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerPlacement {
    /// Directly below the named layer.
    Before(String),
    /// Appended above everything else.
    Top,
}

impl LayerPlacement {
    /// Below the first label layer so text stays readable; on top when the
    /// style has no labels or could not be read.
    pub fn below_labels(style: Option<&StyleDocument>) -> Self {
        match style.and_then(StyleDocument::first_label_layer) {
            Some(id) => LayerPlacement::Before(id.to_string()),
            None => LayerPlacement::Top,
        }
    }

    pub fn before_id(&self) -> Option<&str> {
        match self {
            LayerPlacement::Before(id) => Some(id),
            LayerPlacement::Top => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn style(raw: &str) -> StyleDocument {
        StyleDocument::from_json_str(raw).unwrap()
    }

    #[test]
    fn first_text_symbol_layer_wins() {
        let doc = style(
            r#"{"version":8,"layers":[
                {"id":"land","type":"background"},
                {"id":"poi-icons","type":"symbol","layout":{"icon-image":"x"}},
                {"id":"road-label","type":"symbol","layout":{"text-field":["get","name"]}},
                {"id":"place-label","type":"symbol","layout":{"text-field":"{name}"}}
            ]}"#,
        );
        assert_eq!(doc.first_label_layer(), Some("road-label"));
        assert_eq!(
            LayerPlacement::below_labels(Some(&doc)),
            LayerPlacement::Before("road-label".to_string())
        );
    }

    #[test]
    fn empty_text_field_is_not_a_label() {
        let doc = style(r#"{"layers":[{"id":"a","type":"symbol","layout":{"text-field":""}}]}"#);
        assert_eq!(doc.first_label_layer(), None);
    }

    #[test]
    fn no_label_layer_places_on_top() {
        let doc = style(r#"{"layers":[{"id":"water","type":"fill"}]}"#);
        let placement = LayerPlacement::below_labels(Some(&doc));
        assert_eq!(placement, LayerPlacement::Top);
        assert_eq!(placement.before_id(), None);
    }

    #[test]
    fn missing_style_places_on_top() {
        assert_eq!(LayerPlacement::below_labels(None), LayerPlacement::Top);
        assert_eq!(style("{}").layers.len(), 0);
    }
}
