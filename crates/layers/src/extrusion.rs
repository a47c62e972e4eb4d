use serde_json::{Value, json};

/// 3D building layer derived from the composite vector source.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingExtrusion {
    pub id: String,
    pub source: String,
    pub source_layer: String,
    pub min_zoom: f64,
    pub color: String,
    pub opacity: f64,
}

impl Default for BuildingExtrusion {
    fn default() -> Self {
        Self {
            id: "3d-buildings".to_string(),
            source: "composite".to_string(),
            source_layer: "building".to_string(),
            min_zoom: 10.0,
            color: crate::symbology::ACCENT_HEX.to_string(),
            opacity: 0.6,
        }
    }
}

impl BuildingExtrusion {
    /// Layer definition in the engine's style-spec JSON form.
    pub fn to_layer_json(&self) -> Value {
        json!({
            "id": self.id,
            "source": self.source,
            "source-layer": self.source_layer,
            "filter": ["==", "extrude", "true"],
            "type": "fill-extrusion",
            "minzoom": self.min_zoom,
            "paint": {
                "fill-extrusion-color": self.color,
                "fill-extrusion-height": ["get", "height"],
                "fill-extrusion-base": ["get", "min_height"],
                "fill-extrusion-opacity": self.opacity,
            },
        })
    }
}
