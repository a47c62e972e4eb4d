use serde::Serialize;

/// Atmospheric fog parameters, serialized with the engine's property names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Fog {
    pub color: String,
    pub high_color: String,
    pub horizon_blend: f64,
    pub space_color: String,
    pub star_intensity: f64,
}

impl Fog {
    fn dusk(horizon_blend: f64, star_intensity: f64) -> Self {
        Self {
            color: "rgb(20, 20, 22)".to_string(),
            high_color: "rgb(36, 36, 40)".to_string(),
            horizon_blend,
            space_color: "rgb(10, 10, 12)".to_string(),
            star_intensity,
        }
    }

    /// Tight horizon for a tilted street-level view.
    pub fn city() -> Self {
        Self::dusk(0.08, 0.2)
    }

    pub fn overview() -> Self {
        Self::dusk(0.1, 0.15)
    }
}
