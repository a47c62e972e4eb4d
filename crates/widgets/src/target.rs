use catalog::{CityCoords, RegionOverview};
use foundation::CameraPose;

use crate::fallback::Fallback;

const CITY_PITCH_DEG: f64 = 45.0;
const CITY_BEARING_DEG: f64 = -17.6;
const OVERVIEW_PITCH_DEG: f64 = 30.0;

/// What a widget shows: one city, or the whole region.
#[derive(Debug, Clone, PartialEq)]
pub enum MapTarget {
    City {
        /// The place name as the page supplied it.
        label: String,
        key: String,
        coords: Option<CityCoords>,
    },
    Overview(&'static RegionOverview),
}

impl MapTarget {
    pub fn city(place: &str) -> Self {
        MapTarget::City {
            label: place.to_string(),
            key: catalog::place_key(place),
            coords: catalog::resolve(place),
        }
    }

    pub fn overview() -> Self {
        MapTarget::Overview(catalog::overview())
    }

    /// False only for a city missing from the coordinate table.
    pub fn is_resolved(&self) -> bool {
        match self {
            MapTarget::City { coords, .. } => coords.is_some(),
            MapTarget::Overview(_) => true,
        }
    }

    pub fn camera(&self) -> Option<CameraPose> {
        match self {
            MapTarget::City { coords, .. } => coords
                .map(|c| c.camera().tilted(CITY_PITCH_DEG, CITY_BEARING_DEG)),
            MapTarget::Overview(region) => Some(region.camera().tilted(OVERVIEW_PITCH_DEG, 0.0)),
        }
    }

    pub fn fallback(&self) -> Fallback {
        match self {
            MapTarget::City { label, key, .. } => Fallback::new(key, Some(label.as_str())),
            MapTarget::Overview(region) => Fallback::new(region.key, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MapTarget;

    #[test]
    fn city_camera_is_tilted_over_resolved_position() {
        let target = MapTarget::city("Fes");
        let camera = target.camera().unwrap();
        assert_eq!(camera.center, catalog::resolve("fez").unwrap().position);
        assert_eq!(camera.zoom, 12.0);
        assert_eq!(camera.pitch_deg, 45.0);
        assert_eq!(camera.bearing_deg, -17.6);
    }

    #[test]
    fn unknown_city_has_no_camera_and_labelled_fallback() {
        let target = MapTarget::city("Atlantis");
        assert!(!target.is_resolved());
        assert!(target.camera().is_none());
        let fallback = target.fallback();
        assert_eq!(fallback.pattern_id, "grid-atlantis");
        assert_eq!(fallback.label.as_deref(), Some("Atlantis"));
    }

    #[test]
    fn overview_camera_is_fixed() {
        let camera = MapTarget::overview().camera().unwrap();
        assert_eq!(camera.center.to_array(), [-7.0926, 31.7917]);
        assert_eq!(camera.zoom, 5.0);
        assert_eq!(camera.pitch_deg, 30.0);
        assert_eq!(camera.bearing_deg, 0.0);
        assert_eq!(MapTarget::overview().fallback().label, None);
    }
}
