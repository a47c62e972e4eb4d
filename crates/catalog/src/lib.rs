//! Static city coordinate table and the place-name resolver.
//!
//! Lookups are by normalized key: lowercase, ASCII letters only. An unknown
//! place is `None`, which callers render as a fallback; it is never an error.

use foundation::{CameraPose, LngLat};
use serde::Serialize;

/// Default zoom for a single-city view.
pub const CITY_ZOOM: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CityEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub lng: f64,
    pub lat: f64,
    pub zoom: f64,
    /// Key of the canonical entry this spelling duplicates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<&'static str>,
}

impl CityEntry {
    const fn new(key: &'static str, name: &'static str, lng: f64, lat: f64) -> Self {
        Self {
            key,
            name,
            lng,
            lat,
            zoom: CITY_ZOOM,
            alias_of: None,
        }
    }

    const fn alias(mut self, of: &'static str) -> Self {
        self.alias_of = Some(of);
        self
    }

    pub fn coords(&self) -> CityCoords {
        CityCoords {
            position: LngLat::new(self.lng, self.lat),
            zoom: self.zoom,
        }
    }

    pub fn is_alias(&self) -> bool {
        self.alias_of.is_some()
    }
}

/// Resolved location plus the initial camera zoom for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityCoords {
    pub position: LngLat,
    pub zoom: f64,
}

impl CityCoords {
    pub fn camera(&self) -> CameraPose {
        CameraPose::top_down(self.position, self.zoom)
    }
}

/// Whole-region view used by the overview map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionOverview {
    pub key: &'static str,
    pub name: &'static str,
    pub center: LngLat,
    pub zoom: f64,
}

impl RegionOverview {
    pub fn camera(&self) -> CameraPose {
        CameraPose::top_down(self.center, self.zoom)
    }
}

const CITIES: &[CityEntry] = &[
    CityEntry::new("casablanca", "Casablanca", -7.5898, 33.5731),
    CityEntry::new("rabat", "Rabat", -6.8498, 34.0209),
    CityEntry::new("marrakech", "Marrakech", -7.9811, 31.6295),
    CityEntry::new("tangier", "Tangier", -5.8326, 35.7595),
    CityEntry::new("fes", "Fes", -5.0003, 34.0331),
    CityEntry::new("fez", "Fez", -5.0003, 34.0331).alias("fes"),
    CityEntry::new("agadir", "Agadir", -9.5981, 30.4278),
    CityEntry::new("ouarzazate", "Ouarzazate", -6.9063, 30.9189),
];

const MOROCCO: RegionOverview = RegionOverview {
    key: "morocco",
    name: "Morocco",
    center: LngLat::new(-7.0926, 31.7917),
    zoom: 5.0,
};

/// Normalize a free-form place name into a table key.
pub fn place_key(name: &str) -> String {
    name.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Every table entry, aliases included, in table order.
pub fn entries() -> &'static [CityEntry] {
    CITIES
}

pub fn lookup(name: &str) -> Option<&'static CityEntry> {
    let key = place_key(name);
    if key.is_empty() {
        return None;
    }
    CITIES.iter().find(|entry| entry.key == key)
}

pub fn resolve(name: &str) -> Option<CityCoords> {
    lookup(name).map(CityEntry::coords)
}

/// One entry per physical location: alias spellings are skipped.
pub fn distinct_locations() -> impl Iterator<Item = &'static CityEntry> {
    CITIES.iter().filter(|entry| !entry.is_alias())
}

pub fn overview() -> &'static RegionOverview {
    &MOROCCO
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_strips_non_letters_and_lowercases() {
        assert_eq!(place_key("Marrakech"), "marrakech");
        assert_eq!(place_key("  Tangier!! "), "tangier");
        assert_eq!(place_key("Ouar-za_zate 2"), "ouarzazate");
        assert_eq!(place_key("123"), "");
    }

    #[test]
    fn alias_spellings_resolve_identically() {
        let fes = resolve("Fes").unwrap();
        let fez = resolve("FEZ").unwrap();
        assert_eq!(fes, fez);
        assert!(fes.position.same_position(fez.position));
    }

    #[test]
    fn unknown_places_are_absent() {
        assert!(resolve("Atlantis").is_none());
        assert!(resolve("").is_none());
        assert!(resolve("---").is_none());
    }

    #[test]
    fn resolve_carries_city_zoom() {
        let casa = resolve("casablanca").unwrap();
        assert_eq!(casa.zoom, CITY_ZOOM);
        assert_eq!(casa.position.to_array(), [-7.5898, 33.5731]);
    }

    #[test]
    fn distinct_locations_skip_exactly_the_alias() {
        let keys: Vec<_> = distinct_locations().map(|e| e.key).collect();
        assert_eq!(entries().len() - 1, keys.len());
        assert!(!keys.contains(&"fez"));
        assert!(keys.contains(&"fes"));
    }

    #[test]
    fn every_entry_is_a_valid_position() {
        assert!(entries().iter().all(|e| e.coords().position.is_valid()));
        assert!(overview().center.is_valid());
    }

    #[test]
    fn distinct_locations_have_unique_positions() {
        let all: Vec<_> = distinct_locations().map(|e| e.coords().position).collect();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!a.same_position(*b));
            }
        }
    }

    #[test]
    fn aliases_point_at_existing_entries_with_same_coordinates() {
        for entry in entries().iter().filter(|e| e.is_alias()) {
            let target = entries()
                .iter()
                .find(|e| Some(e.key) == entry.alias_of)
                .unwrap();
            assert_eq!(target.coords(), entry.coords());
        }
    }

    #[test]
    fn entry_serializes_without_absent_alias() {
        let json = serde_json::to_value(lookup("rabat").unwrap()).unwrap();
        assert!(json.get("alias_of").is_none());
        let json = serde_json::to_value(lookup("fez").unwrap()).unwrap();
        assert_eq!(json["alias_of"], "fes");
    }

    #[test]
    fn overview_centers_on_region() {
        let region = overview();
        assert_eq!(region.key, "morocco");
        assert_eq!(region.camera().zoom, 5.0);
    }
}
