use serde::{Deserialize, Serialize};

/// Access token baked in at build time, if any.
const BUILD_ACCESS_TOKEN: Option<&str> = option_env!("MAPBOX_ACCESS_TOKEN");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Mapping library settings shared by every widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub access_token: String,
    /// ES module URL whose default export is the mapping library.
    pub module_url: String,
    /// Marker id of the injected stylesheet link.
    pub stylesheet_id: String,
    pub stylesheet_href: String,
    pub style_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            access_token: BUILD_ACCESS_TOKEN.unwrap_or_default().to_string(),
            module_url: "https://esm.sh/mapbox-gl@3.3.0".to_string(),
            stylesheet_id: "mapbox-gl-css".to_string(),
            stylesheet_href: "https://api.mapbox.com/mapbox-gl-js/v3.3.0/mapbox-gl.css".to_string(),
            style_url: "mapbox://styles/mapbox/dark-v11".to_string(),
        }
    }
}

impl MapConfig {
    /// Parse a (possibly partial) JSON object; missing keys keep defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn has_access_token(&self) -> bool {
        !self.access_token.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_dark_style_and_pinned_stylesheet() {
        let config = MapConfig::default();
        assert_eq!(config.stylesheet_id, "mapbox-gl-css");
        assert_eq!(config.style_url, "mapbox://styles/mapbox/dark-v11");
        assert!(config.stylesheet_href.ends_with("/v3.3.0/mapbox-gl.css"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = MapConfig::from_json_str(r#"{"access_token":"pk.test"}"#).unwrap();
        assert_eq!(config.access_token, "pk.test");
        assert!(config.has_access_token());
        assert_eq!(
            MapConfig {
                access_token: "pk.test".to_string(),
                ..MapConfig::default()
            },
            config
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = MapConfig::from_json_str("{nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let config = MapConfig {
            access_token: "  ".to_string(),
            ..MapConfig::default()
        };
        assert!(!config.has_access_token());
    }
}
