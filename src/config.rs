// SPDX-License-Identifier: GPL-3.0-only

use crate::app_settings;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Layout used when the preference store has no stored layout.
    pub default_layout: Layout,
    /// Preference key the active layout is persisted under.
    pub preference_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_layout: Layout::Latin,
            preference_key: app_settings::LAYOUT_PREFERENCE_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.default_layout, Layout::Latin);
        assert_eq!(config.preference_key, "lang");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"default_layout": "ru"}"#).unwrap();
        assert_eq!(config.default_layout, Layout::Cyrillic);
        assert_eq!(config.preference_key, "lang");

        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        assert!(EngineConfig::from_json(r#"{"default_layout": "greek"}"#).is_err());
    }
}
