//! Application Configuration
//!
//! Read once at startup from an optional `window.EHUB_CONFIG` object.
//! Every field has a default, so a page without the global still works.

use serde::{Deserialize, Serialize};

const CONFIG_GLOBAL: &str = "EHUB_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Backend origin; empty means same origin
    pub api_base: String,
    pub omdb_api_base: String,
    /// OMDb key; item submission lookups are disabled when empty
    pub omdb_api_key: String,
    /// Quiet period after the last keystroke before a search request
    pub search_debounce_ms: u32,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            omdb_api_base: "https://www.omdbapi.com".to_string(),
            omdb_api_key: String::new(),
            search_debounce_ms: 250,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `window.EHUB_CONFIG`, falling back to defaults
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let value = match js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(CONFIG_GLOBAL)) {
            Ok(value) if !value.is_undefined() && !value.is_null() => value,
            _ => return Self::default(),
        };
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[Config] Ignoring invalid {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    pub fn omdb_enabled(&self) -> bool {
        !self.omdb_api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"apiBase": "https://hub.example.com", "logLevel": "debug"}"#).unwrap();
        assert_eq!(config.api_base, "https://hub.example.com");
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.omdb_api_base, "https://www.omdbapi.com");
        assert_eq!(config.log_level_filter(), log::LevelFilter::Debug);
        assert!(!config.omdb_enabled());
    }

    #[test]
    fn test_unknown_log_level_falls_back_to_info() {
        let config = AppConfig {
            log_level: "chatty".into(),
            ..Default::default()
        };
        assert_eq!(config.log_level_filter(), log::LevelFilter::Info);
    }
}
