use core::fmt;
use std::env;

use thiserror::Error;

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const GEOCODE_URL_VAR: &str = "GOOGLE_MAPS_GEOCODE_URL";

const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
const PLACES_SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingApiKey(&'static str),
}

/// Settings for the Google Maps platform, built once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct MapsConfig {
    pub api_key: String,
    pub geocode_url: String,
}

impl MapsConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_owned(),
        }
    }

    #[must_use]
    pub fn with_geocode_url(mut self, geocode_url: impl Into<String>) -> Self {
        self.geocode_url = geocode_url.into();
        self
    }

    /// Reads `GOOGLE_MAPS_API_KEY` and, optionally, `GOOGLE_MAPS_GEOCODE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(API_KEY_VAR))?;
        let config = Self::new(api_key);
        Ok(match lookup(GEOCODE_URL_VAR).filter(|url| !url.is_empty()) {
            Some(url) => config.with_geocode_url(url),
            None => config,
        })
    }

    /// Source of the Maps JavaScript loader with the Places library.
    #[must_use]
    pub fn places_script_src(&self) -> String {
        format!("{PLACES_SCRIPT_URL}?key={}&libraries=places", self.api_key)
    }
}

impl fmt::Debug for MapsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapsConfig")
            .field("api_key", &"<redacted>")
            .field("geocode_url", &self.geocode_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_key_only_uses_default_endpoint() {
        let config = MapsConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "abc123")])).unwrap();
        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.geocode_url, DEFAULT_GEOCODE_URL);
    }

    #[test]
    fn test_endpoint_can_be_overridden() {
        let config = MapsConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "abc123"),
            (GEOCODE_URL_VAR, "http://127.0.0.1:9000/geocode/json"),
        ]))
        .unwrap();
        assert_eq!(config.geocode_url, "http://127.0.0.1:9000/geocode/json");
    }

    #[test]
    fn test_missing_or_blank_key_is_an_error() {
        assert_eq!(
            MapsConfig::from_lookup(lookup_from(&[])),
            Err(ConfigError::MissingApiKey(API_KEY_VAR))
        );
        assert_eq!(
            MapsConfig::from_lookup(lookup_from(&[(API_KEY_VAR, " ")])),
            Err(ConfigError::MissingApiKey(API_KEY_VAR))
        );
    }

    #[test]
    fn test_places_script_src() {
        assert_eq!(
            MapsConfig::new("abc123").places_script_src(),
            "https://maps.googleapis.com/maps/api/js?key=abc123&libraries=places"
        );
    }

    #[test]
    fn test_debug_hides_api_key() {
        let debug = format!("{:?}", MapsConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
