//! Badge configuration.
//!
//! A small JSON object, every key optional:
//!
//! ```json
//! { "default_flag": "pride", "title": "Alex", "subtitle": "they/them", "qrcode": "https://example.com" }
//! ```
//!
//! The file itself must exist and parse. Missing keys fall back to defaults
//! and an unknown flag name selects the first flag.

use alloc::string::{
    String,
    ToString,
};
use core::fmt;

use serde::Deserialize;

use crate::variant;

/// Where the firmware looks for its configuration.
pub const CONFIG_PATH: &str = "config.json";

pub const DEFAULT_TITLE: &str = "Lorem";
pub const DEFAULT_SUBTITLE: &str = "Ipsum edit";
pub const DEFAULT_QR_PAYLOAD: &str = "https://example.com";

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No file at the configured path
    NotFound,
    /// File is not a JSON object of string fields
    Malformed { line: usize, column: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound => write!(f, "{CONFIG_PATH} not found"),
            ConfigError::Malformed { line, column } => {
                write!(f, "{CONFIG_PATH} is malformed at line {line}, column {column}")
            }
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Malformed {
            line: e.line(),
            column: e.column(),
        }
    }
}

/// Read access to configuration files.
pub trait ConfigSource {
    fn read(&self, path: &str) -> Option<&[u8]>;
}

/// The file as written, before defaults.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    default_flag: Option<String>,
    title: Option<String>,
    subtitle: Option<String>,
    qrcode: Option<String>,
}

/// Loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Index into [`variant::VARIANTS`]
    pub flag_index: usize,
    pub title: String,
    pub subtitle: String,
    pub qr_payload: String,
    /// Set when `default_flag` named a flag that does not exist
    pub unknown_flag: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            flag_index: 0,
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            qr_payload: DEFAULT_QR_PAYLOAD.to_string(),
            unknown_flag: false,
        }
    }
}

impl Config {
    /// Read and parse `path` from `source`.
    pub fn load<S: ConfigSource + ?Sized>(source: &S, path: &str) -> Result<Self, ConfigError> {
        let bytes = source.read(path).ok_or(ConfigError::NotFound)?;
        Self::from_json(bytes)
    }

    /// Parse a JSON document and apply defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_slice(bytes)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawConfig) -> Self {
        let defaults = Self::default();
        let (flag_index, unknown_flag) = match raw.default_flag.as_deref() {
            Some(name) => match variant::find(name) {
                Some(index) => (index, false),
                None => (0, true),
            },
            None => (0, false),
        };
        Self {
            flag_index,
            title: raw.title.unwrap_or(defaults.title),
            subtitle: raw.subtitle.unwrap_or(defaults.subtitle),
            qr_payload: raw.qrcode.unwrap_or(defaults.qr_payload),
            unknown_flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneFile(&'static str, &'static [u8]);

    impl ConfigSource for OneFile {
        fn read(&self, path: &str) -> Option<&[u8]> {
            (path == self.0).then_some(self.1)
        }
    }

    #[test]
    fn test_title_only() {
        let config = Config::from_json(br#"{"title":"X"}"#).unwrap();
        assert_eq!(config.title, "X");
        assert_eq!(config.subtitle, DEFAULT_SUBTITLE);
        assert_eq!(config.flag_index, 0);
        assert_eq!(config.qr_payload, DEFAULT_QR_PAYLOAD);
        assert!(!config.unknown_flag);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Config::from_json(b"{}").unwrap(), Config::default());
    }

    #[test]
    fn test_full_config() {
        let json = br#"{
            "default_flag": "pride",
            "title": "Alex",
            "subtitle": "they/them",
            "qrcode": "https://example.org/alex",
            "extra": 1
        }"#;
        let config = Config::from_json(json).unwrap();
        assert_eq!(config.flag_index, 1);
        assert_eq!(config.title, "Alex");
        assert_eq!(config.subtitle, "they/them");
        assert_eq!(config.qr_payload, "https://example.org/alex");
    }

    #[test]
    fn test_unknown_flag_falls_back() {
        let config = Config::from_json(br#"{"default_flag":"checkered"}"#).unwrap();
        assert_eq!(config.flag_index, 0);
        assert!(config.unknown_flag);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            Config::from_json(b"{\"title\": "),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            Config::from_json(br#"{"title": 5}"#),
            Err(ConfigError::Malformed { .. })
        ));
        assert!(matches!(
            Config::from_json(b"[]"),
            Err(ConfigError::Malformed { .. })
        ));
    }

    #[test]
    fn test_load_from_source() {
        let source = OneFile(CONFIG_PATH, br#"{"subtitle":"hi"}"#);
        let config = Config::load(&source, CONFIG_PATH).unwrap();
        assert_eq!(config.subtitle, "hi");
        assert_eq!(
            Config::load(&source, "other.json"),
            Err(ConfigError::NotFound)
        );
    }

    #[test]
    fn test_error_display() {
        let e = ConfigError::Malformed { line: 2, column: 7 };
        assert_eq!(
            e.to_string(),
            "config.json is malformed at line 2, column 7"
        );
    }
}
