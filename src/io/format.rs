//! Model bundle file formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encodings a model bundle can be written in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    #[default]
    Json,
    Yaml,
}

impl ModelFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| format!("Unknown model format: {s}. Valid formats: json, yaml"))
    }
}

/// Options for [`save_bundle`](super::save_bundle)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveConfig {
    pub format: ModelFormat,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl SaveConfig {
    pub fn new(format: ModelFormat) -> Self {
        Self { format, pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(ModelFormat::from_extension("json"), Some(ModelFormat::Json));
        assert_eq!(ModelFormat::from_extension("YML"), Some(ModelFormat::Yaml));
        assert_eq!(ModelFormat::from_extension("yaml"), Some(ModelFormat::Yaml));
        assert_eq!(ModelFormat::from_extension("bin"), None);
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("yaml".parse::<ModelFormat>(), Ok(ModelFormat::Yaml));
        assert!("gguf".parse::<ModelFormat>().unwrap_err().contains("Valid formats"));
        assert_eq!(ModelFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_serde_lowercase() {
        let f: ModelFormat = serde_yaml::from_str("yaml").unwrap();
        assert_eq!(f, ModelFormat::Yaml);
        assert_eq!(serde_json::to_string(&ModelFormat::Json).unwrap(), "\"json\"");
    }

    #[test]
    fn test_save_config_builder() {
        let config = SaveConfig::new(ModelFormat::Json).with_pretty(false);
        assert!(!config.pretty);
        assert_eq!(config.format, ModelFormat::Json);
    }
}
