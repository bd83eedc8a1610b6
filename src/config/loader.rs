//! Reading a workbench spec from YAML

use super::schema::WorkbenchSpec;
use super::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Parse a spec from YAML text without validating it.
pub fn parse_config(yaml: &str) -> Result<WorkbenchSpec> {
    serde_yaml::from_str(yaml).map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}

/// Load and validate a YAML configuration file
///
/// Relative data paths are resolved against the config file's directory.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<WorkbenchSpec> {
    let config_path = config_path.as_ref();
    let yaml_content = fs::read_to_string(config_path).map_err(|e| {
        Error::ConfigError(format!("Failed to read config file {}: {}", config_path.display(), e))
    })?;

    let mut spec = parse_config(&yaml_content)?;
    if let Some(base) = config_path.parent() {
        resolve_paths(&mut spec, base);
    }

    validate_config(&spec).map_err(|e| Error::ConfigError(format!("Invalid config: {e}")))?;
    tracing::debug!(config = %config_path.display(), "loaded config");
    Ok(spec)
}

fn resolve_paths(spec: &mut WorkbenchSpec, base: &Path) {
    if spec.data.train.is_relative() {
        spec.data.train = base.join(&spec.data.train);
    }
    if let Some(test) = spec.data.test.as_mut() {
        if test.is_relative() {
            *test = base.join(&*test);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "data:\n  train: train.csv\n  test: /abs/test.csv\ntraining:\n  epochs: 3\n").unwrap();

        let spec = load_config(&path).unwrap();
        assert_eq!(spec.data.train, dir.path().join("train.csv"));
        assert_eq!(spec.data.test.as_deref(), Some(Path::new("/abs/test.csv")));
        assert_eq!(spec.training.epochs, 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config("/nonexistent/config.yaml").unwrap_err();
        assert!(matches!(err, Error::ConfigError(ref m) if m.contains("Failed to read")));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "data: [unclosed").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigError(ref m) if m.contains("parse")));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "data:\n  train: t.csv\nsplit:\n  val_ratio: 1.0").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigError(ref m) if m.contains("Invalid config")));
    }
}
