//! Model bundle saving

use super::format::{ModelFormat, SaveConfig};
use super::model::ModelBundle;
use crate::{Error, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save a bundle to `path` in the configured format.
///
/// # Example
///
/// ```no_run
/// use rescate::io::{save_bundle, ModelFormat, SaveConfig};
/// # fn demo(bundle: &rescate::io::ModelBundle) -> rescate::Result<()> {
/// save_bundle(bundle, "output/model.json", &SaveConfig::new(ModelFormat::Json))?;
/// # Ok(())
/// # }
/// ```
pub fn save_bundle(bundle: &ModelBundle, path: impl AsRef<Path>, config: &SaveConfig) -> Result<()> {
    let path = path.as_ref();

    let data = match config.format {
        ModelFormat::Json => {
            if config.pretty {
                serde_json::to_string_pretty(bundle)
                    .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?
            } else {
                serde_json::to_string(bundle)
                    .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?
            }
        }
        ModelFormat::Yaml => serde_yaml::to_string(bundle)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}")))?,
    };

    let mut file =
        File::create(path).map_err(|e| Error::Io(format!("Failed to create {}: {e}", path.display())))?;
    file.write_all(data.as_bytes())?;

    tracing::info!(path = %path.display(), format = %config.format, "saved model bundle");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::model::tests::bundle;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_bundle_json() {
        let temp_file = NamedTempFile::new().unwrap();
        save_bundle(&bundle(), temp_file.path(), &SaveConfig::new(ModelFormat::Json)).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("titanic"));
        assert!(content.contains("dense_1/kernel"));
        assert!(content.contains("age_median"));
    }

    #[test]
    fn test_save_bundle_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        save_bundle(&bundle(), temp_file.path(), &SaveConfig::new(ModelFormat::Yaml)).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("hidden_activation: relu"));
    }

    #[test]
    fn test_save_bundle_json_compact() {
        let temp_file = NamedTempFile::new().unwrap();
        let config = SaveConfig::new(ModelFormat::Json).with_pretty(false);
        save_bundle(&bundle(), temp_file.path(), &config).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("model.json");
        let err = save_bundle(&bundle(), &path, &SaveConfig::new(ModelFormat::Json)).unwrap_err();
        assert!(matches!(err, Error::Io(ref m) if m.contains("model.json")));
    }
}
