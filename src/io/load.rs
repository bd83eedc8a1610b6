//! Model bundle loading

use super::format::ModelFormat;
use super::model::ModelBundle;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a bundle, detecting the format from the file extension.
pub fn load_bundle(path: impl AsRef<Path>) -> Result<ModelBundle> {
    let path = path.as_ref();

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::Serialization(format!("{} has no extension", path.display())))?;
    let format = ModelFormat::from_extension(ext)
        .ok_or_else(|| Error::Serialization(format!("Unsupported file extension: {ext}")))?;

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::InputMissing(path.display().to_string()),
        _ => Error::Io(format!("Failed to read {}: {e}", path.display())),
    })?;

    let bundle: ModelBundle = match format {
        ModelFormat::Json => serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?,
        ModelFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| Error::Serialization(format!("YAML deserialization failed: {e}")))?,
    };

    tracing::debug!(path = %path.display(), name = %bundle.metadata.name, "loaded model bundle");
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::model::tests::bundle;
    use crate::io::{save_bundle, SaveConfig};
    use tempfile::tempdir;

    #[test]
    fn test_json_round_trip_is_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        let original = bundle();
        save_bundle(&original, &path, &SaveConfig::new(ModelFormat::Json)).unwrap();
        assert_eq!(load_bundle(&path).unwrap(), original);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.yml");
        let original = bundle();
        save_bundle(&original, &path, &SaveConfig::new(ModelFormat::Yaml)).unwrap();
        let loaded = load_bundle(&path).unwrap();
        assert_eq!(loaded.metadata, original.metadata);
        assert_eq!(loaded.topology, original.topology);
        assert_eq!(loaded.tensors.len(), original.tensors.len());
    }

    #[test]
    fn test_unknown_extension() {
        let err = load_bundle("model.bin").unwrap_err();
        assert!(matches!(err, Error::Serialization(ref m) if m.contains("bin")));
        assert!(matches!(load_bundle("model"), Err(Error::Serialization(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_bundle(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::InputMissing(_)));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_bundle(&path), Err(Error::Serialization(_))));
    }
}
