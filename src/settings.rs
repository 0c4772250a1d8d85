//! Persistent export settings

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::FILE_EXTENSION;
use crate::util::{Error, Result};

/// Export options that persist between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Output file; defaults to the scene name next to the scene
    pub filename: Option<String>,
    pub export_animations: bool,
    /// Export selected objects instead of visible ones
    pub only_selected: bool,
    /// Frame stride while baking, >= 1
    pub sample_rate: i64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            filename: None,
            export_animations: true,
            only_selected: false,
            sample_rate: 1,
        }
    }
}

impl ExportSettings {
    /// Get settings file path
    fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("rmmodel");
            p.push("settings.json");
            p
        })
    }

    /// Load settings from the user config dir, falling back to defaults
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(&p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load settings from an explicit file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Save settings to the user config dir
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path().ok_or_else(|| Error::config("no user config directory"))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    /// Reject settings no export can run with
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate < 1 {
            return Err(Error::config(format!(
                "sample_rate must be >= 1, got {}",
                self.sample_rate
            )));
        }
        Ok(())
    }

    /// Resolve where the document is written.
    ///
    /// The file name defaults to `scene_name`, a leading `//` (relative to
    /// the scene file) is dropped, and the `.rmmodel` extension is added
    /// when missing. Relative paths resolve against `scene_dir`.
    pub fn resolve_output_path(&self, scene_name: &str, scene_dir: Option<&Path>) -> Result<PathBuf> {
        let raw = match self.filename.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => scene_name,
        };
        let raw = raw.strip_prefix("//").unwrap_or(raw);
        if raw.is_empty() {
            return Err(Error::config("no output file name and the scene has no name"));
        }

        let mut name = raw.to_string();
        let suffix = format!(".{FILE_EXTENSION}");
        if !name.ends_with(&suffix) {
            name.push_str(&suffix);
        }

        let path = PathBuf::from(name);
        if path.is_absolute() {
            return Ok(path);
        }
        match scene_dir {
            Some(dir) => Ok(dir.join(path)),
            None => Err(Error::config(format!(
                "cannot resolve relative path '{}': the scene has not been saved",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = ExportSettings::default();
        assert_eq!(s.filename, None);
        assert!(s.export_animations);
        assert!(!s.only_selected);
        assert_eq!(s.sample_rate, 1);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: ExportSettings = serde_json::from_str(r#"{ "sample_rate": 3 }"#).unwrap();
        assert_eq!(s.sample_rate, 3);
        assert!(s.export_animations);
    }

    #[test]
    fn test_validate_sample_rate() {
        for rate in [0, -1] {
            let s = ExportSettings { sample_rate: rate, ..Default::default() };
            assert!(s.validate().unwrap_err().is_configuration());
        }
    }

    #[test]
    fn test_resolve_default_name() {
        let s = ExportSettings::default();
        let dir = Path::new("/scenes/intro");
        let path = s.resolve_output_path("intro", Some(dir)).unwrap();
        assert_eq!(path, dir.join("intro.rmmodel"));
    }

    #[test]
    fn test_resolve_keeps_extension_and_strips_marker() {
        let dir = Path::new("/scenes");
        let s = ExportSettings { filename: Some("//out/model.rmmodel".into()), ..Default::default() };
        assert_eq!(s.resolve_output_path("x", Some(dir)).unwrap(), dir.join("out/model.rmmodel"));

        let s = ExportSettings { filename: Some("model.json".into()), ..Default::default() };
        assert_eq!(s.resolve_output_path("x", Some(dir)).unwrap(), dir.join("model.json.rmmodel"));
    }

    #[test]
    fn test_resolve_absolute_without_scene_dir() {
        let abs = std::env::temp_dir().join("abs_model");
        let s = ExportSettings { filename: Some(abs.display().to_string()), ..Default::default() };
        assert_eq!(s.resolve_output_path("x", None).unwrap(), abs.with_extension("rmmodel"));
    }

    #[test]
    fn test_resolve_relative_unsaved_scene() {
        let s = ExportSettings::default();
        let err = s.resolve_output_path("intro", None).unwrap_err();
        assert!(err.is_configuration());
    }
}
