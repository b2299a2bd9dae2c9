//! User settings for abrechnungsformular
//!
//! Manages the template and stylesheet the printer works with. The settings
//! live next to the templates in the application's config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::FormPaths;
use crate::error::AbrechnungError;

/// User settings for abrechnungsformular
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Filename of the settlement document template
    #[serde(default = "default_template_file")]
    pub template_file: String,

    /// Filename of the stylesheet handed to the PDF renderer
    #[serde(default = "default_stylesheet_file")]
    pub stylesheet_file: String,

    /// Date display format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_template_file() -> String {
    "aktive_template.html".to_string()
}

fn default_stylesheet_file() -> String {
    "aktive_template.css".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            template_file: default_template_file(),
            stylesheet_file: default_stylesheet_file(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FormPaths) -> Result<Self, AbrechnungError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AbrechnungError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)?;

            Ok(settings)
        } else {
            // Create default settings; let the caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FormPaths) -> Result<(), AbrechnungError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AbrechnungError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AbrechnungError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve the configured template path
    ///
    /// Absolute filenames are honored as-is, anything else resolves against
    /// the templates directory.
    pub fn template_path(&self, paths: &FormPaths) -> PathBuf {
        resolve(&self.template_file, paths)
    }

    /// Resolve the configured stylesheet path
    pub fn stylesheet_path(&self, paths: &FormPaths) -> PathBuf {
        resolve(&self.stylesheet_file, paths)
    }
}

fn resolve(file: &str, paths: &FormPaths) -> PathBuf {
    let candidate = Path::new(file);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        paths.templates_dir().join(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert_eq!(settings.template_file, "aktive_template.html");
        assert_eq!(settings.stylesheet_file, "aktive_template.css");
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FormPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.template_file = "custom_template.html".to_string();
        settings.date_format = "%d.%m.%Y".to_string();

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.template_file, "custom_template.html");
        assert_eq!(loaded.date_format, "%d.%m.%Y");
    }

    #[test]
    fn test_load_corrupt_file_is_a_json_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FormPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, AbrechnungError::Json(_)));
    }

    #[test]
    fn test_load_without_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FormPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.template_file, "aktive_template.html");
    }

    #[test]
    fn test_template_path_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FormPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        assert_eq!(
            settings.template_path(&paths),
            paths.templates_dir().join("aktive_template.html")
        );

        let mut absolute = Settings::default();
        absolute.template_file = "/srv/templates/t.html".to_string();
        assert_eq!(
            absolute.template_path(&paths),
            PathBuf::from("/srv/templates/t.html")
        );
    }
}
