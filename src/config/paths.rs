//! Path management for abrechnungsformular
//!
//! Provides XDG-compliant path resolution for configuration and templates.
//!
//! ## Path Resolution Order
//!
//! 1. `ABRECHNUNG_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/abrechnungsformular` or
//!    `~/.config/abrechnungsformular`
//! 3. Windows: `%APPDATA%\abrechnungsformular`

use std::path::PathBuf;

use crate::error::AbrechnungError;

/// Manages all paths used by abrechnungsformular
#[derive(Debug, Clone)]
pub struct FormPaths {
    /// Base directory for all application data
    base_dir: PathBuf,
}

impl FormPaths {
    /// Create a new FormPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AbrechnungError> {
        let base_dir = if let Ok(custom) = std::env::var("ABRECHNUNG_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create FormPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/abrechnungsformular/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the directory holding the document templates
    pub fn templates_dir(&self) -> PathBuf {
        self.base_dir.join("templates")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), AbrechnungError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AbrechnungError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.templates_dir()).map_err(|e| {
            AbrechnungError::Io(format!("Failed to create templates directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if the application has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AbrechnungError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| {
            std::env::var("HOME").map(|home| PathBuf::from(home).join(".config"))
        })
        .map_err(|_| AbrechnungError::Config("Could not determine home directory".into()))?;
    Ok(config_base.join("abrechnungsformular"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AbrechnungError> {
    // Windows: Use APPDATA
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AbrechnungError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("abrechnungsformular"))
}
