//! Configuration module for abrechnungsformular
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence (template and stylesheet selection)

pub mod paths;
pub mod settings;

pub use paths::FormPaths;
pub use settings::Settings;
