//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use shumoku::{ShumokuError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for ShumokuError {
    fn from(err: ConfigError) -> Self {
        ShumokuError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (shumoku/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ShumokuError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("shumoku/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "shumoku", "shumoku") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate configuration from a TOML file
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ShumokuError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<AppConfig, ShumokuError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    config
        .style()
        .background_color()
        .map_err(ConfigError::Validation)?;

    let layout = config.layout();
    let spacings = [
        layout.node_spacing(),
        layout.rank_spacing(),
        layout.subgraph_padding(),
    ];
    if spacings.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(ConfigError::Validation("layout spacing must be a non-negative number".to_string()).into());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shumoku::shumoku_core::model::{EdgeStyle, Theme};

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r##"
[layout]
node_spacing = 80
rank_spacing = 120

[style]
background_color = "#fafafa"
theme = "dark"
edge_style = "splines"
"##,
        )
        .expect("valid config");

        assert_eq!(config.layout().node_spacing(), 80.0);
        assert_eq!(config.layout().rank_spacing(), 120.0);
        assert_eq!(config.style().theme(), Some(Theme::Dark));
        assert_eq!(config.style().edge_style(), Some(EdgeStyle::Splines));
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[layout\nnode_spacing = 1").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"), "{err}");
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let err = parse_config("[style]\nbackground_color = \"nope\"").unwrap_err();
        assert!(err.to_string().contains("Validation error"), "{err}");
    }

    #[test]
    fn test_negative_spacing_is_rejected() {
        let err = parse_config("[layout]\nnode_spacing = -5").unwrap_err();
        assert!(err.to_string().contains("non-negative"), "{err}");
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = load_config(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ShumokuError::Config(msg) if msg.contains("Missing configuration file")));
    }
}
