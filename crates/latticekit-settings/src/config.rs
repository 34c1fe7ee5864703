//! Configuration and settings management for LatticeKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats, stored by default in the
//! platform-specific configuration directory.
//!
//! Configuration is organized into logical sections:
//! - Ghost settings (move-preview appearance and pivot policy)
//! - Lattice settings (lattice vectors, basis, extents, scale)

use latticekit_core::{LatticeCoord, Rgba};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Which previews contribute to the computed pivot of a move session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PivotPolicy {
    /// Only point previews span the pivot bounding box
    #[default]
    PointsOnly,
    /// Point and area previews both span the pivot bounding box
    PointsAndAreas,
}

impl std::fmt::Display for PivotPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PointsOnly => write!(f, "points only"),
            Self::PointsAndAreas => write!(f, "points and areas"),
        }
    }
}

/// Move-preview appearance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GhostSettings {
    /// Diameter of a point preview marker in scene units
    pub dot_diameter: f64,
    /// Marker colour while the candidate placement is valid
    pub valid_color: Rgba,
    /// Marker colour while the candidate placement is invalid
    pub invalid_color: Rgba,
    /// Fill colour of area previews
    pub box_color: Rgba,
    /// Pivot computation policy
    pub pivot_policy: PivotPolicy,
}

impl Default for GhostSettings {
    fn default() -> Self {
        Self {
            dot_diameter: 75.0,
            valid_color: Rgba::new(0, 0, 255, 120),
            invalid_color: Rgba::new(255, 0, 0, 120),
            box_color: Rgba::new(0, 128, 255, 60),
            pivot_policy: PivotPolicy::default(),
        }
    }
}

/// Lattice geometry settings
///
/// Lengths are in lattice units (angstrom for the default H-Si(100)-2x1
/// surface) and converted to scene units with `scale_factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeSettings {
    /// First lattice vector
    pub a1: [f64; 2],
    /// Second lattice vector
    pub a2: [f64; 2],
    /// Site offsets within one unit cell; the first must be the cell origin
    pub basis: Vec<[f64; 2]>,
    /// Number of unit cells along `a1`
    pub columns: u32,
    /// Number of unit cells along `a2`
    pub rows: u32,
    /// Scene units per lattice unit
    pub scale_factor: f64,
    /// Sites that are missing from the surface
    pub disabled_sites: Vec<LatticeCoord>,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            a1: [3.84, 0.0],
            a2: [0.0, 7.68],
            basis: vec![[0.0, 0.0], [0.0, 2.25]],
            columns: 64,
            rows: 32,
            scale_factor: 50.0,
            disabled_sites: Vec::new(),
        }
    }
}

/// Complete designer configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Move-preview settings
    pub ghost: GhostSettings,
    /// Lattice geometry
    pub lattice: LatticeSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the user configuration file
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDirectory {
            os: std::env::consts::OS,
        })?;
        Ok(dir.join("latticekit").join("config.toml"))
    }

    /// Load config from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; a present but broken file is an error.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from_file(&path)
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            other => return Err(unsupported(other)),
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => return Err(unsupported(other)),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let ghost = &self.ghost;
        if !(ghost.dot_diameter > 0.0) {
            return Err(invalid("ghost.dot_diameter", "must be > 0"));
        }

        let lattice = &self.lattice;
        if !(lattice.scale_factor > 0.0) {
            return Err(invalid("lattice.scale_factor", "must be > 0"));
        }
        if lattice.columns == 0 {
            return Err(ConfigError::out_of_range("lattice.columns", lattice.columns).into());
        }
        if lattice.rows == 0 {
            return Err(ConfigError::out_of_range("lattice.rows", lattice.rows).into());
        }

        let det = lattice.a1[0] * lattice.a2[1] - lattice.a1[1] * lattice.a2[0];
        if det.abs() < 1e-9 {
            return Err(invalid("lattice.a1/a2", "lattice vectors must not be parallel"));
        }

        match lattice.basis.first() {
            None => return Err(invalid("lattice.basis", "must contain at least one site")),
            Some(origin) if *origin != [0.0, 0.0] => {
                return Err(invalid("lattice.basis", "first site must be the cell origin"))
            }
            Some(_) => {}
        }

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn unsupported(extension: Option<&str>) -> SettingsError {
    ConfigError::UnsupportedFormat {
        extension: extension.unwrap_or_default().to_string(),
    }
    .into()
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
