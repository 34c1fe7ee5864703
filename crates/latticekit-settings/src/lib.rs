//! LatticeKit Settings Crate
//!
//! Handles designer configuration: preview (ghost) appearance, lattice
//! geometry, and the pivot policy used by the move engine.

pub mod config;
pub mod error;

pub use config::{Config, GhostSettings, LatticeSettings, PivotPolicy};
pub use error::{ConfigError, SettingsError, SettingsResult};
