//! # LatticeKit Core
//!
//! Core value types and utilities shared by every LatticeKit crate.
//! Provides lattice coordinates, scene geometry, colours, the unified
//! error type, and the shared-ownership aliases used by the designer.

pub mod data;
pub mod error;
pub mod types;

pub use data::{LatticeCoord, Rgba, ScenePoint, SceneRect};

pub use error::{DesignerError, Error, LatticeError, Result};

pub use types::{shared, Shared, WeakShared};
