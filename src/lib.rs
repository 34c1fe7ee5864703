//! # LatticeKit
//!
//! Placement designer for lattice-based layouts: point entities occupy
//! lattice sites, electrodes and AFM scan areas sit freely on the canvas, and
//! any of them can be grouped and dragged together with a validated preview.
//!
//! ## Architecture
//!
//! 1. **latticekit-core** - Value types, lattice coordinates, errors
//! 2. **latticekit-settings** - Ghost and lattice configuration, persistence
//! 3. **latticekit-designer** - Entity store, lattice, move engine, canvas
//! 4. **latticekit** - Demo binary tying the crates together

pub use latticekit_core::{
    DesignerError, Error, LatticeCoord, LatticeError, Result, Rgba, ScenePoint, SceneRect,
};
pub use latticekit_designer as designer;
pub use latticekit_designer::{
    AggNode, AreaKind, DesignCanvas, EntityId, EntityStore, Lattice, LeafKind, MoveEngine,
    SiteLattice,
};
pub use latticekit_settings::{Config, GhostSettings, LatticeSettings, PivotPolicy};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Pretty console output filtered through `RUST_LOG`, INFO and above by
/// default.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.as_str()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
