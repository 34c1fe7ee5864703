//! # LatticeKit Designer
//!
//! Placement and move tooling for lattice designs. Point entities sit on
//! lattice sites, area entities (electrodes, AFM scan areas) sit anywhere on
//! the canvas, and groups nest either.
//!
//! ## Core Components
//!
//! - **Model**: [`EntityStore`] arena of points, areas and groups
//! - **Lattice**: the [`Lattice`] query trait and the concrete [`SiteLattice`]
//! - **Ghost**: [`MoveEngine`], the move preview that mirrors a selection,
//!   snaps it to sites, validates placements and resolves the committed items
//! - **Canvas**: [`DesignCanvas`], which drives a drag session end to end
//!
//! ## Architecture
//!
//! ```text
//! DesignCanvas
//!   ├── EntityStore (entities, parent/child links)
//!   ├── SiteLattice (site geometry, occupancy table)
//!   └── MoveEngine  (aggregation tree, point/area previews)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use latticekit_core::{LatticeCoord, ScenePoint};
//! use latticekit_designer::DesignCanvas;
//! use latticekit_settings::Config;
//!
//! let config = Config::default();
//! let mut canvas = DesignCanvas::new(&config).unwrap();
//! let dot = canvas.add_point(LatticeCoord::new(4, 4, 0)).unwrap();
//! let start = canvas.store.position(dot).unwrap();
//!
//! canvas.begin_drag(&[dot], start).unwrap();
//! let two_cells = canvas.lattice.scale() * config.lattice.a1[0] * 2.0;
//! assert!(canvas.drag_to(ScenePoint::new(start.x + two_cells, start.y)).unwrap());
//! assert_eq!(canvas.commit().unwrap(), vec![dot]);
//! assert_eq!(canvas.store.get(dot).unwrap().site(), Some(LatticeCoord::new(6, 4, 0)));
//! ```

pub mod canvas;
pub mod ghost;
pub mod lattice;
pub mod model;

pub use canvas::DesignCanvas;
pub use ghost::{
    AggNode, AreaPreview, LeafKind, MoveEngine, NodeKind, PointPreview, SharedIndicator,
    ValidityIndicator,
};
pub use lattice::{Lattice, MaskedLattice, SiteLattice};
pub use model::{AreaKind, Entity, EntityId, EntityKind, EntityStore, EntityType};
