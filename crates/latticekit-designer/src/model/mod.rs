//! Entity model: point entities pinned to lattice sites, free-form area
//! entities, and groups of either.

mod store;

pub use store::EntityStore;

use latticekit_core::{LatticeCoord, ScenePoint};
use serde::{Deserialize, Serialize};

/// Identifier of an entity in an [`EntityStore`].
pub type EntityId = u64;

/// Flavour of a free-form rectangular region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaKind {
    Electrode,
    AfmArea,
}

/// Variant tag of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Point,
    Area(AreaKind),
    Group,
}

/// Variant payload of an entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Occupies exactly one lattice site
    Point { site: LatticeCoord },
    /// Rectangle anchored at the entity position (top-left corner)
    Area {
        kind: AreaKind,
        width: f64,
        height: f64,
    },
    /// Ordered members, possibly nested groups
    Group { children: Vec<EntityId> },
}

/// An entity on the design canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    /// Group this entity belongs to, if any
    pub parent: Option<EntityId>,
    /// Scene position; site centre for points, top-left corner for areas.
    /// Unused for groups, see [`EntityStore::position`].
    pub position: ScenePoint,
    pub kind: EntityKind,
}

impl Entity {
    pub fn entity_type(&self) -> EntityType {
        match &self.kind {
            EntityKind::Point { .. } => EntityType::Point,
            EntityKind::Area { kind, .. } => EntityType::Area(*kind),
            EntityKind::Group { .. } => EntityType::Group,
        }
    }

    /// Ordered members of a group; empty for leaves.
    pub fn children(&self) -> &[EntityId] {
        match &self.kind {
            EntityKind::Group { children } => children,
            _ => &[],
        }
    }

    /// Lattice site of a point entity.
    pub fn site(&self) -> Option<LatticeCoord> {
        match self.kind {
            EntityKind::Point { site } => Some(site),
            _ => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, EntityKind::Group { .. })
    }
}
