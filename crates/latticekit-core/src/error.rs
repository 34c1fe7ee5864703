//! Error handling for LatticeKit
//!
//! Provides error types for each layer of the designer:
//! - Lattice errors (site addressing and occupancy bookkeeping)
//! - Designer errors (entity store and move-session contract violations)
//!
//! All error types use `thiserror` for ergonomic error handling.
//!
//! Note that a lattice site reported as invalid or occupied while checking a
//! candidate move is *not* an error; it is an ordinary `false` answer from the
//! validity query. These types cover bookkeeping mistakes and caller bugs.

use crate::data::LatticeCoord;
use thiserror::Error;

/// Lattice error type
///
/// Raised when the occupancy table is asked to do something impossible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// The coordinate is outside the lattice extents or names a missing site
    #[error("No lattice site at {coord}")]
    InvalidSite {
        /// The offending coordinate.
        coord: LatticeCoord,
    },

    /// The site already holds another entity
    #[error("Lattice site {coord} is already occupied by entity {occupant}")]
    SiteOccupied {
        /// The contested coordinate.
        coord: LatticeCoord,
        /// Id of the entity currently holding the site.
        occupant: u64,
    },

    /// The lattice definition has no basis offsets
    #[error("Lattice basis must contain at least one site offset")]
    EmptyBasis,

    /// The lattice has no unit cells along at least one axis
    #[error("Lattice extents must be non-zero (got {columns} x {rows})")]
    EmptyExtents { columns: u32, rows: u32 },

    /// The lattice vectors do not span the plane
    #[error("Lattice vectors are degenerate (determinant {determinant})")]
    DegenerateVectors {
        /// Determinant of the 2x2 lattice-vector matrix.
        determinant: f64,
    },
}

/// Designer error type
///
/// Represents programmer errors detected by the entity store and the move
/// engine. These indicate a caller bug and are surfaced immediately.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignerError {
    /// A selection contained something the move engine cannot mirror
    #[error("Contract violation: {reason}")]
    ContractViolation {
        /// Description of the violated contract.
        reason: String,
    },

    /// An entity id did not resolve in the store
    #[error("Unknown entity {id}")]
    UnknownEntity {
        /// The unresolved id.
        id: u64,
    },

    /// A group with no members was encountered
    #[error("Group {id} has no members")]
    EmptyGroup {
        /// Id of the empty group.
        id: u64,
    },

    /// An entity already belongs to a group
    #[error("Entity {id} already belongs to group {parent}")]
    AlreadyGrouped {
        /// The entity being grouped.
        id: u64,
        /// Its current parent group.
        parent: u64,
    },

    /// A session operation was requested before `prepare`
    #[error("No active move session")]
    NoActiveSession,

    /// A reconstructed subtree has a member with no parent group
    #[error("Entity {id} was mirrored as a group member but has no parent group")]
    OrphanedGroupMember {
        /// The member whose parent lookup failed.
        id: u64,
    },
}

impl DesignerError {
    /// Create a contract violation from a message
    pub fn contract(reason: impl Into<String>) -> Self {
        DesignerError::ContractViolation {
            reason: reason.into(),
        }
    }
}

/// Main error type for LatticeKit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Lattice error
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// Designer error
    #[error(transparent)]
    Designer(#[from] DesignerError),
}

impl Error {
    /// Check if this is a caller contract violation
    ///
    /// Every designer error is one: each signals a selection or grouping
    /// request that a correct caller never makes.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Error::Designer(_))
    }

    /// Check if this is a lattice error
    pub fn is_lattice_error(&self) -> bool {
        matches!(self, Error::Lattice(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
