//! Design canvas: entities on a lattice plus one drag session.
//!
//! The canvas is the caller the move engine expects. It translates pointer
//! positions into lattice offsets, keeps the validity indicator current, and
//! on commit writes the new sites and positions back into the store and the
//! lattice occupancy table.

use latticekit_core::{Error, LatticeCoord, LatticeError, Result, ScenePoint};
use latticekit_settings::Config;
use tracing::{debug, info, warn};

use crate::ghost::MoveEngine;
use crate::lattice::{Lattice, MaskedLattice, SiteLattice};
use crate::model::{AreaKind, EntityId, EntityStore};

/// Canvas state: entity store, lattice, and the move preview.
#[derive(Debug)]
pub struct DesignCanvas {
    pub store: EntityStore,
    pub lattice: SiteLattice,
    ghost: MoveEngine,
}

impl DesignCanvas {
    /// Creates an empty canvas from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            store: EntityStore::new(),
            lattice: SiteLattice::from_settings(&config.lattice)?,
            ghost: MoveEngine::new(config.ghost.clone()),
        })
    }

    /// Creates a canvas around an existing lattice.
    pub fn with_lattice(lattice: SiteLattice, ghost: MoveEngine) -> Self {
        Self {
            store: EntityStore::new(),
            lattice,
            ghost,
        }
    }

    /// Places a point entity on `site`.
    pub fn add_point(&mut self, site: LatticeCoord) -> Result<EntityId> {
        if !self.lattice.is_valid_site(site) {
            return Err(LatticeError::InvalidSite { coord: site }.into());
        }
        if let Some(occupant) = self.lattice.occupant(site) {
            return Err(LatticeError::SiteOccupied {
                coord: site,
                occupant,
            }
            .into());
        }

        let id = self
            .store
            .add_point(site, self.lattice.coord_to_scene_pos(site));
        self.lattice.occupy(site, id)?;
        Ok(id)
    }

    /// Places an area entity with its top-left corner at `top_left`.
    pub fn add_area(
        &mut self,
        kind: AreaKind,
        top_left: ScenePoint,
        width: f64,
        height: f64,
    ) -> EntityId {
        self.store.add_area(kind, top_left, width, height)
    }

    /// Groups top-level entities.
    pub fn group(&mut self, members: &[EntityId]) -> Result<EntityId> {
        Ok(self.store.group(members)?)
    }

    pub fn ghost(&self) -> &MoveEngine {
        &self.ghost
    }

    pub fn is_dragging(&self) -> bool {
        self.ghost.is_active()
    }

    /// Starts dragging `selection` with the pointer at `cursor`.
    pub fn begin_drag(&mut self, selection: &[EntityId], cursor: ScenePoint) -> Result<()> {
        self.ghost.prepare(&self.store, selection, Some(cursor))?;
        Ok(())
    }

    /// Follows the pointer; returns whether the previewed placement is valid.
    ///
    /// Selections with point entities snap to lattice sites through the
    /// anchor; area-only selections follow the pointer freely.
    pub fn drag_to(&mut self, cursor: ScenePoint) -> Result<bool> {
        if !self.ghost.is_active() {
            return Err(latticekit_core::DesignerError::NoActiveSession.into());
        }

        let Some(anchor) = self.ghost.anchor_preview().map(|p| p.lattice_coord()) else {
            self.ghost.move_to(cursor);
            return Ok(self.ghost.is_valid());
        };

        let free = self.ghost.free_anchor(cursor);
        let Some(target) = self.lattice.nearest_site_in_basis(free, anchor.l) else {
            return Ok(self.ghost.is_valid());
        };
        let offset = target - anchor;
        if offset.is_zero() {
            return Ok(self.ghost.is_valid());
        }

        let masked = MaskedLattice::new(&self.lattice, self.selection_sites());
        let valid = self.ghost.check_valid(offset, &masked)?;
        self.ghost.move_by_coordinate(offset, &self.lattice);
        self.ghost.set_valid(valid);
        debug!("Snapped drag by {} (valid: {})", offset, valid);
        Ok(valid)
    }

    /// Original sites of the point entities being dragged.
    fn selection_sites(&self) -> Vec<LatticeCoord> {
        self.ghost
            .point_sources()
            .iter()
            .filter_map(|id| self.store.get(*id).and_then(|e| e.site()))
            .collect()
    }

    /// Applies the previewed move and ends the session.
    ///
    /// The previewed sites are validated again against the current lattice,
    /// since entities may have been placed after the last [`drag_to`]. Nothing
    /// is written unless every target is free; otherwise the move is
    /// discarded and an empty list returned.
    ///
    /// [`drag_to`]: Self::drag_to
    pub fn commit(&mut self) -> Result<Vec<EntityId>> {
        let top = self.ghost.top_items(&self.store)?;

        let still_valid = {
            let masked = MaskedLattice::new(&self.lattice, self.selection_sites());
            self.ghost.check_valid(LatticeCoord::ZERO, &masked)?
        };
        if !self.ghost.is_valid() || !still_valid {
            warn!("Discarding invalid move");
            self.ghost.clean();
            return Ok(Vec::new());
        }

        let moves: Vec<(EntityId, LatticeCoord, LatticeCoord)> = self
            .ghost
            .point_sources()
            .iter()
            .zip(self.ghost.point_previews())
            .filter_map(|(id, preview)| {
                let old = self.store.get(*id)?.site()?;
                Some((*id, old, preview.lattice_coord()))
            })
            .collect();

        for (_, old, _) in &moves {
            self.lattice.vacate(*old);
        }
        for (id, _, new) in &moves {
            self.lattice.occupy(*new, *id).map_err(Error::from)?;
            self.store.set_site(*id, *new);
            self.store
                .set_position(*id, self.lattice.coord_to_scene_pos(*new));
        }

        let delta = self.ghost.origin();
        for id in self.ghost.area_sources() {
            self.store.translate(*id, delta);
        }

        info!(
            "Committed move of {} top-level item(s), displacement {}",
            top.len(),
            delta
        );
        self.ghost.clean();
        Ok(top)
    }

    /// Abandons the drag; entities are untouched.
    pub fn cancel(&mut self) {
        if self.ghost.is_active() {
            debug!("Drag cancelled");
        }
        self.ghost.clean();
    }
}
