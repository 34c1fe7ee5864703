//! Move preview ("ghost") for dragging selections across the lattice.
//!
//! A [`MoveEngine`] mirrors a selection into an [`AggNode`] tree plus flat
//! lists of point and area previews, moves the previews rigidly, checks
//! candidate lattice offsets, and finally maps the tree back onto the
//! original entities.
//!
//! ```text
//! prepare(selection) ──► move_to / move_by_coordinate ──► check_valid ──┐
//!        ▲                         ▲                                    │
//!        │                         └────────────────────────────────────┘
//!        └──── clean() ◄── top_items() (commit) or discard
//! ```
//!
//! The engine is owned by its caller; there is at most one session per
//! engine and a new `prepare` discards the previous one.

mod aggregation;
mod preview;

pub use aggregation::{AggNode, LeafKind, Leaves, NodeKind};
pub use preview::{AreaPreview, PointPreview, SharedIndicator, ValidityIndicator};

use std::collections::HashSet;

use latticekit_core::{shared, DesignerError, LatticeCoord, SceneRect, ScenePoint};
use latticekit_settings::{GhostSettings, PivotPolicy};
use tracing::{debug, info, warn};

use crate::lattice::Lattice;
use crate::model::{AreaKind, EntityId, EntityKind, EntityStore};

/// Preview session for moving a selection.
#[derive(Debug)]
pub struct MoveEngine {
    settings: GhostSettings,
    active: bool,
    origin: ScenePoint,
    pivot: ScenePoint,
    pivot_offset: ScenePoint,
    anchor: Option<usize>,
    anchor_offset: ScenePoint,
    valid: bool,
    indicator: SharedIndicator,
    root: AggNode,
    point_sources: Vec<EntityId>,
    point_previews: Vec<PointPreview>,
    area_sources: Vec<EntityId>,
    area_previews: Vec<AreaPreview>,
}

impl Default for MoveEngine {
    fn default() -> Self {
        Self::new(GhostSettings::default())
    }
}

impl MoveEngine {
    pub fn new(settings: GhostSettings) -> Self {
        let indicator = shared(ValidityIndicator {
            valid: true,
            color: settings.valid_color,
        });
        Self {
            settings,
            active: false,
            origin: ScenePoint::ORIGIN,
            pivot: ScenePoint::ORIGIN,
            pivot_offset: ScenePoint::ORIGIN,
            anchor: None,
            anchor_offset: ScenePoint::ORIGIN,
            valid: true,
            indicator,
            root: AggNode::default(),
            point_sources: Vec::new(),
            point_previews: Vec::new(),
            area_sources: Vec::new(),
            area_previews: Vec::new(),
        }
    }

    pub fn settings(&self) -> &GhostSettings {
        &self.settings
    }

    /// Changes the pivot policy used by later [`prepare`](Self::prepare) calls.
    pub fn set_pivot_policy(&mut self, policy: PivotPolicy) {
        self.settings.pivot_policy = policy;
    }

    /// Starts a session for `selection`.
    ///
    /// Any unfinished session is discarded first. `start` pins the pivot to a
    /// known drag-start point; otherwise the pivot is the centre of the
    /// preview bounding box. On error the engine is left clean.
    pub fn prepare(
        &mut self,
        store: &EntityStore,
        selection: &[EntityId],
        start: Option<ScenePoint>,
    ) -> Result<(), DesignerError> {
        self.clean();

        let mut visited = HashSet::new();
        let mut top = Vec::with_capacity(selection.len());
        for &id in selection {
            if let Err(err) = self.mirror(store, id, &mut top, &mut visited) {
                warn!("Rejecting selection: {}", err);
                self.clean();
                return Err(err);
            }
        }
        self.root = AggNode::Group(top);
        self.active = true;

        self.pivot = self.compute_pivot(start);
        self.pivot_offset = self.pivot - self.origin;
        self.compute_anchor();

        info!(
            "Prepared move preview: {} point(s), {} area(s), pivot {}",
            self.point_sources.len(),
            self.area_sources.len(),
            self.pivot
        );
        debug!("Aggregation tree {}", self.root.describe());
        Ok(())
    }

    /// Appends the mirror of `id` to `siblings`, creating previews for leaves.
    fn mirror(
        &mut self,
        store: &EntityStore,
        id: EntityId,
        siblings: &mut Vec<AggNode>,
        visited: &mut HashSet<EntityId>,
    ) -> Result<(), DesignerError> {
        let entity = store.get(id).ok_or(DesignerError::UnknownEntity { id })?;
        if !visited.insert(id) {
            return Err(DesignerError::contract(format!(
                "entity {} appears more than once in the selection",
                id
            )));
        }

        match &entity.kind {
            EntityKind::Group { children } => {
                if children.is_empty() {
                    return Err(DesignerError::EmptyGroup { id });
                }
                let mut members = Vec::with_capacity(children.len());
                for &child in children {
                    self.mirror(store, child, &mut members, visited)?;
                }
                siblings.push(AggNode::Group(members));
            }
            EntityKind::Point { site } => {
                siblings.push(AggNode::Leaf {
                    index: self.point_sources.len(),
                    kind: LeafKind::Point,
                });
                self.point_previews.push(PointPreview::new(
                    entity.position,
                    *site,
                    self.settings.dot_diameter,
                    &self.indicator,
                ));
                self.point_sources.push(id);
            }
            EntityKind::Area {
                kind,
                width,
                height,
            } => {
                let leaf_kind = match kind {
                    AreaKind::Electrode => LeafKind::Electrode,
                    AreaKind::AfmArea => LeafKind::AfmArea,
                };
                siblings.push(AggNode::Leaf {
                    index: self.area_sources.len(),
                    kind: leaf_kind,
                });
                self.area_previews.push(AreaPreview::new(
                    entity.position,
                    *width,
                    *height,
                    self.settings.box_color,
                ));
                self.area_sources.push(id);
            }
        }
        Ok(())
    }

    /// Pivot for anchor selection.
    ///
    /// An explicit position is used verbatim. Otherwise the centre of the box
    /// spanned by the point previews (and the area previews under
    /// [`PivotPolicy::PointsAndAreas`]); the origin when that box is empty.
    pub fn compute_pivot(&self, explicit: Option<ScenePoint>) -> ScenePoint {
        if let Some(pos) = explicit {
            return pos;
        }

        let points = self
            .point_previews
            .iter()
            .map(|p| p.bounding_rect(self.origin));
        let areas = self
            .area_previews
            .iter()
            .filter(|_| self.settings.pivot_policy == PivotPolicy::PointsAndAreas)
            .map(|a| a.bounding_rect(self.origin));

        points
            .chain(areas)
            .reduce(|acc, r| acc.union(&r))
            .map(|r: SceneRect| r.center())
            .unwrap_or(ScenePoint::ORIGIN)
    }

    /// Picks the point preview closest to the pivot (Manhattan distance,
    /// first wins on ties) and fixes the anchor offset.
    pub fn compute_anchor(&mut self) {
        let mut best: Option<(usize, f64)> = None;
        for (i, preview) in self.point_previews.iter().enumerate() {
            let dist = (preview.scene_pos(self.origin) - self.pivot).manhattan_length();
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((i, dist));
            }
        }

        self.anchor = best.map(|(i, _)| i);
        self.anchor_offset = match self.anchor {
            Some(i) => self.point_previews[i].scene_pos(self.origin) - self.pivot - self.origin,
            None => ScenePoint::ORIGIN,
        };
        debug!(
            "Anchor {:?} with offset {}",
            self.anchor.map(|i| self.point_previews[i].lattice_coord()),
            self.anchor_offset
        );
    }

    /// Places the pivot at `target`. Lattice coordinates are untouched.
    pub fn move_to(&mut self, target: ScenePoint) {
        self.origin = target - self.pivot_offset;
    }

    /// Shifts every point preview by `offset` sites and translates the
    /// engine by the matching scene displacement.
    ///
    /// Returns false, without moving anything, when there is no anchor.
    pub fn move_by_coordinate<L: Lattice + ?Sized>(
        &mut self,
        offset: LatticeCoord,
        lattice: &L,
    ) -> bool {
        let Some(anchor) = self.anchor_preview() else {
            warn!("Ignoring lattice move by {}: no anchor", offset);
            return false;
        };
        debug!(
            "anchor {} + offset {} = {}",
            anchor.lattice_coord(),
            offset,
            anchor.lattice_coord() + offset
        );

        for preview in &mut self.point_previews {
            preview.shift_coord(offset);
        }
        self.origin += lattice.coord_to_scene_pos(offset);
        true
    }

    /// Per point preview: whether its coordinate shifted by `offset` is an
    /// existing, unoccupied site.
    pub fn lattice_availability<L: Lattice + ?Sized>(
        &self,
        offset: LatticeCoord,
        lattice: &L,
    ) -> Result<Vec<bool>, DesignerError> {
        self.ensure_active()?;
        Ok(self
            .point_previews
            .iter()
            .map(|preview| {
                let target = preview.lattice_coord() + offset;
                if !lattice.is_valid_site(target) {
                    debug!("Target site {} is not valid", target);
                    false
                } else if lattice.is_occupied(target) {
                    debug!("Target site {} is occupied", target);
                    false
                } else {
                    true
                }
            })
            .collect())
    }

    /// Whether every point preview shifted by `offset` lands on an existing,
    /// unoccupied site. Area previews are never checked.
    ///
    /// Pure query: the caller decides whether to [`set_valid`](Self::set_valid).
    pub fn check_valid<L: Lattice + ?Sized>(
        &self,
        offset: LatticeCoord,
        lattice: &L,
    ) -> Result<bool, DesignerError> {
        self.ensure_active()?;
        Ok(self.point_previews.iter().all(|preview| {
            let target = preview.lattice_coord() + offset;
            lattice.is_valid_site(target) && !lattice.is_occupied(target)
        }))
    }

    /// Stores the validity flag and recolours the shared indicator.
    pub fn set_valid(&mut self, valid: bool) {
        if self.valid == valid {
            return;
        }
        self.valid = valid;
        let color = if valid {
            self.settings.valid_color
        } else {
            self.settings.invalid_color
        };
        *self.indicator.borrow_mut() = ValidityIndicator { valid, color };
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Original top-level entities of the selection, in selection order.
    ///
    /// A mirrored group resolves to the parent group of its first member, so
    /// existing groups are returned rather than rebuilt.
    pub fn top_items(&self, store: &EntityStore) -> Result<Vec<EntityId>, DesignerError> {
        self.ensure_active()?;
        self.root
            .children()
            .iter()
            .map(|node| self.resolve(node, store))
            .collect()
    }

    fn resolve(&self, node: &AggNode, store: &EntityStore) -> Result<EntityId, DesignerError> {
        match node {
            AggNode::Leaf {
                index,
                kind: LeafKind::Point,
            } => Ok(self.point_sources[*index]),
            AggNode::Leaf { index, .. } => Ok(self.area_sources[*index]),
            AggNode::Group(children) => {
                let first = children
                    .first()
                    .ok_or_else(|| DesignerError::contract("mirrored group has no members"))?;
                let member = self.resolve(first, store)?;
                store
                    .parent(member)
                    .ok_or(DesignerError::OrphanedGroupMember { id: member })
            }
        }
    }

    /// Ends the session, dropping all previews and the tree. Idempotent.
    pub fn clean(&mut self) {
        self.point_sources.clear();
        self.point_previews.clear();
        self.area_sources.clear();
        self.area_previews.clear();
        self.root = AggNode::default();

        self.origin = ScenePoint::ORIGIN;
        self.pivot = ScenePoint::ORIGIN;
        self.pivot_offset = ScenePoint::ORIGIN;
        self.anchor = None;
        self.anchor_offset = ScenePoint::ORIGIN;
        self.set_valid(true);
        self.active = false;
    }

    /// Where the anchor would sit if the pivot followed `scene_pos` freely.
    pub fn free_anchor(&self, scene_pos: ScenePoint) -> ScenePoint {
        scene_pos + self.anchor_offset
    }

    /// Displacement of the first point preview from its source; zero without
    /// point previews.
    pub fn move_offset(&self) -> ScenePoint {
        if self.point_previews.is_empty() {
            ScenePoint::ORIGIN
        } else {
            self.origin
        }
    }

    /// Current preview coordinate of the point entity `source`.
    pub fn lattice_coord_of(&self, source: EntityId) -> Option<LatticeCoord> {
        self.point_sources
            .iter()
            .position(|id| *id == source)
            .map(|i| self.point_previews[i].lattice_coord())
    }

    /// Nesting dump of the current tree, e.g. `[0,[1,2,]]`.
    pub fn describe_tree(&self) -> String {
        self.root.describe()
    }

    fn ensure_active(&self) -> Result<(), DesignerError> {
        if self.active {
            Ok(())
        } else {
            Err(DesignerError::NoActiveSession)
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn root(&self) -> &AggNode {
        &self.root
    }

    pub fn point_sources(&self) -> &[EntityId] {
        &self.point_sources
    }

    pub fn area_sources(&self) -> &[EntityId] {
        &self.area_sources
    }

    pub fn point_previews(&self) -> &[PointPreview] {
        &self.point_previews
    }

    pub fn area_previews(&self) -> &[AreaPreview] {
        &self.area_previews
    }

    pub fn anchor_index(&self) -> Option<usize> {
        self.anchor
    }

    pub fn anchor_preview(&self) -> Option<&PointPreview> {
        self.anchor.map(|i| &self.point_previews[i])
    }

    pub fn anchor_offset(&self) -> ScenePoint {
        self.anchor_offset
    }

    pub fn pivot(&self) -> ScenePoint {
        self.pivot
    }

    pub fn pivot_offset(&self) -> ScenePoint {
        self.pivot_offset
    }

    /// Engine origin; previews are positioned relative to it.
    pub fn origin(&self) -> ScenePoint {
        self.origin
    }

    /// Handle to the shared validity indicator, for renderers.
    pub fn indicator(&self) -> SharedIndicator {
        self.indicator.clone()
    }
}
