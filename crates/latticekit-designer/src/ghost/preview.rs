//! Preview placeholders drawn in place of the entities being moved.
//!
//! Preview positions are local to the engine origin, so translating the
//! origin moves every preview rigidly.

use latticekit_core::{LatticeCoord, Rgba, SceneRect, ScenePoint, Shared, WeakShared};

/// Session-wide validity state shared by every point preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityIndicator {
    pub valid: bool,
    pub color: Rgba,
}

pub type SharedIndicator = Shared<ValidityIndicator>;

/// Marker standing in for one point entity.
#[derive(Debug, Clone)]
pub struct PointPreview {
    local_pos: ScenePoint,
    lattice_coord: LatticeCoord,
    diameter: f64,
    indicator: WeakShared<ValidityIndicator>,
}

impl PointPreview {
    /// Creates a marker over a source sitting at `source_pos` on `site`.
    pub fn new(
        source_pos: ScenePoint,
        site: LatticeCoord,
        diameter: f64,
        indicator: &SharedIndicator,
    ) -> Self {
        Self {
            local_pos: source_pos,
            lattice_coord: site,
            diameter,
            indicator: std::rc::Rc::downgrade(indicator),
        }
    }

    pub fn lattice_coord(&self) -> LatticeCoord {
        self.lattice_coord
    }

    pub(crate) fn shift_coord(&mut self, offset: LatticeCoord) {
        self.lattice_coord += offset;
    }

    pub fn local_pos(&self) -> ScenePoint {
        self.local_pos
    }

    /// Scene position for an engine sitting at `origin`.
    pub fn scene_pos(&self, origin: ScenePoint) -> ScenePoint {
        origin + self.local_pos
    }

    /// Marker square centred on the scene position.
    pub fn bounding_rect(&self, origin: ScenePoint) -> SceneRect {
        SceneRect::centered(self.scene_pos(origin), self.diameter, self.diameter)
    }

    /// Current fill colour, or `None` once the session indicator is gone.
    pub fn color(&self) -> Option<Rgba> {
        self.indicator.upgrade().map(|ind| ind.borrow().color)
    }
}

/// Rectangle standing in for one area entity.
///
/// Size is copied from the source once and not re-synced.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaPreview {
    local_pos: ScenePoint,
    width: f64,
    height: f64,
    color: Rgba,
}

impl AreaPreview {
    pub fn new(source_pos: ScenePoint, width: f64, height: f64, color: Rgba) -> Self {
        Self {
            local_pos: source_pos,
            width,
            height,
            color,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn color(&self) -> Rgba {
        self.color
    }

    pub fn local_pos(&self) -> ScenePoint {
        self.local_pos
    }

    pub fn scene_pos(&self, origin: ScenePoint) -> ScenePoint {
        origin + self.local_pos
    }

    /// Rectangle with its top-left corner at the scene position.
    pub fn bounding_rect(&self, origin: ScenePoint) -> SceneRect {
        SceneRect::new(self.scene_pos(origin), self.width, self.height)
    }
}
