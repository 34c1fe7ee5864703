//! Lattice sites: validity, occupancy, and coordinate to scene mapping.
//!
//! The move engine only talks to the [`Lattice`] trait. [`SiteLattice`] is
//! the concrete lattice used by the design canvas: a two-vector Bravais
//! lattice with a per-cell basis, bounded extents, optional missing sites,
//! and an occupancy table mapping sites to the entity sitting on them.

use std::collections::{HashMap, HashSet};

use latticekit_core::{LatticeCoord, LatticeError, ScenePoint};
use latticekit_settings::LatticeSettings;
use nalgebra::{Matrix2, Vector2};

use crate::model::EntityId;

/// Read-only queries the move engine needs from a lattice.
pub trait Lattice {
    /// Whether `coord` names an existing site.
    fn is_valid_site(&self, coord: LatticeCoord) -> bool;

    /// Whether an entity currently sits on `coord`.
    fn is_occupied(&self, coord: LatticeCoord) -> bool;

    /// Scene position of `coord`. Also used to turn a coordinate offset into
    /// a scene displacement.
    fn coord_to_scene_pos(&self, coord: LatticeCoord) -> ScenePoint;
}

impl<L: Lattice + ?Sized> Lattice for &L {
    fn is_valid_site(&self, coord: LatticeCoord) -> bool {
        (**self).is_valid_site(coord)
    }

    fn is_occupied(&self, coord: LatticeCoord) -> bool {
        (**self).is_occupied(coord)
    }

    fn coord_to_scene_pos(&self, coord: LatticeCoord) -> ScenePoint {
        (**self).coord_to_scene_pos(coord)
    }
}

/// Bounded lattice with a unit-cell basis and an occupancy table.
#[derive(Debug, Clone)]
pub struct SiteLattice {
    a1: Vector2<f64>,
    a2: Vector2<f64>,
    basis: Vec<Vector2<f64>>,
    /// Maps scaled cartesian offsets back to fractional (n, m)
    inverse: Matrix2<f64>,
    columns: i32,
    rows: i32,
    scale: f64,
    disabled: HashSet<LatticeCoord>,
    occupancy: HashMap<LatticeCoord, EntityId>,
}

impl SiteLattice {
    /// Creates a lattice of `columns x rows` unit cells.
    ///
    /// `basis[0]` must be the cell origin so that `l = 0` offsets are pure
    /// translations. Both extents must be at least one cell.
    pub fn new(
        a1: [f64; 2],
        a2: [f64; 2],
        basis: &[[f64; 2]],
        columns: u32,
        rows: u32,
        scale: f64,
    ) -> Result<Self, LatticeError> {
        if basis.is_empty() {
            return Err(LatticeError::EmptyBasis);
        }
        if columns == 0 || rows == 0 {
            return Err(LatticeError::EmptyExtents { columns, rows });
        }

        let a1 = Vector2::new(a1[0], a1[1]) * scale;
        let a2 = Vector2::new(a2[0], a2[1]) * scale;
        let frame = Matrix2::from_columns(&[a1, a2]);
        let inverse = frame
            .try_inverse()
            .filter(|_| frame.determinant().abs() > f64::EPSILON)
            .ok_or(LatticeError::DegenerateVectors {
                determinant: frame.determinant(),
            })?;

        Ok(Self {
            a1,
            a2,
            basis: basis
                .iter()
                .map(|b| Vector2::new(b[0], b[1]) * scale)
                .collect(),
            inverse,
            columns: columns.min(i32::MAX as u32) as i32,
            rows: rows.min(i32::MAX as u32) as i32,
            scale,
            disabled: HashSet::new(),
            occupancy: HashMap::new(),
        })
    }

    /// Builds a lattice from configuration, including its missing sites.
    pub fn from_settings(settings: &LatticeSettings) -> Result<Self, LatticeError> {
        let mut lattice = Self::new(
            settings.a1,
            settings.a2,
            &settings.basis,
            settings.columns,
            settings.rows,
            settings.scale_factor,
        )?;
        for coord in &settings.disabled_sites {
            lattice.disable_site(*coord);
        }
        Ok(lattice)
    }

    pub fn columns(&self) -> u32 {
        self.columns as u32
    }

    pub fn rows(&self) -> u32 {
        self.rows as u32
    }

    pub fn basis_len(&self) -> usize {
        self.basis.len()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Number of existing sites.
    pub fn site_count(&self) -> usize {
        let total = self.columns as usize * self.rows as usize * self.basis.len();
        total - self.disabled.len()
    }

    fn in_extents(&self, coord: LatticeCoord) -> bool {
        (0..self.columns).contains(&coord.n)
            && (0..self.rows).contains(&coord.m)
            && coord.l >= 0
            && (coord.l as usize) < self.basis.len()
    }

    /// Marks a site as missing. Returns false if it was outside the extents.
    pub fn disable_site(&mut self, coord: LatticeCoord) -> bool {
        if !self.in_extents(coord) {
            return false;
        }
        self.disabled.insert(coord);
        true
    }

    /// Records `id` as sitting on `coord`.
    ///
    /// Re-occupying a site with the entity already on it is a no-op.
    pub fn occupy(&mut self, coord: LatticeCoord, id: EntityId) -> Result<(), LatticeError> {
        if !self.is_valid_site(coord) {
            return Err(LatticeError::InvalidSite { coord });
        }
        match self.occupancy.get(&coord) {
            Some(&occupant) if occupant != id => Err(LatticeError::SiteOccupied { coord, occupant }),
            _ => {
                self.occupancy.insert(coord, id);
                Ok(())
            }
        }
    }

    /// Frees `coord`, returning the entity that was on it.
    pub fn vacate(&mut self, coord: LatticeCoord) -> Option<EntityId> {
        self.occupancy.remove(&coord)
    }

    pub fn occupant(&self, coord: LatticeCoord) -> Option<EntityId> {
        self.occupancy.get(&coord).copied()
    }

    pub fn occupied_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Closest existing site to `point`, searching every basis index.
    pub fn nearest_site(&self, point: ScenePoint) -> Option<LatticeCoord> {
        (0..self.basis.len() as i32)
            .filter_map(|l| self.nearest_site_in_basis(point, l))
            .min_by(|a, b| {
                let da = self.coord_to_scene_pos(*a).distance_to(&point);
                let db = self.coord_to_scene_pos(*b).distance_to(&point);
                da.total_cmp(&db)
            })
    }

    /// Closest existing site to `point` with basis index `l`.
    ///
    /// Points outside the lattice snap to the nearest edge cell.
    pub fn nearest_site_in_basis(&self, point: ScenePoint, l: i32) -> Option<LatticeCoord> {
        if l < 0 || l as usize >= self.basis.len() {
            return None;
        }

        let local = Vector2::new(point.x, point.y) - self.basis[l as usize];
        let frac = self.inverse * local;
        let clamp_n = |v: f64| (v as i32).clamp(0, self.columns - 1);
        let clamp_m = |v: f64| (v as i32).clamp(0, self.rows - 1);

        let mut best: Option<(f64, LatticeCoord)> = None;
        for n in clamp_n(frac.x.floor())..=clamp_n(frac.x.ceil()) {
            for m in clamp_m(frac.y.floor())..=clamp_m(frac.y.ceil()) {
                let coord = LatticeCoord::new(n, m, l);
                if !self.is_valid_site(coord) {
                    continue;
                }
                let dist = self.coord_to_scene_pos(coord).distance_to(&point);
                if best.map_or(true, |(d, _)| dist < d) {
                    best = Some((dist, coord));
                }
            }
        }
        best.map(|(_, coord)| coord)
    }

    fn basis_offset(&self, l: i32) -> Vector2<f64> {
        let len = self.basis.len() as i32;
        if (0..len).contains(&l) {
            self.basis[l as usize]
        } else if (-len + 1..0).contains(&l) {
            -self.basis[(-l) as usize]
        } else {
            Vector2::zeros()
        }
    }
}

impl Lattice for SiteLattice {
    fn is_valid_site(&self, coord: LatticeCoord) -> bool {
        self.in_extents(coord) && !self.disabled.contains(&coord)
    }

    fn is_occupied(&self, coord: LatticeCoord) -> bool {
        self.occupancy.contains_key(&coord)
    }

    /// `n * a1 + m * a2 + basis[l]`, in scene units.
    ///
    /// A negative `l` maps to the negated basis offset so that the offset
    /// between the two sites of a two-site cell maps back and forth.
    fn coord_to_scene_pos(&self, coord: LatticeCoord) -> ScenePoint {
        let v = self.a1 * coord.n as f64 + self.a2 * coord.m as f64 + self.basis_offset(coord.l);
        ScenePoint::new(v.x, v.y)
    }
}

/// A lattice view that reports a set of sites as free.
///
/// Used while dragging a selection so its members do not collide with the
/// sites they are about to leave.
#[derive(Debug)]
pub struct MaskedLattice<'a, L: Lattice + ?Sized> {
    inner: &'a L,
    vacant: HashSet<LatticeCoord>,
}

impl<'a, L: Lattice + ?Sized> MaskedLattice<'a, L> {
    pub fn new(inner: &'a L, vacant: impl IntoIterator<Item = LatticeCoord>) -> Self {
        Self {
            inner,
            vacant: vacant.into_iter().collect(),
        }
    }
}

impl<L: Lattice + ?Sized> Lattice for MaskedLattice<'_, L> {
    fn is_valid_site(&self, coord: LatticeCoord) -> bool {
        self.inner.is_valid_site(coord)
    }

    fn is_occupied(&self, coord: LatticeCoord) -> bool {
        !self.vacant.contains(&coord) && self.inner.is_occupied(coord)
    }

    fn coord_to_scene_pos(&self, coord: LatticeCoord) -> ScenePoint {
        self.inner.coord_to_scene_pos(coord)
    }
}
