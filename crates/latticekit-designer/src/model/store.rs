use std::collections::HashMap;

use latticekit_core::{DesignerError, LatticeCoord, ScenePoint};

use super::{AreaKind, Entity, EntityId, EntityKind};

/// Owns every entity on the canvas.
///
/// Entities reference each other only by id: a group lists its members and
/// each member records its parent group. Top-level entities keep their
/// insertion order, which is also the order a full selection is reported in.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: HashMap<EntityId, Entity>,
    top_level: Vec<EntityId>,
    next_id: EntityId,
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            entities: HashMap::new(),
            top_level: Vec::new(),
            next_id: 1,
        }
    }

    fn generate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert_top_level(&mut self, position: ScenePoint, kind: EntityKind) -> EntityId {
        let id = self.generate_id();
        self.entities.insert(
            id,
            Entity {
                id,
                parent: None,
                position,
                kind,
            },
        );
        self.top_level.push(id);
        id
    }

    /// Adds a point entity at `site`, drawn at `position`.
    ///
    /// Site occupancy is tracked by the lattice, not here.
    pub fn add_point(&mut self, site: LatticeCoord, position: ScenePoint) -> EntityId {
        self.insert_top_level(position, EntityKind::Point { site })
    }

    /// Adds an area entity with its top-left corner at `top_left`.
    pub fn add_area(
        &mut self,
        kind: AreaKind,
        top_left: ScenePoint,
        width: f64,
        height: f64,
    ) -> EntityId {
        self.insert_top_level(
            top_left,
            EntityKind::Area {
                kind,
                width,
                height,
            },
        )
    }

    /// Groups top-level entities into a new group, in the given order.
    ///
    /// The group takes the top-level slot of its first member.
    pub fn group(&mut self, members: &[EntityId]) -> Result<EntityId, DesignerError> {
        if members.is_empty() {
            return Err(DesignerError::contract("cannot group an empty set of entities"));
        }

        for (i, id) in members.iter().enumerate() {
            let entity = self
                .entities
                .get(id)
                .ok_or(DesignerError::UnknownEntity { id: *id })?;
            if let Some(parent) = entity.parent {
                return Err(DesignerError::AlreadyGrouped { id: *id, parent });
            }
            if members[..i].contains(id) {
                return Err(DesignerError::contract(format!(
                    "entity {} listed twice in one group",
                    id
                )));
            }
        }

        let slot = members
            .iter()
            .filter_map(|id| self.top_level.iter().position(|t| t == id))
            .min()
            .unwrap_or(self.top_level.len());

        let group_id = self.generate_id();
        for id in members {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.parent = Some(group_id);
            }
        }
        self.top_level.retain(|id| !members.contains(id));
        let slot = slot.min(self.top_level.len());
        self.top_level.insert(slot, group_id);

        self.entities.insert(
            group_id,
            Entity {
                id: group_id,
                parent: None,
                position: ScenePoint::ORIGIN,
                kind: EntityKind::Group {
                    children: members.to_vec(),
                },
            },
        );

        tracing::debug!("Grouped {} entities into group {}", members.len(), group_id);
        Ok(group_id)
    }

    /// Dissolves a group, handing its members to the group's own parent.
    pub fn ungroup(&mut self, group_id: EntityId) -> Result<Vec<EntityId>, DesignerError> {
        let group = self
            .entities
            .get(&group_id)
            .ok_or(DesignerError::UnknownEntity { id: group_id })?;
        let children = match &group.kind {
            EntityKind::Group { children } => children.clone(),
            _ => {
                return Err(DesignerError::contract(format!(
                    "entity {} is not a group",
                    group_id
                )))
            }
        };
        let parent = group.parent;

        for id in &children {
            if let Some(entity) = self.entities.get_mut(id) {
                entity.parent = parent;
            }
        }

        match parent {
            Some(pid) => {
                if let Some(EntityKind::Group { children: siblings }) =
                    self.entities.get_mut(&pid).map(|e| &mut e.kind)
                {
                    if let Some(pos) = siblings.iter().position(|id| *id == group_id) {
                        siblings.splice(pos..=pos, children.iter().copied());
                    }
                }
            }
            None => {
                if let Some(pos) = self.top_level.iter().position(|id| *id == group_id) {
                    self.top_level.splice(pos..=pos, children.iter().copied());
                }
            }
        }

        self.entities.remove(&group_id);
        Ok(children)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn parent(&self, id: EntityId) -> Option<EntityId> {
        self.entities.get(&id).and_then(|e| e.parent)
    }

    /// Ordered members of a group; empty for leaves and unknown ids.
    pub fn children(&self, id: EntityId) -> &[EntityId] {
        self.entities.get(&id).map(|e| e.children()).unwrap_or(&[])
    }

    /// Scene position of an entity.
    ///
    /// For groups this is the top-left corner spanned by the positions of all
    /// leaf members.
    pub fn position(&self, id: EntityId) -> Option<ScenePoint> {
        let entity = self.entities.get(&id)?;
        if !entity.is_group() {
            return Some(entity.position);
        }

        self.leaves(id)
            .into_iter()
            .filter_map(|leaf| self.entities.get(&leaf).map(|e| e.position))
            .reduce(|a, b| ScenePoint::new(a.x.min(b.x), a.y.min(b.y)))
    }

    /// Leaf entities below `id` in depth-first order; `[id]` for a leaf.
    pub fn leaves(&self, id: EntityId) -> Vec<EntityId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.entities.get(&current) {
                Some(entity) if entity.is_group() => {
                    stack.extend(entity.children().iter().rev().copied());
                }
                Some(_) => out.push(current),
                None => {}
            }
        }
        out
    }

    pub fn set_position(&mut self, id: EntityId, position: ScenePoint) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position = position;
        }
    }

    pub fn translate(&mut self, id: EntityId, delta: ScenePoint) {
        if let Some(entity) = self.entities.get_mut(&id) {
            entity.position += delta;
        }
    }

    /// Re-pins a point entity to `site`. Ignored for other variants.
    pub fn set_site(&mut self, id: EntityId, site: LatticeCoord) {
        if let Some(Entity {
            kind: EntityKind::Point { site: current },
            ..
        }) = self.entities.get_mut(&id)
        {
            *current = site;
        }
    }

    /// Top-level entities in canvas order.
    pub fn top_level(&self) -> &[EntityId] {
        &self.top_level
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
