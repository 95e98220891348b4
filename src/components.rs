//! World components the camera and scripted pans read.

use crate::math::WorldRect;
use glam::Vec2;
use hecs::{Entity, World};

/// Position component - world coordinates (display units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPosition(pub Vec2);

impl WorldPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Submarine component - an extended region that moves under physics
#[derive(Debug, Clone, Copy)]
pub struct Submarine {
    /// Hull borders relative to the entity's world position
    pub borders: WorldRect,
    /// Linear velocity in physics units per second
    pub velocity: Vec2,
}

impl Submarine {
    pub fn new(borders: WorldRect) -> Self {
        Self {
            borders,
            velocity: Vec2::ZERO,
        }
    }

    /// Borders in world space for a submarine at `position`
    pub fn world_borders(&self, position: Vec2) -> WorldRect {
        self.borders.translated(position)
    }
}

/// Character component - an entity the player can control
#[derive(Debug, Clone, Copy)]
pub struct Character {
    pub alive: bool,
}

impl Character {
    pub fn new() -> Self {
        Self { alive: true }
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::new()
    }
}

/// Area an entity covers: a point, or a box for submarines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Vec2,
    pub max: Vec2,
}

impl Extent {
    pub fn point(p: Vec2) -> Self {
        Self { min: p, max: p }
    }

    /// Point at a relative position inside the extent (0 = min, 1 = max per axis)
    pub fn at_fraction(&self, fraction: Vec2) -> Vec2 {
        self.min + (self.max - self.min) * fraction
    }
}

/// World position of an entity, if it still exists and has one.
pub fn world_position(world: &World, entity: Entity) -> Option<Vec2> {
    world.get::<&WorldPosition>(entity).ok().map(|p| p.0)
}

/// Bounding extent of an entity.
pub fn world_extent(world: &World, entity: Entity) -> Option<Extent> {
    let position = world_position(world, entity)?;
    match world.get::<&Submarine>(entity) {
        Ok(sub) => {
            let borders = sub.world_borders(position);
            Some(Extent {
                min: borders.min(),
                max: borders.max(),
            })
        }
        Err(_) => Some(Extent::point(position)),
    }
}

/// The submarine the camera should ride along with: the closest one whose
/// borders (plus a margin) contain `view_center`.
pub fn find_follow_sub(
    world: &World,
    view_center: Vec2,
    margin: f32,
) -> Option<(Entity, Submarine)> {
    world
        .query::<(&WorldPosition, &Submarine)>()
        .iter()
        .filter(|(_, (pos, sub))| {
            let borders = sub.world_borders(pos.0).inflate(margin);
            borders.contains(view_center)
        })
        .map(|(id, (pos, sub))| (id, *sub, pos.0.distance_squared(view_center)))
        .min_by(|a, b| a.2.total_cmp(&b.2))
        .map(|(id, sub, _)| (id, sub))
}
