//! Which entity the local player controls, and which screen is active.

use crate::components::Character;
use hecs::{Entity, World};

/// Screens that own a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Main gameplay screen
    Game,
    Lobby,
    Editor,
}

/// The locally controlled entity, if any
#[derive(Debug, Clone, Copy, Default)]
pub struct Control {
    pub controlled: Option<Entity>,
}

impl Control {
    pub fn new(controlled: Option<Entity>) -> Self {
        Self { controlled }
    }

    /// The controlled entity, if it still exists in `world`.
    pub fn controlled_in(&self, world: &World) -> Option<Entity> {
        self.controlled.filter(|&e| world.contains(e))
    }

    /// True when the player has no living character and is watching instead.
    pub fn is_spectating(&self, world: &World) -> bool {
        match self.controlled_in(world) {
            Some(entity) => world
                .get::<&Character>(entity)
                .map(|c| !c.alive)
                .unwrap_or(true),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::WorldPosition;

    #[test]
    fn test_spectating_without_character() {
        let world = World::new();
        assert!(Control::default().is_spectating(&world));
    }

    #[test]
    fn test_spectating_follows_character_state() {
        let mut world = World::new();
        let e = world.spawn((WorldPosition::new(0.0, 0.0), Character::new()));
        let control = Control::new(Some(e));
        assert!(!control.is_spectating(&world));

        world.get::<&mut Character>(e).unwrap().alive = false;
        assert!(control.is_spectating(&world));

        world.despawn(e).unwrap();
        assert!(control.is_spectating(&world));
        assert!(control.controlled_in(&world).is_none());
    }
}
