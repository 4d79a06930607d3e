//! Common entity query helpers.
//!
//! This module provides reusable query functions to reduce code repetition
//! across systems. These are pure read-only queries that don't modify state.

use glam::Vec2;
use hecs::{Entity, World};

use crate::components::{Health, Player, Position};

/// Get an entity's world position.
pub fn get_entity_position(world: &World, entity: Entity) -> Option<Vec2> {
    world.get::<&Position>(entity).ok().map(|p| p.0)
}

/// Check if an entity is dead (health <= 0) or already removed.
pub fn is_entity_dead(world: &World, entity: Entity) -> bool {
    world
        .get::<&Health>(entity)
        .map(|h| h.is_dead())
        .unwrap_or(true)
}

/// The player's position, handed to boss state machines as their target.
pub fn player_target(world: &World) -> Option<Vec2> {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .map(|(_, (_, pos))| pos.0)
        .next()
}
