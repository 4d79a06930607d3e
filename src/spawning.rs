//! Config-driven entity spawning.
//!
//! Validated configs (see `config`) turn into component bundles here. Spawn
//! functions never fail; configuration gaps that merely degrade behavior
//! are logged as warnings and the entity spawns without the capability.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::warn;

use crate::components::{
    Boss, BossBrain, ContactDamage, DropTable, Facing, FeedbackProfile, Health, HealthPickup,
    Hurtbox, ItemHolders, Lifetime, MoneyPickup, Player, Position, Shop, Wallet,
};
use crate::config::{BossConfig, LifeConfig, ShopConfig};
use crate::constants::*;

/// Spawn a damageable entity: health, hurtbox, feedback wiring, drops.
pub fn spawn_damageable(world: &mut World, config: &LifeConfig, position: Vec2) -> Entity {
    let trigger_tag = match config.trigger_tag.as_deref() {
        Some(tag) if !tag.is_empty() => Some(tag.to_string()),
        _ => {
            warn!(name = %config.name, "no trigger tag; entity only takes scripted damage");
            None
        }
    };
    if !config.attack_fx {
        warn!(name = %config.name, "no attack fx configured");
    }

    world.spawn((
        Position(position),
        Health::new(config.max_health),
        Hurtbox {
            trigger_tag,
            radius: config.hurtbox_radius,
            blood_splash: config.blood_splash,
        },
        FeedbackProfile {
            hurt_sound: config.hurt_sound,
            death_sound: config.death_sound,
            hurt_particles: config.hurt_particles.clone(),
            death_particles: config.death_particles,
            attack_fx: config.attack_fx,
        },
        DropTable(config.drops.clone()),
    ))
}

/// Spawn the player: a damageable entity that also carries the wallet, the
/// item holders, and the body contact that collects pickups.
pub fn spawn_player(world: &mut World, config: &LifeConfig, position: Vec2) -> Entity {
    let entity = spawn_damageable(world, config, position);
    let _ = world.insert(
        entity,
        (
            Player,
            Facing::default(),
            Wallet::default(),
            ItemHolders::default(),
            ContactDamage::new(PLAYER_BODY_TAG, PICKUP_TOUCH_DAMAGE, PLAYER_BODY_RADIUS),
        ),
    );
    entity
}

/// Spawn a boss: a damageable entity plus combat params and a fresh brain.
pub fn spawn_boss(world: &mut World, config: &BossConfig, position: Vec2) -> Entity {
    let entity = spawn_damageable(world, &config.life, position);
    let _ = world.insert(
        entity,
        (
            Boss {
                name: config.life.name.clone(),
                chase_speed: config.chase_speed,
                attack_range: config.attack_range,
                attack_damage: config.attack_damage,
                attack_reach: config.attack_reach,
                intro_duration: config.intro_duration,
                attack_duration: config.attack_duration,
                attack_strike_time: config.attack_strike_time,
                fight_activated: false,
            },
            BossBrain::new(config.intro_duration, config.attack_duration),
            Facing::default(),
        ),
    );
    entity
}

/// Spawn a money pickup. One touch of the player's body collects it.
pub fn spawn_money_pickup(world: &mut World, value: i32, position: Vec2) -> Entity {
    world.spawn((
        Position(position),
        Health::new(PICKUP_TOUCH_DAMAGE),
        Hurtbox {
            trigger_tag: Some(PLAYER_BODY_TAG.to_string()),
            radius: PICKUP_RADIUS,
            blood_splash: false,
        },
        MoneyPickup { value },
    ))
}

/// Spawn a health pickup. Collected the same way money is.
pub fn spawn_health_pickup(world: &mut World, amount: i32, position: Vec2) -> Entity {
    world.spawn((
        Position(position),
        Health::new(PICKUP_TOUCH_DAMAGE),
        Hurtbox {
            trigger_tag: Some(PLAYER_BODY_TAG.to_string()),
            radius: PICKUP_RADIUS,
            blood_splash: false,
        },
        HealthPickup { amount },
    ))
}

/// Spawn a short-lived melee strike that damages matching hurtboxes.
pub fn spawn_strike(
    world: &mut World,
    position: Vec2,
    tag: &str,
    damage: i32,
    radius: f32,
    lifetime: f32,
) -> Entity {
    world.spawn((
        Position(position),
        ContactDamage::new(tag, damage, radius),
        Lifetime(lifetime),
    ))
}

/// Spawn a shop at a position.
pub fn spawn_shop(world: &mut World, config: &ShopConfig, position: Vec2) -> Entity {
    world.spawn((
        Position(position),
        Shop {
            name: config.name.clone(),
            stock: config.stock.clone(),
        },
    ))
}
