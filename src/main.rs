//! Headless demo: a scripted fight against the arena gatekeeper, from
//! activation through looting the drops to spending them at the shop.
//!
//! Run with `RUST_LOG=debug` for the full event stream.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use boss_arena::components::{Facing, Health, HealthPickup, ItemHolders, MoneyPickup, Position, Wallet};
use boss_arena::config::{BossConfig, LifeConfig, ShopConfig};
use boss_arena::constants::{PLAYER_ATTACK_TAG, STRIKE_LIFETIME};
use boss_arena::{queries, spawning, systems};
use boss_arena::{Arena, FeedbackSink, GameEvent, ParticleId, SfxId};

const STEP: f32 = 0.05;
const DEMO_TIMEOUT: f32 = 60.0;
const SWING_COOLDOWN: f32 = 0.5;
const SWING_RANGE: f32 = 1.5;
const SWING_DAMAGE: i32 = 10;
const SWING_RADIUS: f32 = 0.5;
const SWING_REACH: f32 = 0.75;
const WALK_SPEED: f32 = 2.0;

const PLAYER_CONFIG: &str = r#"{
    "name": "Player",
    "max_health": 100,
    "trigger_tag": "Enemy",
    "blood_splash": true,
    "hurt_sound": 1,
    "death_sound": 2,
    "hurt_particles": [10]
}"#;

const BOSS_CONFIG: &str = r#"{
    "life": {
        "name": "Manusian",
        "max_health": 40,
        "trigger_tag": "Attack",
        "blood_splash": true,
        "hurt_sound": 3,
        "death_sound": 4,
        "hurt_particles": [11],
        "death_particles": 12,
        "drops": [
            { "kind": { "money": { "value": 5 } }, "amount": 6 },
            { "kind": { "health": { "amount": 10 } }, "amount": 1 }
        ]
    },
    "chase_speed": 2.5,
    "attack_range": 1.0,
    "attack_damage": 8,
    "attack_reach": 0.75
}"#;

const SHOP_CONFIG: &str = r#"{
    "name": "Maru",
    "stock": [
        { "item": { "name": "Dash", "kind": "ability" }, "price": 25 },
        { "item": { "name": "Arrow", "kind": "other", "stackable": true }, "price": 2, "amount": 15 }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let player_config = LifeConfig::from_json(PLAYER_CONFIG)?;
    let boss_config = BossConfig::from_json(BOSS_CONFIG)?;
    let shop_config = ShopConfig::from_json(SHOP_CONFIG)?;

    let mut world = World::new();
    let player = spawning::spawn_player(&mut world, &player_config, Vec2::new(0.0, 0.0));
    let boss = spawning::spawn_boss(&mut world, &boss_config, Vec2::new(6.0, 0.0));
    let shop = spawning::spawn_shop(&mut world, &shop_config, Vec2::new(-3.0, 0.0));

    let mut arena = Arena::new(world, player);
    let mut feedback = LogFeedback;

    arena.activate_boss_fight(boss);
    info!(boss = %boss_config.life.name, "the gate slams shut");

    let mut swing_ready = 0.0_f32;
    loop {
        if arena.time > DEMO_TIMEOUT {
            info!("demo timed out");
            break;
        }

        if !queries::is_entity_dead(&arena.world, boss) {
            aim_at(&mut arena.world, player, boss);
            swing_ready -= STEP;
            if swing_ready <= 0.0 && in_swing_range(&arena.world, player, boss) {
                swing(&mut arena.world, player);
                swing_ready = SWING_COOLDOWN;
            }
        } else if let Some(target) = nearest_pickup(&arena.world, player) {
            walk_toward(&mut arena.world, player, target);
        } else {
            break;
        }

        for event in arena.tick(STEP, &mut feedback) {
            log_event(&event);
        }

        if queries::is_entity_dead(&arena.world, player) {
            info!("the player fell; demo over");
            return Ok(());
        }
    }

    let money = arena.world.get::<&Wallet>(player).map(|w| w.money).unwrap_or(0);
    info!(money, shop = %shop_config.name, "arena looted; visiting the shop");
    systems::sell_item(&mut arena.world, shop, player, 0, &mut arena.events);
    for event in arena.events.drain() {
        log_event(&event);
    }

    let health = arena.world.get::<&Health>(player).map(|h| h.current).unwrap_or(0);
    let money = arena.world.get::<&Wallet>(player).map(|w| w.money).unwrap_or(0);
    let abilities = arena
        .world
        .get::<&ItemHolders>(player)
        .map(|holders| holders.abilities.len())
        .unwrap_or(0);
    info!(time = arena.time, health, money, abilities, "demo complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Feedback sink that narrates presentation calls instead of rendering them.
struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn play_sound(&mut self, sound: SfxId) {
        info!(id = sound.0, "sfx");
    }

    fn spawn_particles(&mut self, effect: ParticleId, position: Vec2) {
        info!(id = effect.0, x = position.x, y = position.y, "particles");
    }

    fn spawn_attack_fx(&mut self, position: Vec2, quarter_turns: u8) {
        info!(x = position.x, y = position.y, quarter_turns, "attack fx");
    }

    fn spawn_blood_splash(&mut self, position: Vec2, direction: Vec2) {
        info!(x = position.x, y = position.y, dx = direction.x, dy = direction.y, "blood splash");
    }

    fn camera_shake(&mut self) {
        info!("camera shake");
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Damaged {
            entity,
            amount,
            remaining,
        } => info!(?entity, amount, remaining, "damaged"),
        GameEvent::Died { entity, position } => {
            info!(?entity, x = position.x, y = position.y, "died")
        }
        GameEvent::PlayerDetected { boss } => info!(?boss, "the gatekeeper notices the player"),
        GameEvent::BossStateChanged { boss, state } => info!(?boss, ?state, "boss state"),
        GameEvent::MoneyCollected { value, .. } => info!(value, "money collected"),
        GameEvent::HealthCollected { amount, .. } => info!(amount, "health collected"),
        GameEvent::ItemSold { item, price, .. } => info!(%item, price, "item sold"),
    }
}

fn aim_at(world: &mut World, player: Entity, boss: Entity) {
    let Some(boss_pos) = queries::get_entity_position(world, boss) else {
        return;
    };
    let Some(player_pos) = queries::get_entity_position(world, player) else {
        return;
    };
    if let Ok(mut facing) = world.get::<&mut Facing>(player) {
        facing.face_toward(player_pos.x, boss_pos.x);
    }
}

fn in_swing_range(world: &World, player: Entity, boss: Entity) -> bool {
    let (Some(player_pos), Some(boss_pos)) = (
        queries::get_entity_position(world, player),
        queries::get_entity_position(world, boss),
    ) else {
        return false;
    };
    player_pos.distance(boss_pos) <= SWING_RANGE
}

fn swing(world: &mut World, player: Entity) {
    let Some(position) = queries::get_entity_position(world, player) else {
        return;
    };
    let direction = world
        .get::<&Facing>(player)
        .map(|facing| facing.direction_x())
        .unwrap_or(1.0);
    let at = position + Vec2::new(direction * SWING_REACH, 0.0);
    spawning::spawn_strike(
        world,
        at,
        PLAYER_ATTACK_TAG,
        SWING_DAMAGE,
        SWING_RADIUS,
        STRIKE_LIFETIME,
    );
    info!(x = at.x, "the player swings");
}

fn nearest_pickup(world: &World, player: Entity) -> Option<Vec2> {
    let from = queries::get_entity_position(world, player)?;
    let mut nearest = None;
    let mut nearest_distance = f32::INFINITY;
    for (_, (pos, _)) in world.query::<(&Position, &MoneyPickup)>().iter() {
        let distance = pos.0.distance(from);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(pos.0);
        }
    }
    for (_, (pos, _)) in world.query::<(&Position, &HealthPickup)>().iter() {
        let distance = pos.0.distance(from);
        if distance < nearest_distance {
            nearest_distance = distance;
            nearest = Some(pos.0);
        }
    }
    nearest
}

fn walk_toward(world: &mut World, player: Entity, target: Vec2) {
    let Ok(mut position) = world.get::<&mut Position>(player) else {
        return;
    };
    let to_target = target - position.0;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return;
    }
    let step = (WALK_SPEED * STEP).min(distance);
    position.0 += to_target / distance * step;
}
