use glam::Vec2;
use hecs::Entity;
use serde::Deserialize;

use crate::constants::BOSS_IDLE_PAUSE;
use crate::feedback::{ParticleId, SfxId};

/// Position component - continuous world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Facing component - horizontal flip state
#[derive(Debug, Clone, Copy, Default)]
pub struct Facing {
    pub left: bool,
}

impl Facing {
    /// Turn toward a target x; an exactly-aligned target keeps the current facing.
    pub fn face_toward(&mut self, own_x: f32, target_x: f32) {
        if target_x < own_x {
            self.left = true;
        } else if target_x > own_x {
            self.left = false;
        }
    }

    /// Unit x direction the entity is looking in.
    pub fn direction_x(&self) -> f32 {
        if self.left {
            -1.0
        } else {
            1.0
        }
    }
}

/// Player marker component
#[derive(Debug, Clone, Copy)]
pub struct Player;

/// Health component
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            max,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Marker inserted when death processing starts, so it runs at most once.
#[derive(Debug, Clone, Copy)]
pub struct Dying;

/// Hurtbox component - which contacts can damage this entity, and how it bleeds.
///
/// `trigger_tag == None` means the entity matches no contacts at all; it can
/// still take scripted damage through direct calls.
#[derive(Debug, Clone)]
pub struct Hurtbox {
    pub trigger_tag: Option<String>,
    pub radius: f32,
    pub blood_splash: bool,
}

/// Damage-dealing contact source: melee strikes, the player's pickup-collecting body.
///
/// `struck` keeps the entities this source already touched, so one continuous
/// overlap delivers exactly one contact, like a trigger-enter callback.
#[derive(Debug, Clone)]
pub struct ContactDamage {
    pub tag: String,
    pub amount: i32,
    pub radius: f32,
    pub struck: Vec<Entity>,
}

impl ContactDamage {
    pub fn new(tag: impl Into<String>, amount: i32, radius: f32) -> Self {
        Self {
            tag: tag.into(),
            amount,
            radius,
            struck: Vec::new(),
        }
    }
}

/// Lifetime component - seconds until the entity is removed by the driver.
#[derive(Debug, Clone, Copy)]
pub struct Lifetime(pub f32);

/// Per-entity feedback wiring: which sounds and particles its damage lifecycle plays.
#[derive(Debug, Clone, Default)]
pub struct FeedbackProfile {
    pub hurt_sound: Option<SfxId>,
    pub death_sound: Option<SfxId>,
    pub hurt_particles: Vec<ParticleId>,
    pub death_particles: Option<ParticleId>,
    pub attack_fx: bool,
}

/// What a drop materializes as when its owner dies.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropKind {
    Money { value: i32 },
    Health { amount: i32 },
}

/// One drop-table entry: `amount` pickups of `kind`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DropSpec {
    pub kind: DropKind,
    pub amount: u32,
}

/// Drop table component - materialized once, on death.
#[derive(Debug, Clone, Default)]
pub struct DropTable(pub Vec<DropSpec>);

/// Launch impulse for a freshly dropped pickup; consumed by the external physics layer.
#[derive(Debug, Clone, Copy)]
pub struct DropImpulse(pub Vec2);

/// Money pickup component - collected through the damage interface.
#[derive(Debug, Clone, Copy)]
pub struct MoneyPickup {
    pub value: i32,
}

/// Health pickup component - heals the player on collection.
#[derive(Debug, Clone, Copy)]
pub struct HealthPickup {
    pub amount: i32,
}

/// Wallet component - spendable money
#[derive(Debug, Clone, Copy, Default)]
pub struct Wallet {
    pub money: i32,
}

impl Wallet {
    pub fn new(money: i32) -> Self {
        Self { money }
    }

    pub fn can_afford(&self, price: i32) -> bool {
        self.money >= price
    }

    pub fn pay(&mut self, amount: i32) {
        self.money -= amount;
    }

    pub fn receive(&mut self, amount: i32) {
        self.money += amount;
    }
}

/// Boss states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossState {
    Idle,
    Intro,
    ChasePlayer,
    Attack,
}

/// Boss component - combat tuning, fixed at spawn from `BossConfig`.
///
/// `fight_activated` is the one mutable field: the arena trigger sets it when
/// the player steps in, and the state machine reads it every tick.
#[derive(Debug, Clone)]
pub struct Boss {
    pub name: String,
    pub chase_speed: f32,
    pub attack_range: f32,
    pub attack_damage: i32,
    pub attack_reach: f32,
    pub intro_duration: f32,
    pub attack_duration: f32,
    pub attack_strike_time: f32,
    pub fight_activated: bool,
}

/// Boss state machine record.
///
/// Countdowns are per-instance and persist across re-entries; a transition
/// that wants a fresh timer resets it explicitly on the way out.
#[derive(Debug, Clone)]
pub struct BossBrain {
    pub state: BossState,
    pub fight_in_progress: bool,
    pub idle_time: f32,
    pub intro_time: f32,
    pub attack_time: f32,
    pub has_struck: bool,
}

impl BossBrain {
    pub fn new(intro_duration: f32, attack_duration: f32) -> Self {
        Self {
            state: BossState::Idle,
            fight_in_progress: false,
            idle_time: BOSS_IDLE_PAUSE,
            intro_time: intro_duration,
            attack_time: attack_duration,
            has_struck: false,
        }
    }
}

/// Item categories - decide which holder a purchase lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Ability,
    Rune,
    Other,
}

/// Definition of a purchasable item.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDef {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub stackable: bool,
}

/// One shelf entry in a shop's stock.
#[derive(Debug, Clone, Deserialize)]
pub struct Stock {
    pub item: ItemDef,
    pub price: i32,
    #[serde(default = "default_stock_amount")]
    pub amount: u32,
}

fn default_stock_amount() -> u32 {
    1
}

/// Shop component
#[derive(Debug, Clone)]
pub struct Shop {
    pub name: String,
    pub stock: Vec<Stock>,
}

/// Typed containers purchased items are routed into.
#[derive(Debug, Clone, Default)]
pub struct ItemHolders {
    pub abilities: Vec<ItemDef>,
    pub runes: Vec<ItemDef>,
    pub other: Vec<ItemDef>,
}
