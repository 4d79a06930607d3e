//! Game systems organized by domain.
//!
//! This module contains all game logic systems, split into focused submodules:
//! - `boss`: Boss combat state machine
//! - `damage`: Damageable entity lifecycle (damage, heal, death, drops)
//! - `shop`: Wallet-checked shop transactions

pub mod boss;
pub mod damage;
pub mod shop;

// Re-export commonly used items
pub use boss::{tick_boss, tick_bosses, BossContext, BossTickError, StrikeRequest};
pub use damage::{
    apply_trigger_contact, die, heal, spawn_drops, take_damage, DamageResult, TriggerContact,
};
pub use shop::sell_item;
