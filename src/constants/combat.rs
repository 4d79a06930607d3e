//! Damage and pickup constants.

/// Contact tag carried by the player's attack strikes
pub const PLAYER_ATTACK_TAG: &str = "Attack";
/// Contact tag carried by the player's body (what collects pickups)
pub const PLAYER_BODY_TAG: &str = "Player";
/// Contact tag carried by enemy attack strikes
pub const ENEMY_ATTACK_TAG: &str = "Enemy";
/// Launch impulse magnitude for freshly dropped pickups
pub const DROP_FORCE: f32 = 3.0;
/// Hurtbox radius used when a config omits one
pub const DEFAULT_HURTBOX_RADIUS: f32 = 0.5;
/// Hurtbox radius of dropped pickups
pub const PICKUP_RADIUS: f32 = 0.4;
/// Touch damage the player's body deals to pickups (enough to collect)
pub const PICKUP_TOUCH_DAMAGE: i32 = 1;
/// Contact radius of the player's pickup-collecting body
pub const PLAYER_BODY_RADIUS: f32 = 0.5;
