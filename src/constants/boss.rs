//! Boss state machine constants.

/// Pause (seconds) a mid-fight boss idles before chasing again
pub const BOSS_IDLE_PAUSE: f32 = 0.5;
/// Intro cinematic length (seconds) when the config omits one
pub const DEFAULT_INTRO_DURATION: f32 = 2.5;
/// Full attack cycle length (seconds) when the config omits one
pub const DEFAULT_ATTACK_DURATION: f32 = 0.8;
/// Countdown value (seconds remaining) at which the swing connects
pub const DEFAULT_ATTACK_STRIKE_TIME: f32 = 0.45;
/// How long a spawned melee strike stays live (seconds)
pub const STRIKE_LIFETIME: f32 = 0.15;
