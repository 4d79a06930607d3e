//! Presentation feedback boundary.
//!
//! Audio, particles, attack FX, and camera shake live outside this crate.
//! Systems talk to them through the fire-and-forget `FeedbackSink` trait, so
//! a real frontend can route the calls to its audio/particle services while
//! headless drivers and tests plug in `NullFeedback` or a recording fake.

use glam::Vec2;
use serde::Deserialize;

/// Index of a sound effect in the surrounding audio service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SfxId(pub u32);

/// Index of a particle effect in the surrounding particle service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ParticleId(pub u32);

/// Fire-and-forget presentation callbacks. No call returns a value and no
/// call may affect gameplay state.
pub trait FeedbackSink {
    fn play_sound(&mut self, sound: SfxId);

    fn spawn_particles(&mut self, effect: ParticleId, position: Vec2);

    /// Impact flash on a hurt entity. `quarter_turns` is a pre-rolled 0-3
    /// orientation so every flash lands slightly different.
    fn spawn_attack_fx(&mut self, position: Vec2, quarter_turns: u8);

    /// Directional blood spray pointing away from the damage source.
    fn spawn_blood_splash(&mut self, position: Vec2, direction: Vec2);

    fn camera_shake(&mut self);
}

/// Sink that ignores every callback, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn play_sound(&mut self, _sound: SfxId) {}

    fn spawn_particles(&mut self, _effect: ParticleId, _position: Vec2) {}

    fn spawn_attack_fx(&mut self, _position: Vec2, _quarter_turns: u8) {}

    fn spawn_blood_splash(&mut self, _position: Vec2, _direction: Vec2) {}

    fn camera_shake(&mut self) {}
}
