//! Engine-independent core for a small 2D action game: boss state machines,
//! a damageable-entity lifecycle with drops and pickups, and a shop economy.
//!
//! The host engine owns rendering, input, and physics. It embeds an
//! [`Arena`], feeds it fixed time steps, and reacts to the [`GameEvent`]
//! batches and [`FeedbackSink`] calls that come back.

pub mod arena;
pub mod components;
pub mod config;
pub mod constants;
pub mod events;
pub mod feedback;
pub mod queries;
pub mod spawning;
pub mod systems;

pub use arena::Arena;
pub use events::{EventQueue, GameEvent};
pub use feedback::{FeedbackSink, NullFeedback, ParticleId, SfxId};
