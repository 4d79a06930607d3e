//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod boss;
mod combat;

// Re-export all constants at the module level
pub use boss::*;
pub use combat::*;
