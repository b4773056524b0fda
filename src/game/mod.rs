//! The widgets that sit between the game state and the player.

pub mod composter;

pub use composter::{ComposterName, ComposterStatus, ComposterWidget};
