//! Simulation module
//!
//! All gameplay logic lives here:
//! - One flat, ordered list of bodies
//! - Axis-aligned box collision
//! - Randomness, input and sound injected per tick
//! - No rendering or platform dependencies beyond the `DrawSurface` trait

pub mod body;
pub mod geometry;
pub mod world;

#[cfg(test)]
pub(crate) mod test_util;

pub use body::{Body, Bullet, Invader, Player, TickContext};
pub use geometry::{Bounds, colliding};
pub use world::{World, invader_grid, invaders_below};
