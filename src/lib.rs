//! Invaders - a minimal space invaders arcade game
//!
//! Core modules:
//! - `sim`: Simulation (bodies, collision, world step)
//! - `input`: Held-key tracking
//! - `audio`: Fire-and-forget sound effects
//! - `renderer`: Rectangle batching and the WebGPU pipeline
//! - `game`: Glue driven once per frame by the platform loop

pub mod audio;
pub mod error;
pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::Game;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::DVec2;

    /// Player ship
    pub const PLAYER_SIZE: DVec2 = DVec2::new(15.0, 15.0);
    /// Horizontal pixels per tick while an arrow key is held
    pub const PLAYER_SPEED: f64 = 2.0;
    pub const PLAYER_BULLET_VELOCITY: DVec2 = DVec2::new(0.0, -6.0);

    /// Bullets
    pub const BULLET_SIZE: DVec2 = DVec2::new(3.0, 3.0);

    /// Invaders
    pub const INVADER_SIZE: DVec2 = DVec2::new(15.0, 15.0);
    pub const INVADER_SPEED: f64 = 0.3;
    /// Patrol window; direction flips once displacement leaves [0, width]
    pub const INVADER_PATROL_WIDTH: f64 = 40.0;
    /// Fire when a uniform roll exceeds this (~0.5% per tick)
    pub const INVADER_FIRE_THRESHOLD: f64 = 0.995;
    pub const INVADER_BULLET_SPEED: f64 = 2.0;

    /// Opening formation
    pub const INVADER_COUNT: usize = 24;
    pub const INVADER_COLUMNS: usize = 8;
    pub const INVADER_ROWS: usize = 3;
    pub const INVADER_GRID_ORIGIN: f64 = 30.0;
    pub const INVADER_GRID_SPACING: f64 = 30.0;

    /// Native driver frame interval (~60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;
}
