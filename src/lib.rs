//! Falling Shapes - a shape spawner for a 2D viewport
//!
//! Core modules:
//! - `sim`: Game controller (spawn scheduler, shape generation, statistics, events)
//! - `renderer`: Tessellation of shape descriptors into colored triangles
//! - `config`: Tunable configuration with JSON loading
//! - `error`: Configuration-state errors

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{GameConfig, StatsPolicy};
pub use error::GameError;

use glam::Vec2;

/// Default tunables
pub mod consts {
    /// Base size unit for every generated shape
    pub const RADIUS: f32 = 60.0;
    /// Shapes generated per scheduler firing
    pub const SHAPES_PER_SECOND: u32 = 15;
    /// Scheduler period
    pub const SPAWN_INTERVAL_MS: u32 = 1000;
    /// Advisory gravity forwarded to the physics step
    pub const GRAVITY_FORCE: f32 = 9.0;

    /// Maximum scheduler firings handled per update to prevent spiral of death
    pub const MAX_CATCHUP_FIRINGS: u32 = 8;

    /// Step applied by increase/decrease spawn rate
    pub const SPAWN_RATE_STEP: u32 = 1;
    /// Step applied by increase/decrease gravity
    pub const GRAVITY_STEP: f32 = 1.0;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
