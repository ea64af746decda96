//! Simulation Tuning and Config Files
//!
//! Every constant that shapes the feel of the game lives here, with the
//! values the levels were tuned against as defaults. A JSON config file can
//! override any subset of fields (the frontend's settings dialog writes one).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file was not valid JSON for [`GameConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a simulation session.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation tick rate (Hz). Gravity ramp and timers scale with this.
    pub fps: u32,

    /// Viewport width in world units (camera dead-zone math is screen-space).
    pub viewport_width: f32,

    /// Viewport height in world units.
    pub viewport_height: f32,

    /// Player horizontal speed per tick (binary: full speed or nothing).
    pub player_vel: f32,

    /// Gravity ramp slope per tick of falling.
    pub gravity: f32,

    /// Upper bound on the per-tick gravity increment.
    pub gravity_cap: f32,

    /// Jump impulse as a multiple of gravity (upward, fixed, not cumulative).
    pub jump_impulse_factor: f32,

    /// Horizontal probe distance as a multiple of `player_vel`. Larger than
    /// one tick's move so the probe sees a collision before it happens.
    pub probe_lookahead: f32,

    /// Player health at spawn, also the heal clamp.
    pub max_health: u32,

    /// Minimum milliseconds of continuous hazard contact between damage ticks.
    pub damage_interval_ms: u64,

    /// Seconds the hit flash stays up after hazard contact.
    pub hit_flash_secs: f32,

    /// Level grid cell size in world units.
    pub cell_size: f32,

    /// Player bounding box width.
    pub player_width: f32,

    /// Player bounding box height.
    pub player_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            viewport_width: 1000.0,
            viewport_height: 800.0,
            player_vel: 6.0,
            gravity: 0.98,
            gravity_cap: 0.98,
            jump_impulse_factor: 8.0,
            probe_lookahead: 1.6,
            max_health: 16,
            damage_interval_ms: 1000,
            hit_flash_secs: 0.8,
            cell_size: 96.0,
            player_width: 50.0,
            player_height: 50.0,
        }
    }
}

impl GameConfig {
    /// Load a config from a JSON file. Absent fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Horizontal dead-zone margin: a fifth of the viewport on each side.
    #[inline]
    pub fn scroll_margin_x(&self) -> f32 {
        self.viewport_width / 5.0
    }

    /// Vertical dead-zone margin: a sixth of the viewport top and bottom.
    #[inline]
    pub fn scroll_margin_y(&self) -> f32 {
        self.viewport_height / 6.0
    }

    /// The fixed upward jump velocity.
    #[inline]
    pub fn jump_impulse(&self) -> f32 {
        -self.gravity * self.jump_impulse_factor
    }

    /// The horizontal probe delta for one direction.
    #[inline]
    pub fn probe_delta(&self) -> f32 {
        self.player_vel * self.probe_lookahead
    }

    /// Ticks the hit flash stays up.
    #[inline]
    pub fn hit_flash_ticks(&self) -> u32 {
        (self.hit_flash_secs * self.fps as f32) as u32
    }
}
