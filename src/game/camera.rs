//! Dead-Zone Follow Camera
//!
//! A classic scroll-box camera: the world offset stands still while the
//! player moves around the middle of the viewport, and only advances once the
//! player pushes into a margin near an edge while moving toward it. Because
//! the rule reads velocity rather than position delta, a player pinned
//! against a wall (velocity forced to zero) never drags the camera.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::game::config::GameConfig;
use crate::game::player::Player;

/// Viewport offset follower.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// World offset subtracted from positions at render time.
    pub offset: Vec2,
    /// Viewport extent in world units.
    pub viewport: Vec2,
    /// Dead-zone margin near each edge.
    pub margin: Vec2,
}

impl Camera {
    /// A camera at the origin sized from the config's viewport.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport: Vec2::new(config.viewport_width, config.viewport_height),
            margin: Vec2::new(config.scroll_margin_x(), config.scroll_margin_y()),
        }
    }

    /// Advance the offset by the player's velocity where the dead-zone rule
    /// allows it.
    pub fn update(&mut self, player: &Player) {
        let bounds = &player.bounds;

        let pushing_right =
            bounds.right() - self.offset.x >= self.viewport.x - self.margin.x && player.x_vel > 0.0;
        let pushing_left = bounds.left() - self.offset.x <= self.margin.x && player.x_vel < 0.0;
        if pushing_right || pushing_left {
            self.offset.x += player.x_vel;
        }

        let pushing_down =
            bounds.bottom() - self.offset.y >= self.viewport.y - self.margin.y && player.y_vel > 0.0;
        let pushing_up = bounds.top() - self.offset.y <= self.margin.y && player.y_vel < 0.0;
        if pushing_down || pushing_up {
            self.offset.y += player.y_vel;
        }
    }
}
