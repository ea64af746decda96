//! Player State
//!
//! Kinematics, jump bookkeeping, damage, and the animation cue the renderer
//! picks sprites by. The player is not part of the generic entity list: it
//! participates in every tick's movement and camera logic, so it is held
//! separately by the session state.

use serde::{Deserialize, Serialize};

use crate::core::geom::Aabb;
use crate::core::mask::SpriteMask;
use crate::game::config::GameConfig;
use crate::game::entity::Facing;

/// Which sprite sheet the renderer should cycle this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationCue {
    /// Standing still
    Idle,
    /// Moving horizontally on the ground
    Run,
    /// Rising from the first jump
    Jump,
    /// Rising from the second jump
    DoubleJump,
    /// Falling fast
    Fall,
    /// Hit flash after hazard contact
    Hit,
}

/// Ticks per animation frame for sprite cycling.
const ANIMATION_DELAY: u32 = 3;

/// The player character.
///
/// Created once at level start and mutated every tick; health reaching zero
/// ends the level rather than destroying the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Bounding box in world space.
    pub bounds: Aabb,
    /// Optional pixel-accurate shape; `None` collides as the full box.
    pub mask: Option<SpriteMask>,
    /// Horizontal velocity, set fresh from input every tick.
    pub x_vel: f32,
    /// Vertical velocity, accumulated by the gravity ramp.
    pub y_vel: f32,
    /// Sprite facing.
    pub facing: Facing,
    /// Jumps taken since last landing (caps at the double jump).
    pub jump_count: u32,
    /// Ticks since last ground contact; drives the gravity ramp.
    pub fall_count: u32,
    /// Hit flash active.
    pub hit: bool,
    /// Ticks the hit flash has been up.
    pub hit_count: u32,
    /// Current health, clamped to `[0, max_health]`.
    pub health: u32,
    /// Heal clamp and spawn health.
    pub max_health: u32,
    /// Simulation milliseconds of the most recent damage tick; zero means
    /// the next damaging contact hurts immediately.
    pub last_damage_ms: u64,
    /// Animation counter for sprite cycling; reset on direction flips and
    /// jumps.
    pub anim_count: u32,
}

impl Player {
    /// Spawn a player with full health at `(x, y)`.
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        Self {
            bounds: Aabb::new(x, y, config.player_width, config.player_height),
            mask: None,
            x_vel: 0.0,
            y_vel: 0.0,
            facing: Facing::Left,
            jump_count: 0,
            fall_count: 0,
            hit: false,
            hit_count: 0,
            health: config.max_health,
            max_health: config.max_health,
            last_damage_ms: 0,
            anim_count: 0,
        }
    }

    /// Set leftward velocity for this tick.
    pub fn move_left(&mut self, vel: f32) {
        self.x_vel = -vel;
        if self.facing != Facing::Left {
            self.facing = Facing::Left;
            self.anim_count = 0;
        }
    }

    /// Set rightward velocity for this tick.
    pub fn move_right(&mut self, vel: f32) {
        self.x_vel = vel;
        if self.facing != Facing::Right {
            self.facing = Facing::Right;
            self.anim_count = 0;
        }
    }

    /// Whether another jump is available (ground jump plus one air jump).
    #[inline]
    pub fn can_jump(&self) -> bool {
        self.jump_count < 2
    }

    /// Launch a jump: a fixed upward impulse, not cumulative.
    ///
    /// The first jump restarts the gravity ramp; the double jump keeps it,
    /// so a late second jump fights accumulated fall speed.
    pub fn jump(&mut self, impulse: f32) {
        self.y_vel = impulse;
        self.anim_count = 0;
        self.jump_count += 1;
        if self.jump_count == 1 {
            self.fall_count = 0;
        }
    }

    /// Accumulate gravity: a clamped linear ramp, not pure integration.
    pub fn apply_gravity(&mut self, fps: u32, gravity: f32, cap: f32) {
        self.y_vel += (self.fall_count as f32 / fps as f32 * gravity).min(cap);
    }

    /// Apply this tick's velocities to the bounding box.
    pub fn apply_velocity(&mut self) {
        self.bounds.translate(self.x_vel, self.y_vel);
    }

    /// Ground contact: kill fall speed and restore both jumps.
    pub fn landed(&mut self) {
        self.fall_count = 0;
        self.y_vel = 0.0;
        self.jump_count = 0;
    }

    /// Ceiling contact: bounce downward at unchanged speed.
    pub fn hit_head(&mut self) {
        self.fall_count = 0;
        self.y_vel = -self.y_vel;
    }

    /// Start (or restart) the hit flash.
    pub fn make_hit(&mut self) {
        self.hit = true;
        self.hit_count = 0;
    }

    /// Advance per-tick counters: hit flash decay, fall ramp, animation.
    pub fn advance_counters(&mut self, hit_flash_ticks: u32) {
        if self.hit {
            self.hit_count += 1;
            if self.hit_count > hit_flash_ticks {
                self.hit = false;
                self.hit_count = 0;
            }
        }
        self.fall_count += 1;
        self.anim_count += 1;
    }

    /// Reduce health, clamped at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Restore health, clamped at `max_health`.
    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Whether the terminal health condition has been reached.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Select the sprite sheet for this tick's pose.
    pub fn animation_cue(&self, gravity: f32) -> AnimationCue {
        if self.hit {
            AnimationCue::Hit
        } else if self.y_vel < 0.0 {
            match self.jump_count {
                1 => AnimationCue::Jump,
                2 => AnimationCue::DoubleJump,
                _ => AnimationCue::Idle,
            }
        } else if self.y_vel > gravity * 2.0 {
            AnimationCue::Fall
        } else if self.x_vel != 0.0 {
            AnimationCue::Run
        } else {
            AnimationCue::Idle
        }
    }

    /// Current frame index within the cue's sheet; the renderer wraps it by
    /// its sheet length.
    #[inline]
    pub fn animation_frame(&self) -> u32 {
        self.anim_count / ANIMATION_DELAY
    }
}
