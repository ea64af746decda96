//! World Entities
//!
//! Everything placed in a level besides the player: terrain blocks, flame
//! hazards, patrolling enemies, coins, and the exit flag. Contact handling
//! dispatches on an explicit [`ContactClass`] tag rather than inspecting
//! concrete types, so growing the variant set touches one match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::geom::Aabb;
use crate::core::mask::SpriteMask;

/// Unique entity identifier (monotonic, assigned at level build).
pub type EntityId = u32;

/// Horizontal facing, used for sprite flipping and patrol direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Facing -x
    #[default]
    Left,
    /// Facing +x
    Right,
}

/// Contact classification consumed by the collision and damage steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactClass {
    /// Blocks movement, nothing else.
    Solid,
    /// Blocks movement and deals time-gated damage while armed.
    Hazard,
    /// Blocks movement and deals time-gated damage.
    Enemy,
    /// Collected on touch, never blocks.
    Pickup,
    /// Ends the level on touch, never blocks.
    Goal,
}

impl ContactClass {
    /// Whether this class participates in movement blocking and snapping.
    #[inline]
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Solid | Self::Hazard | Self::Enemy)
    }
}

/// Error constructing an entity from invalid parameters.
#[derive(Debug, Error, PartialEq)]
pub enum EntityConfigError {
    /// Patrol bounds were reversed or empty.
    #[error("patrol left bound {left} must be below right bound {right}")]
    PatrolBounds {
        /// Offending left bound
        left: f32,
        /// Offending right bound
        right: f32,
    },

    /// A bounding box dimension was zero or negative.
    #[error("entity size must be positive, got {width}x{height}")]
    NonPositiveSize {
        /// Offending width
        width: f32,
        /// Offending height
        height: f32,
    },
}

/// Horizontal patrol state for an enemy.
///
/// A two-state machine driven purely by position: walk until an edge of the
/// patrol range, clamp there, walk back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patrol {
    /// Leftmost x the enemy's left edge may reach.
    pub left_bound: f32,
    /// Rightmost x the enemy's right edge may reach.
    pub right_bound: f32,
    /// Speed magnitude per tick.
    pub speed: f32,
    /// Signed velocity for the current leg.
    pub x_vel: f32,
    /// Current walk direction.
    pub facing: Facing,
}

impl Patrol {
    fn new(left_bound: f32, right_bound: f32, speed: f32) -> Self {
        Self {
            left_bound,
            right_bound,
            speed: speed.abs(),
            x_vel: speed,
            facing: if speed < 0.0 { Facing::Left } else { Facing::Right },
        }
    }

    /// Advance `bounds` by one tick of patrol movement, clamping and turning
    /// at the range edges. Never overshoots by more than one tick's speed.
    pub fn advance(&mut self, bounds: &mut Aabb) {
        bounds.x += self.x_vel;
        if bounds.x <= self.left_bound {
            bounds.x = self.left_bound;
            self.x_vel = self.speed;
            self.facing = Facing::Right;
        } else if bounds.right() >= self.right_bound {
            bounds.x = self.right_bound - bounds.width;
            self.x_vel = -self.speed;
            self.facing = Facing::Left;
        }
    }
}

/// Variant-specific entity state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Solid terrain block.
    Block,
    /// Flame hazard. Damaging only while armed.
    Fire {
        /// Whether the flame is lit.
        armed: bool,
        /// Animation counter for frame cycling.
        anim_count: u32,
    },
    /// Patrolling enemy.
    Enemy(Patrol),
    /// Collectible coin.
    Coin {
        /// Set once picked up; a collected coin is inert.
        collected: bool,
    },
    /// Level exit flag.
    Flag,
}

/// One placed object in the world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique id (index order in the world list is the contact tie-break).
    pub id: EntityId,
    /// Bounding box in world space.
    pub bounds: Aabb,
    /// Optional pixel-accurate shape; `None` collides as the full box.
    pub mask: Option<SpriteMask>,
    /// Variant state.
    pub kind: EntityKind,
}

/// Flame hazard box width.
pub const FIRE_WIDTH: f32 = 16.0;
/// Flame hazard box height.
pub const FIRE_HEIGHT: f32 = 32.0;
/// Coin box edge length.
pub const COIN_SIZE: f32 = 24.0;

/// Ticks per animation frame for flame cycling.
const FLAME_ANIMATION_DELAY: u32 = 3;
/// Frames in the flame cycle.
const FLAME_FRAMES: u32 = 4;

impl Entity {
    /// A square terrain block.
    pub fn block(id: EntityId, x: f32, y: f32, size: f32) -> Self {
        Self {
            id,
            bounds: Aabb::new(x, y, size, size),
            mask: None,
            kind: EntityKind::Block,
        }
    }

    /// An unlit flame hazard at its fixed 16x32 size.
    pub fn fire(id: EntityId, x: f32, y: f32) -> Self {
        Self {
            id,
            bounds: Aabb::new(x, y, FIRE_WIDTH, FIRE_HEIGHT),
            mask: None,
            kind: EntityKind::Fire {
                armed: false,
                anim_count: 0,
            },
        }
    }

    /// A coin, with a round collision mask so box corners don't collect it.
    pub fn coin(id: EntityId, x: f32, y: f32) -> Self {
        let size = COIN_SIZE as u32;
        let radius = COIN_SIZE / 2.0;
        let mask = SpriteMask::from_fn(size, size, |px, py| {
            let dx = px as f32 + 0.5 - radius;
            let dy = py as f32 + 0.5 - radius;
            dx * dx + dy * dy <= radius * radius
        });
        Self {
            id,
            bounds: Aabb::new(x, y, COIN_SIZE, COIN_SIZE),
            mask: Some(mask),
            kind: EntityKind::Coin { collected: false },
        }
    }

    /// The level exit flag.
    pub fn flag(id: EntityId, x: f32, y: f32, size: f32) -> Self {
        Self {
            id,
            bounds: Aabb::new(x, y, size, size),
            mask: None,
            kind: EntityKind::Flag,
        }
    }

    /// A patrolling enemy.
    ///
    /// Fails fast on a reversed patrol range or non-positive size so a bad
    /// level can never loop an enemy forever.
    pub fn enemy(
        id: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        left_bound: f32,
        right_bound: f32,
        speed: f32,
    ) -> Result<Self, EntityConfigError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(EntityConfigError::NonPositiveSize { width, height });
        }
        if left_bound >= right_bound {
            return Err(EntityConfigError::PatrolBounds {
                left: left_bound,
                right: right_bound,
            });
        }
        Ok(Self {
            id,
            bounds: Aabb::new(x, y, width, height),
            mask: None,
            kind: EntityKind::Enemy(Patrol::new(left_bound, right_bound, speed)),
        })
    }

    /// Attach a pixel-accurate collision mask.
    pub fn with_mask(mut self, mask: SpriteMask) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Contact classification for this entity.
    pub fn class(&self) -> ContactClass {
        match self.kind {
            EntityKind::Block => ContactClass::Solid,
            EntityKind::Fire { .. } => ContactClass::Hazard,
            EntityKind::Enemy(_) => ContactClass::Enemy,
            EntityKind::Coin { .. } => ContactClass::Pickup,
            EntityKind::Flag => ContactClass::Goal,
        }
    }

    /// Whether touching this entity counts as damaging contact this tick.
    pub fn is_damaging(&self) -> bool {
        match self.kind {
            EntityKind::Fire { armed, .. } => armed,
            EntityKind::Enemy(_) => true,
            _ => false,
        }
    }

    /// Whether the entity still participates in collision at all.
    pub fn is_active(&self) -> bool {
        !matches!(self.kind, EntityKind::Coin { collected: true })
    }

    /// Light a flame hazard. No-op for other kinds.
    pub fn arm(&mut self) {
        if let EntityKind::Fire { armed, .. } = &mut self.kind {
            *armed = true;
        }
    }

    /// Quench a flame hazard. No-op for other kinds.
    pub fn disarm(&mut self) {
        if let EntityKind::Fire { armed, .. } = &mut self.kind {
            *armed = false;
        }
    }

    /// Mark a coin collected. Returns true the first time only.
    pub fn collect(&mut self) -> bool {
        if let EntityKind::Coin { collected } = &mut self.kind {
            if !*collected {
                *collected = true;
                return true;
            }
        }
        false
    }

    /// Advance one tick of autonomous behavior: patrol legs and flame frames.
    pub fn step(&mut self) {
        match &mut self.kind {
            EntityKind::Enemy(patrol) => patrol.advance(&mut self.bounds),
            EntityKind::Fire { anim_count, .. } => {
                *anim_count = (*anim_count + 1) % (FLAME_ANIMATION_DELAY * FLAME_FRAMES);
            }
            _ => {}
        }
    }

    /// Current flame animation frame, for the render sink. Zero for
    /// non-flames.
    pub fn animation_frame(&self) -> u32 {
        match self.kind {
            EntityKind::Fire { anim_count, .. } => anim_count / FLAME_ANIMATION_DELAY,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_patrol_turns_at_right_bound() {
        // left 200, right 500, speed 2, width 40, starting at 480 moving
        // right: one step overshoots, clamps to 460, and flips.
        let mut enemy = Entity::enemy(0, 480.0, 0.0, 40.0, 40.0, 200.0, 500.0, 2.0).unwrap();

        enemy.step();
        assert_eq!(enemy.bounds.x, 460.0);
        if let EntityKind::Enemy(patrol) = &enemy.kind {
            assert_eq!(patrol.facing, Facing::Left);
            assert_eq!(patrol.x_vel, -2.0);
        } else {
            panic!("not an enemy");
        }
    }

    #[test]
    fn test_patrol_turns_at_left_bound() {
        let mut enemy = Entity::enemy(0, 201.0, 0.0, 40.0, 40.0, 200.0, 500.0, -2.0).unwrap();

        enemy.step();
        assert_eq!(enemy.bounds.x, 200.0);
        if let EntityKind::Enemy(patrol) = &enemy.kind {
            assert_eq!(patrol.facing, Facing::Right);
            assert_eq!(patrol.x_vel, 2.0);
        } else {
            panic!("not an enemy");
        }
    }

    #[test]
    fn test_patrol_stays_in_bounds_over_many_ticks() {
        let mut enemy = Entity::enemy(0, 300.0, 0.0, 40.0, 40.0, 200.0, 500.0, 7.0).unwrap();
        for _ in 0..1000 {
            enemy.step();
            assert!(enemy.bounds.x >= 200.0);
            assert!(enemy.bounds.x <= 500.0 - 40.0);
        }
    }

    #[test]
    fn test_enemy_rejects_bad_bounds() {
        let err = Entity::enemy(0, 0.0, 0.0, 40.0, 40.0, 500.0, 200.0, 2.0).unwrap_err();
        assert_eq!(
            err,
            EntityConfigError::PatrolBounds {
                left: 500.0,
                right: 200.0
            }
        );

        assert!(Entity::enemy(0, 0.0, 0.0, 0.0, 40.0, 0.0, 100.0, 2.0).is_err());
    }

    #[test]
    fn test_coin_mask_is_round() {
        let coin = Entity::coin(0, 0.0, 0.0);
        let mask = coin.mask.as_ref().unwrap();
        // Corner pixels fall outside the circle, center is inside.
        assert!(!mask.get(0, 0));
        assert!(!mask.get(23, 23));
        assert!(mask.get(12, 12));
    }

    #[test]
    fn test_fire_arming_controls_damage() {
        let mut fire = Entity::fire(0, 0.0, 0.0);
        assert!(!fire.is_damaging());
        fire.arm();
        assert!(fire.is_damaging());
        fire.disarm();
        assert!(!fire.is_damaging());
    }

    #[test]
    fn test_coin_collects_once() {
        let mut coin = Entity::coin(0, 0.0, 0.0);
        assert!(coin.is_active());
        assert!(coin.collect());
        assert!(!coin.collect());
        assert!(!coin.is_active());
    }

    proptest! {
        #[test]
        fn prop_patrol_never_escapes_bounds(
            start in 200.0f32..460.0,
            speed in -12.0f32..12.0,
            ticks in 1usize..400,
        ) {
            prop_assume!(speed != 0.0);
            let mut enemy =
                Entity::enemy(0, start, 0.0, 40.0, 40.0, 200.0, 500.0, speed).unwrap();
            for _ in 0..ticks {
                enemy.step();
                prop_assert!(enemy.bounds.x >= 200.0);
                prop_assert!(enemy.bounds.x <= 500.0 - 40.0);
            }
        }
    }

    #[test]
    fn test_classes() {
        assert_eq!(Entity::block(0, 0.0, 0.0, 96.0).class(), ContactClass::Solid);
        assert_eq!(Entity::fire(0, 0.0, 0.0).class(), ContactClass::Hazard);
        assert_eq!(Entity::coin(0, 0.0, 0.0).class(), ContactClass::Pickup);
        assert_eq!(Entity::flag(0, 0.0, 0.0, 96.0).class(), ContactClass::Goal);
        assert!(ContactClass::Solid.is_blocking());
        assert!(!ContactClass::Pickup.is_blocking());
        assert!(!ContactClass::Goal.is_blocking());
    }
}
