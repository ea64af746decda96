//! Session State
//!
//! The aggregate the orchestrator mutates once per tick: the player, the
//! ordered world entity list, the camera, and the pending event queue. The
//! simulation thread owns this exclusively; a threaded renderer must snapshot
//! it (it is `Clone` and serializable) rather than share it.

use serde::{Deserialize, Serialize};

use crate::game::camera::Camera;
use crate::game::config::GameConfig;
use crate::game::entity::{Entity, EntityId};
use crate::game::events::GameEvent;
use crate::game::level::Level;
use crate::game::player::Player;

/// Current phase of a level session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Active gameplay
    #[default]
    Playing,
    /// The exit flag was reached
    Complete,
    /// Health hit zero
    GameOver,
}

/// Complete state of one level session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current tick.
    pub tick: u32,

    /// Session phase.
    pub phase: SessionPhase,

    /// The player, held outside the entity list: it takes part in every
    /// tick's movement and camera logic.
    pub player: Player,

    /// All world entities. Iteration order is the collision tie-break order.
    pub entities: Vec<Entity>,

    /// Follow camera.
    pub camera: Camera,

    /// Coins collected this session.
    pub coins_collected: u32,

    /// Events generated this tick (drained by the orchestrator).
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl GameState {
    /// Build a session from a parsed level.
    pub fn from_level(level: Level, config: &GameConfig) -> Self {
        Self {
            tick: 0,
            phase: SessionPhase::Playing,
            player: Player::new(level.player_spawn.x, level.player_spawn.y, config),
            entities: level.entities,
            camera: Camera::new(config),
            coins_collected: 0,
            pending_events: Vec::new(),
        }
    }

    /// Milliseconds of simulated time, derived from the tick counter so the
    /// damage clock never reads the wall clock.
    #[inline]
    pub fn elapsed_ms(&self, fps: u32) -> u64 {
        self.tick as u64 * 1000 / fps as u64
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up an entity mutably by id.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Entities the renderer should draw this tick (collected coins are
    /// gone).
    pub fn visible_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_active())
    }

    /// Whether the session is over (either way).
    #[inline]
    pub fn is_ended(&self) -> bool {
        !matches!(self.phase, SessionPhase::Playing)
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
