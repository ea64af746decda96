//! Game Events
//!
//! Events generated during simulation, consumed by the presentation layer
//! (sound cues, HUD updates, the game-over dialog). Each carries the tick it
//! happened on so a recorded session can be replayed against them.

use serde::{Deserialize, Serialize};

use crate::game::entity::EntityId;

/// Game event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A damage tick landed on the player.
    DamageTaken {
        /// Health after the damage was applied.
        remaining_health: u32,
    },

    /// The player collected a coin.
    CoinCollected {
        /// The coin entity.
        entity_id: EntityId,
        /// Total coins collected this session.
        total: u32,
    },

    /// The player touched the exit flag.
    GoalReached {
        /// The flag entity.
        entity_id: EntityId,
    },

    /// Health reached zero. Emitted exactly once per session.
    PlayerDied,
}

/// A game event with its timing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred.
    pub tick: u32,
    /// Event data.
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a damage event.
    pub fn damage_taken(tick: u32, remaining_health: u32) -> Self {
        Self {
            tick,
            data: GameEventData::DamageTaken { remaining_health },
        }
    }

    /// Create a coin collection event.
    pub fn coin_collected(tick: u32, entity_id: EntityId, total: u32) -> Self {
        Self {
            tick,
            data: GameEventData::CoinCollected { entity_id, total },
        }
    }

    /// Create a goal event.
    pub fn goal_reached(tick: u32, entity_id: EntityId) -> Self {
        Self {
            tick,
            data: GameEventData::GoalReached { entity_id },
        }
    }

    /// Create the terminal death event.
    pub fn player_died(tick: u32) -> Self {
        Self {
            tick,
            data: GameEventData::PlayerDied,
        }
    }
}
