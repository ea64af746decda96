//! Game Logic Module
//!
//! All simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `input`: Per-tick input snapshots
//! - `config`: Tuning values, config file loading
//! - `entity`: World entities, patrol and hazard state
//! - `player`: Player kinematics, damage, animation cues
//! - `collision`: Axis-separated collision resolution
//! - `camera`: Dead-zone follow camera
//! - `level`: Grid text level parsing
//! - `state`: Session state and render snapshots
//! - `events`: Game events
//! - `tick`: The frame orchestrator

pub mod camera;
pub mod collision;
pub mod config;
pub mod entity;
pub mod events;
pub mod input;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

// Re-export key types
pub use camera::Camera;
pub use config::GameConfig;
pub use entity::{ContactClass, Entity, EntityId, EntityKind};
pub use events::GameEvent;
pub use input::InputFrame;
pub use level::Level;
pub use player::Player;
pub use state::{GameState, SessionPhase};
pub use tick::TickResult;
