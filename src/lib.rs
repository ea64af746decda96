//! # Ember Vale Simulation Core
//!
//! Deterministic per-frame simulation for the Ember Vale side-scrolling
//! platformer. Rendering, asset loading, and menus are external collaborators:
//! the core consumes per-tick input snapshots and exposes positions and
//! animation cues for a renderer to blit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     EMBER VALE CORE                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── geom.rs     - Axis-aligned boxes                        │
//! │  └── mask.rs     - Pixel-accurate collision masks            │
//! │                                                              │
//! │  game/           - Simulation logic (deterministic)          │
//! │  ├── input.rs    - Per-tick input snapshots                  │
//! │  ├── config.rs   - Tuning values and config files            │
//! │  ├── entity.rs   - World entities and patrol state           │
//! │  ├── player.rs   - Player kinematics, damage, animation      │
//! │  ├── collision.rs- Axis-separated collision resolution       │
//! │  ├── camera.rs   - Dead-zone follow camera                   │
//! │  ├── level.rs    - Grid text level parsing                   │
//! │  ├── state.rs    - Session state and render snapshots        │
//! │  ├── events.rs   - Game events                               │
//! │  └── tick.rs     - Frame orchestrator                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The simulation is single-threaded and fully deterministic: all timing
//! derives from the tick counter (never wall clock), entities are mutated in
//! place by the orchestrator alone, and iteration order over the world's
//! entity list doubles as the documented collision tie-break order. Given the
//! same level and input script, every run produces identical state.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::geom::Aabb;
pub use crate::core::mask::SpriteMask;
pub use crate::game::config::GameConfig;
pub use crate::game::entity::{ContactClass, Entity, EntityId, EntityKind};
pub use crate::game::events::GameEvent;
pub use crate::game::input::InputFrame;
pub use crate::game::level::Level;
pub use crate::game::player::Player;
pub use crate::game::state::{GameState, SessionPhase};
pub use crate::game::tick::TickResult;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
