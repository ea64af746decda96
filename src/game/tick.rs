//! Frame Orchestrator
//!
//! One call to [`tick`] advances the whole simulation by a single frame, in
//! a strict sub-step order that never varies:
//!
//! input → player velocity update → horizontal probe → vertical resolve →
//! contact dispatch → damage gate → enemy patrol → camera.
//!
//! The orchestrator is the sole mutator of [`GameState`]; all entity updates
//! happen in place within a single pass per tick.

use tracing::debug;

use crate::game::collision::{self, Contact};
use crate::game::config::GameConfig;
use crate::game::entity::ContactClass;
use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::state::{GameState, SessionPhase};

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the session ended in death (this tick or earlier)
    pub game_over: bool,
    /// Whether the session ended at the exit flag (this tick or earlier)
    pub level_complete: bool,
}

/// Run one simulation tick.
///
/// # Arguments
///
/// * `state` - The session state (will be mutated)
/// * `input` - The input snapshot for this tick
/// * `config` - Simulation tuning
///
/// # Determinism
///
/// This function is 100% deterministic: the damage clock derives from the
/// tick counter, entities are visited in stored order, and no randomness or
/// wall time is consulted anywhere.
pub fn tick(state: &mut GameState, input: &InputFrame, config: &GameConfig) -> TickResult {
    let mut result = TickResult::default();

    // Terminal phases stay terminal.
    match state.phase {
        SessionPhase::Complete => {
            result.level_complete = true;
            return result;
        }
        SessionPhase::GameOver => {
            result.game_over = true;
            return result;
        }
        SessionPhase::Playing => {}
    }

    // 0. Advance tick counter
    state.tick += 1;

    // 1. Jump (edge-triggered, capped at the double jump)
    if input.jump_pressed() && state.player.can_jump() {
        state.player.jump(config.jump_impulse());
    }

    // 2. Gravity ramp into vertical velocity
    state
        .player
        .apply_gravity(config.fps, config.gravity, config.gravity_cap);

    // 3. Horizontal probe-and-revert, before any real horizontal movement
    let probe = collision::probe_horizontal(&state.player, &state.entities, config.probe_delta());

    // 4. Horizontal input, gated by the probe: a blocked direction cancels
    //    that key for this tick only, and opposing keys cancel each other
    state.player.x_vel = 0.0;
    let go_left = input.left_held() && probe.left.is_none();
    let go_right = input.right_held() && probe.right.is_none();
    if go_left && !go_right {
        state.player.move_left(config.player_vel);
    } else if go_right && !go_left {
        state.player.move_right(config.player_vel);
    }

    // 5. Apply this tick's velocities
    state.player.apply_velocity();

    // 6. Per-tick counters (hit flash decay, fall ramp, animation)
    state.player.advance_counters(config.hit_flash_ticks());

    // 7. Vertical resolve at the moved position
    let contacts = collision::resolve_vertical(&mut state.player, &state.entities);

    // 8. Contact dispatch: pickups, goal, damage eligibility
    let damaging = dispatch_contacts(state, &probe.left, &probe.right, &contacts);

    // 9. Damage gate: at most one point per interval of continuous contact
    apply_damage_gate(state, damaging, config);

    // 10. Autonomous entity steps: enemy patrol legs, flame frames
    for entity in &mut state.entities {
        entity.step();
    }

    // 11. Camera follow
    state.camera.update(&state.player);

    // 12. Terminal health check
    if state.player.is_dead() {
        let event = GameEvent::player_died(state.tick);
        state.push_event(event);
        state.phase = SessionPhase::GameOver;
        result.game_over = true;
        debug!(tick = state.tick, "player died");
    }

    result.level_complete = matches!(state.phase, SessionPhase::Complete);
    result.events = state.take_events();
    result
}

/// Process the tick's contact list: collect coins, reach the goal, and
/// report whether any contact was damaging.
fn dispatch_contacts(
    state: &mut GameState,
    probe_left: &Option<Contact>,
    probe_right: &Option<Contact>,
    contacts: &[Contact],
) -> bool {
    let mut damaging = probe_left.is_some_and(|c| c.damaging)
        || probe_right.is_some_and(|c| c.damaging);

    for contact in contacts {
        damaging |= contact.damaging;

        match contact.class {
            ContactClass::Pickup => {
                let newly_collected = state
                    .entity_mut(contact.entity_id)
                    .is_some_and(|entity| entity.collect());
                if newly_collected {
                    state.coins_collected += 1;
                    let event = GameEvent::coin_collected(
                        state.tick,
                        contact.entity_id,
                        state.coins_collected,
                    );
                    state.push_event(event);
                }
            }
            ContactClass::Goal => {
                if !matches!(state.phase, SessionPhase::Complete) {
                    state.phase = SessionPhase::Complete;
                    let event = GameEvent::goal_reached(state.tick, contact.entity_id);
                    state.push_event(event);
                    debug!(tick = state.tick, "goal reached");
                }
            }
            _ => {}
        }
    }

    damaging
}

/// Apply the time-gated damage rule.
///
/// A damaging tick raises the hit flash and, if the damage interval has
/// elapsed since the last damage tick, costs one health point. A tick
/// without damaging contact zeroes the damage clock so the next contact
/// hurts immediately rather than waiting out a stale interval.
fn apply_damage_gate(state: &mut GameState, damaging: bool, config: &GameConfig) {
    if !damaging {
        state.player.last_damage_ms = 0;
        return;
    }

    state.player.make_hit();

    let now = state.elapsed_ms(config.fps);
    if now.saturating_sub(state.player.last_damage_ms) >= config.damage_interval_ms {
        state.player.take_damage(1);
        state.player.last_damage_ms = now;
        let event = GameEvent::damage_taken(state.tick, state.player.health);
        state.push_event(event);
        debug!(
            tick = state.tick,
            health = state.player.health,
            "damage tick"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::Entity;
    use crate::game::events::GameEventData;
    use crate::game::level::Level;

    const FLOOR_TOP: f32 = 500.0;

    /// A session with a long floor at y=500 and the player resting on it.
    fn floor_state(config: &GameConfig, extra: Vec<Entity>) -> GameState {
        let mut entities: Vec<Entity> = (0..20)
            .map(|i| Entity::block(i, i as f32 * 96.0 - 480.0, FLOOR_TOP, 96.0))
            .collect();
        let base_id = entities.len() as u32;
        entities.extend(extra.into_iter().map(|mut e| {
            e.id += base_id;
            e
        }));

        let level = Level {
            player_spawn: glam::Vec2::new(100.0, FLOOR_TOP - config.player_height),
            entities,
        };
        GameState::from_level(level, config)
    }

    fn run_ticks(state: &mut GameState, config: &GameConfig, input: InputFrame, n: u32) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(tick(state, &input, config).events);
        }
        events
    }

    #[test]
    fn test_rest_on_floor_is_stable() {
        let config = GameConfig::default();
        let mut state = floor_state(&config, vec![]);

        for _ in 0..300 {
            let result = tick(&mut state, &InputFrame::new(), &config);
            assert!(result.events.is_empty());
            assert_eq!(state.player.bounds.bottom(), FLOOR_TOP);
            assert_eq!(state.player.y_vel, 0.0);
            assert!(state.player.fall_count <= 1);
        }
        assert_eq!(state.player.health, config.max_health);
    }

    #[test]
    fn test_walk_right_moves_player() {
        let config = GameConfig::default();
        let mut state = floor_state(&config, vec![]);
        let start_x = state.player.bounds.x;

        run_ticks(&mut state, &config, InputFrame::with_movement(false, true), 10);
        assert_eq!(state.player.bounds.x, start_x + 10.0 * config.player_vel);
    }

    #[test]
    fn test_both_keys_cancel_out() {
        let config = GameConfig::default();
        let mut state = floor_state(&config, vec![]);
        let start_x = state.player.bounds.x;

        run_ticks(&mut state, &config, InputFrame::with_movement(true, true), 10);
        assert_eq!(state.player.bounds.x, start_x);
    }

    #[test]
    fn test_wall_blocks_movement_for_the_tick() {
        let config = GameConfig::default();
        // Wall directly right of spawn (player box 100..150).
        let wall = Entity::block(0, 155.0, FLOOR_TOP - 96.0, 96.0);
        let mut state = floor_state(&config, vec![wall]);
        let start_x = state.player.bounds.x;

        run_ticks(&mut state, &config, InputFrame::with_movement(false, true), 5);
        assert_eq!(state.player.bounds.x, start_x);
        // The blocked key never produced velocity, so the camera saw none.
        assert_eq!(state.camera.offset.x, 0.0);

        // Walking away from the wall still works.
        run_ticks(&mut state, &config, InputFrame::with_movement(true, false), 2);
        assert_eq!(state.player.bounds.x, start_x - 2.0 * config.player_vel);
    }

    #[test]
    fn test_jump_and_double_jump() {
        let config = GameConfig::default();
        let mut state = floor_state(&config, vec![]);

        tick(&mut state, &InputFrame::jump(), &config);
        assert_eq!(state.player.jump_count, 1);
        assert!(state.player.y_vel < 0.0);

        // A few rising ticks, then the air jump.
        run_ticks(&mut state, &config, InputFrame::new(), 3);
        tick(&mut state, &InputFrame::jump(), &config);
        assert_eq!(state.player.jump_count, 2);

        // Third jump request is ignored.
        tick(&mut state, &InputFrame::jump(), &config);
        assert_eq!(state.player.jump_count, 2);

        // Ride the arc back down to the floor; landing restores both jumps.
        for _ in 0..600 {
            tick(&mut state, &InputFrame::new(), &config);
            if state.player.jump_count == 0 && state.player.bounds.bottom() == FLOOR_TOP {
                break;
            }
        }
        assert_eq!(state.player.jump_count, 0);
        assert_eq!(state.player.bounds.bottom(), FLOOR_TOP);
    }

    #[test]
    fn test_falling_lands_on_floor() {
        let config = GameConfig::default();
        let mut state = floor_state(&config, vec![]);
        // Hoist the player well above the floor.
        state.player.bounds.y = FLOOR_TOP - 300.0;

        run_ticks(&mut state, &config, InputFrame::new(), 300);
        assert_eq!(state.player.bounds.bottom(), FLOOR_TOP);
        assert_eq!(state.player.y_vel, 0.0);
        assert_eq!(state.player.jump_count, 0);
    }

    #[test]
    fn test_damage_interval_over_continuous_contact() {
        let config = GameConfig::default();
        // Flame inside the rightward probe band, level with the player.
        let mut fire = Entity::fire(0, 155.0, FLOOR_TOP - 40.0);
        fire.arm();
        let mut state = floor_state(&config, vec![fire]);

        // 2500 ms of continuous contact at 60 fps.
        let events = run_ticks(&mut state, &config, InputFrame::new(), 150);
        let damage_ticks: Vec<u32> = events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::DamageTaken { .. }))
            .map(|e| e.tick)
            .collect();

        assert_eq!(damage_ticks, vec![60, 120]);
        assert_eq!(state.player.health, config.max_health - 2);
        assert!(state.player.hit);
    }

    #[test]
    fn test_breaking_contact_resets_damage_clock() {
        let config = GameConfig::default();
        let mut fire = Entity::fire(0, 155.0, FLOOR_TOP - 40.0);
        fire.arm();
        let mut state = floor_state(&config, vec![fire]);
        let fire_id = state.entities.last().unwrap().id;

        // First damage tick lands at 1000 ms.
        run_ticks(&mut state, &config, InputFrame::new(), 61);
        assert_eq!(state.player.health, config.max_health - 1);

        // Quench the flame for one tick: contact is no longer damaging, so
        // the damage clock resets to zero.
        state.entity_mut(fire_id).unwrap().disarm();
        tick(&mut state, &InputFrame::new(), &config);
        assert_eq!(state.player.last_damage_ms, 0);

        // Re-arm: the very next contact hurts immediately, no interval wait.
        state.entity_mut(fire_id).unwrap().arm();
        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::DamageTaken { .. })));
        assert_eq!(state.player.health, config.max_health - 2);
    }

    #[test]
    fn test_coin_collection_is_once_only() {
        let config = GameConfig::default();
        // Coin overlapping the spawn position.
        let coin = Entity::coin(0, 110.0, FLOOR_TOP - 40.0);
        let mut state = floor_state(&config, vec![coin]);

        let result = tick(&mut state, &InputFrame::new(), &config);
        let collected: Vec<_> = result
            .events
            .iter()
            .filter(|e| matches!(e.data, GameEventData::CoinCollected { .. }))
            .collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(state.coins_collected, 1);

        // Standing on the same spot: the coin is gone.
        let events = run_ticks(&mut state, &config, InputFrame::new(), 10);
        assert!(events
            .iter()
            .all(|e| !matches!(e.data, GameEventData::CoinCollected { .. })));
        assert_eq!(state.coins_collected, 1);
    }

    #[test]
    fn test_goal_completes_level() {
        let config = GameConfig::default();
        let flag = Entity::flag(0, 90.0, FLOOR_TOP - 96.0, 96.0);
        let mut state = floor_state(&config, vec![flag]);

        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(result.level_complete);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e.data, GameEventData::GoalReached { .. })));
        assert_eq!(state.phase, SessionPhase::Complete);

        // Terminal phases are sticky and emit nothing further.
        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(result.level_complete);
        assert!(result.events.is_empty());
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_health_zero_is_game_over() {
        let config = GameConfig::default();
        let mut fire = Entity::fire(0, 155.0, FLOOR_TOP - 40.0);
        fire.arm();
        let mut state = floor_state(&config, vec![fire]);
        state.player.health = 1;

        // One damage tick at 1000 ms kills.
        let events = run_ticks(&mut state, &config, InputFrame::new(), 60);
        assert!(events
            .iter()
            .any(|e| matches!(e.data, GameEventData::PlayerDied)));
        assert_eq!(state.phase, SessionPhase::GameOver);
        assert_eq!(state.player.health, 0);

        let result = tick(&mut state, &InputFrame::new(), &config);
        assert!(result.game_over);
    }

    #[test]
    fn test_enemy_contact_damages_and_patrols() {
        let config = GameConfig::default();
        // Enemy starting just right of the player, walking toward it.
        let enemy = Entity::enemy(0, 160.0, FLOOR_TOP - 40.0, 40.0, 40.0, 60.0, 400.0, -2.0)
            .unwrap();
        let mut state = floor_state(&config, vec![enemy]);

        // Long enough for the patrol to sweep into probe range and deal a
        // gated damage tick.
        let events = run_ticks(&mut state, &config, InputFrame::new(), 120);
        assert!(events
            .iter()
            .any(|e| matches!(e.data, GameEventData::DamageTaken { .. })));
        assert!(state.player.health < config.max_health);
    }

    #[test]
    fn test_tick_determinism() {
        use rand::{rngs::StdRng, Rng, SeedableRng};

        let config = GameConfig::default();
        let text = "P,,C,,G\nB,B,B,B,B";
        let mut state1 = GameState::from_level(Level::parse(text, 96.0).unwrap(), &config);
        let mut state2 = GameState::from_level(Level::parse(text, 96.0).unwrap(), &config);

        // One seeded input script, replayed against both sessions.
        let mut rng = StdRng::seed_from_u64(42);
        let script: Vec<InputFrame> = (0..400)
            .map(|_| {
                let mut input = InputFrame::with_movement(rng.gen_bool(0.2), rng.gen_bool(0.6));
                input.set_jump(rng.gen_bool(0.05));
                input
            })
            .collect();

        for input in &script {
            tick(&mut state1, input, &config);
            tick(&mut state2, input, &config);
        }

        assert_eq!(state1, state2);
    }
}
