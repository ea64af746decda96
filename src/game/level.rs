//! Grid Text Level Parsing
//!
//! Levels are comma-separated grids where each cell spawns one entity:
//! `B` block, `F` flame hazard, `P` player spawn, `C` coin, `G` goal flag,
//! and a composite enemy cell of five `E`-delimited integers
//! (`left_bound E right_bound E speed E width E height`). World coordinates
//! are `column * cell_size, row * cell_size`.
//!
//! Unrecognized symbols are silently ignored so levels can carry editor
//! annotations; malformed enemy cells are a hard error rather than a
//! misplaced enemy.

use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use crate::game::entity::{Entity, EntityConfigError, EntityId};

/// Number of integer fields in a composite enemy cell.
const ENEMY_FIELDS: usize = 5;

/// Default player spawn when a level defines none.
pub const DEFAULT_SPAWN: Vec2 = Vec2::new(100.0, 100.0);

/// Error loading or parsing level data.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    /// An enemy cell had the wrong number of fields.
    #[error("enemy cell at row {row}, column {col} has {found} fields, expected {ENEMY_FIELDS}")]
    EnemyFieldCount {
        /// Grid row of the offending cell
        row: usize,
        /// Grid column of the offending cell
        col: usize,
        /// Fields actually present
        found: usize,
    },

    /// An enemy cell field was not an integer.
    #[error("enemy cell at row {row}, column {col}: {value:?} is not an integer")]
    EnemyFieldParse {
        /// Grid row of the offending cell
        row: usize,
        /// Grid column of the offending cell
        col: usize,
        /// The unparseable field text
        value: String,
    },

    /// A cell produced an entity with invalid configuration.
    #[error("invalid entity at row {row}, column {col}: {source}")]
    InvalidEntity {
        /// Grid row of the offending cell
        row: usize,
        /// Grid column of the offending cell
        col: usize,
        /// The underlying construction error
        #[source]
        source: EntityConfigError,
    },
}

/// A parsed level: the spawn point and the ordered entity list.
///
/// Entity order is scan order (rows, then columns), which downstream doubles
/// as the collision tie-break order.
#[derive(Clone, Debug)]
pub struct Level {
    /// Player spawn point.
    pub player_spawn: Vec2,
    /// All placed entities, flames already armed.
    pub entities: Vec<Entity>,
}

impl Level {
    /// Parse level text with the given grid cell size.
    pub fn parse(text: &str, cell_size: f32) -> Result<Self, LevelError> {
        let mut entities = Vec::new();
        let mut player_spawn: Option<Vec2> = None;
        let mut next_id: EntityId = 0;
        let mut id = || {
            let assigned = next_id;
            next_id += 1;
            assigned
        };

        for (row, line) in text.lines().enumerate() {
            for (col, cell) in line.split(',').enumerate() {
                let cell = cell.trim();
                let x = col as f32 * cell_size;
                let y = row as f32 * cell_size;

                match cell {
                    "B" => entities.push(Entity::block(id(), x, y, cell_size)),
                    "F" => entities.push(Entity::fire(id(), x, y)),
                    "C" => entities.push(Entity::coin(id(), x, y)),
                    "G" => entities.push(Entity::flag(id(), x, y, cell_size)),
                    "P" => {
                        // Only the first spawn marker is honored.
                        if player_spawn.is_none() {
                            player_spawn = Some(Vec2::new(x, y));
                        }
                    }
                    _ if cell.contains('E') => {
                        entities.push(parse_enemy_cell(cell, row, col, id(), x, y)?);
                    }
                    // Anything else (including empty cells) spawns nothing.
                    _ => {}
                }
            }
        }

        // Levels loaded from data arrive with every hazard lit.
        for entity in &mut entities {
            entity.arm();
        }

        Ok(Self {
            player_spawn: player_spawn.unwrap_or(DEFAULT_SPAWN),
            entities,
        })
    }

    /// Read and parse a level file.
    pub fn from_path(path: impl AsRef<Path>, cell_size: f32) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text, cell_size)
    }
}

/// Parse a five-field `E`-delimited enemy cell.
fn parse_enemy_cell(
    cell: &str,
    row: usize,
    col: usize,
    id: EntityId,
    x: f32,
    y: f32,
) -> Result<Entity, LevelError> {
    let fields: Vec<&str> = cell.split('E').collect();
    if fields.len() != ENEMY_FIELDS {
        return Err(LevelError::EnemyFieldCount {
            row,
            col,
            found: fields.len(),
        });
    }

    let mut values = [0i64; ENEMY_FIELDS];
    for (value, field) in values.iter_mut().zip(&fields) {
        *value = field
            .trim()
            .parse()
            .map_err(|_| LevelError::EnemyFieldParse {
                row,
                col,
                value: (*field).to_string(),
            })?;
    }
    let [left_bound, right_bound, speed, width, height] = values;

    Entity::enemy(
        id,
        x,
        y,
        width as f32,
        height as f32,
        left_bound as f32,
        right_bound as f32,
        speed as f32,
    )
    .map_err(|source| LevelError::InvalidEntity { row, col, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{ContactClass, EntityKind, FIRE_HEIGHT, FIRE_WIDTH};

    #[test]
    fn test_parse_basic_grid() {
        let level = Level::parse(",P,,C\nB,B,F,G", 96.0).unwrap();

        assert_eq!(level.player_spawn, Vec2::new(96.0, 0.0));
        assert_eq!(level.entities.len(), 5);

        // Scan order: coin, block, block, fire, flag.
        assert_eq!(level.entities[0].class(), ContactClass::Pickup);
        assert_eq!(level.entities[0].bounds.x, 3.0 * 96.0);
        assert_eq!(level.entities[1].bounds.x, 0.0);
        assert_eq!(level.entities[1].bounds.y, 96.0);
        assert_eq!(level.entities[4].class(), ContactClass::Goal);
    }

    #[test]
    fn test_fire_is_armed_and_fixed_size() {
        let level = Level::parse("F", 96.0).unwrap();
        let fire = &level.entities[0];
        assert!(fire.is_damaging());
        assert_eq!(fire.bounds.width, FIRE_WIDTH);
        assert_eq!(fire.bounds.height, FIRE_HEIGHT);
    }

    #[test]
    fn test_missing_spawn_uses_default() {
        let level = Level::parse("B,B,B", 96.0).unwrap();
        assert_eq!(level.player_spawn, DEFAULT_SPAWN);
    }

    #[test]
    fn test_first_spawn_marker_wins() {
        let level = Level::parse("P,,P", 96.0).unwrap();
        assert_eq!(level.player_spawn, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_unknown_symbols_ignored() {
        let level = Level::parse("B,#,note,B", 96.0).unwrap();
        assert_eq!(level.entities.len(), 2);
    }

    #[test]
    fn test_enemy_cell() {
        let level = Level::parse(",,200E500E2E40E40", 96.0).unwrap();
        let enemy = &level.entities[0];
        assert_eq!(enemy.bounds.x, 192.0);
        assert_eq!(enemy.bounds.width, 40.0);
        match &enemy.kind {
            EntityKind::Enemy(patrol) => {
                assert_eq!(patrol.left_bound, 200.0);
                assert_eq!(patrol.right_bound, 500.0);
                assert_eq!(patrol.speed, 2.0);
            }
            other => panic!("expected enemy, got {other:?}"),
        }
    }

    #[test]
    fn test_enemy_cell_wrong_field_count_fails() {
        let err = Level::parse("200E500E2", 96.0).unwrap_err();
        assert!(matches!(
            err,
            LevelError::EnemyFieldCount { row: 0, col: 0, found: 3 }
        ));
    }

    #[test]
    fn test_enemy_cell_bad_integer_fails() {
        let err = Level::parse("200E500EfastE40E40", 96.0).unwrap_err();
        match err {
            LevelError::EnemyFieldParse { value, .. } => assert_eq!(value, "fast"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_enemy_cell_reversed_bounds_fail() {
        let err = Level::parse("500E200E2E40E40", 96.0).unwrap_err();
        assert!(matches!(err, LevelError::InvalidEntity { .. }));
    }

    #[test]
    fn test_cell_size_scales_coordinates() {
        let level = Level::parse("\n,B", 32.0).unwrap();
        assert_eq!(level.entities[0].bounds.x, 32.0);
        assert_eq!(level.entities[0].bounds.y, 32.0);
        assert_eq!(level.entities[0].bounds.width, 32.0);
    }
}
