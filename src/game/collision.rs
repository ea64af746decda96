//! Axis-Separated Collision Resolution
//!
//! Horizontal and vertical collisions are resolved independently and in
//! sequence, never diagonally, which sidesteps corner ambiguity and tunneling
//! at platformer speeds.
//!
//! The horizontal side is probe-and-revert: test a lookahead position against
//! the world without committing it, and report whether each direction is
//! blocked. The vertical side runs after the real move and snaps the player's
//! edge onto the nearest contacted surface.

use serde::{Deserialize, Serialize};

use crate::core::geom::Aabb;
use crate::core::mask::SpriteMask;
use crate::game::entity::{ContactClass, Entity, EntityId};
use crate::game::player::Player;

/// One touched entity, recorded for the contact-dispatch step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// The touched entity.
    pub entity_id: EntityId,
    /// Its contact classification.
    pub class: ContactClass,
    /// Whether touching it counts as damaging this tick (armed hazards,
    /// enemies).
    pub damaging: bool,
}

impl Contact {
    fn from_entity(entity: &Entity) -> Self {
        Self {
            entity_id: entity.id,
            class: entity.class(),
            damaging: entity.is_damaging(),
        }
    }
}

/// Result of the pre-move horizontal probes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HorizontalProbe {
    /// First blocking entity within lookahead to the left, in world order.
    pub left: Option<Contact>,
    /// First blocking entity within lookahead to the right, in world order.
    pub right: Option<Contact>,
}

/// Shape-accurate intersection test between two placed shapes.
///
/// Falls back to the (already verified) box overlap when neither side
/// carries a mask; with one mask, the mask is tested against the boxes'
/// intersection region; with two, pixel against pixel.
pub fn shapes_overlap(
    a_bounds: &Aabb,
    a_mask: Option<&SpriteMask>,
    b_bounds: &Aabb,
    b_mask: Option<&SpriteMask>,
) -> bool {
    let Some(region) = a_bounds.intersection(b_bounds) else {
        return false;
    };
    match (a_mask, b_mask) {
        (Some(am), Some(bm)) => {
            let dx = (b_bounds.x - a_bounds.x).round() as i32;
            let dy = (b_bounds.y - a_bounds.y).round() as i32;
            am.overlaps(bm, dx, dy)
        }
        (Some(am), None) => mask_hits_region(am, a_bounds, &region),
        (None, Some(bm)) => mask_hits_region(bm, b_bounds, &region),
        (None, None) => true,
    }
}

/// Whether `mask` (anchored at `own`'s top-left) has any solid pixel inside
/// the world-space `region`.
fn mask_hits_region(mask: &SpriteMask, own: &Aabb, region: &Aabb) -> bool {
    let x0 = (region.left() - own.left()).floor().max(0.0) as u32;
    let y0 = (region.top() - own.top()).floor().max(0.0) as u32;
    let x1 = (((region.right() - own.left()).ceil()).max(0.0) as u32).min(mask.width());
    let y1 = (((region.bottom() - own.top()).ceil()).max(0.0) as u32).min(mask.height());

    for y in y0..y1 {
        for x in x0..x1 {
            if mask.get(x, y) {
                return true;
            }
        }
    }
    false
}

/// Test whether the player at `player_bounds` touches `entity`.
fn touches(player_bounds: &Aabb, player_mask: Option<&SpriteMask>, entity: &Entity) -> bool {
    entity.is_active()
        && shapes_overlap(
            player_bounds,
            player_mask,
            &entity.bounds,
            entity.mask.as_ref(),
        )
}

/// Probe one horizontal direction without committing the move.
///
/// The probe distance exceeds one tick's travel, so a hit means "a collision
/// is imminent in this direction" and the kinematics step suppresses that
/// key for the tick. Only blocking classes count; the first blocking entity
/// in world order wins the tie-break.
pub fn probe_direction(player: &Player, entities: &[Entity], dx: f32) -> Option<Contact> {
    let mut probed = player.bounds;
    probed.translate(dx, 0.0);

    entities
        .iter()
        .find(|entity| entity.class().is_blocking() && touches(&probed, player.mask.as_ref(), entity))
        .map(Contact::from_entity)
}

/// Probe both horizontal directions at the configured lookahead delta.
pub fn probe_horizontal(player: &Player, entities: &[Entity], delta: f32) -> HorizontalProbe {
    HorizontalProbe {
        left: probe_direction(player, entities, -delta),
        right: probe_direction(player, entities, delta),
    }
}

/// Resolve vertical collisions at the player's already-moved position.
///
/// Every overlapping entity is collected and returned as a contact (the
/// player can land on a block and graze a flame in the same tick), but only
/// blocking contacts correct the position: falling snaps the player's bottom
/// to the nearest contacted top and lands; rising snaps the top to the
/// nearest contacted bottom and head-bumps. Zero vertical velocity collects
/// contacts without correcting.
pub fn resolve_vertical(player: &mut Player, entities: &[Entity]) -> Vec<Contact> {
    let mut contacts = Vec::new();
    // Nearest blocking surface seen so far: highest top while falling,
    // lowest bottom while rising.
    let mut snap_edge: Option<f32> = None;

    for entity in entities {
        if !touches(&player.bounds, player.mask.as_ref(), entity) {
            continue;
        }
        contacts.push(Contact::from_entity(entity));

        if !entity.class().is_blocking() {
            continue;
        }
        if player.y_vel > 0.0 {
            let top = entity.bounds.top();
            snap_edge = Some(snap_edge.map_or(top, |edge| edge.min(top)));
        } else if player.y_vel < 0.0 {
            let bottom = entity.bounds.bottom();
            snap_edge = Some(snap_edge.map_or(bottom, |edge| edge.max(bottom)));
        }
    }

    if let Some(edge) = snap_edge {
        if player.y_vel > 0.0 {
            player.bounds.snap_bottom_to(edge);
            player.landed();
        } else {
            player.bounds.snap_top_to(edge);
            player.hit_head();
        }
    }

    contacts
}
