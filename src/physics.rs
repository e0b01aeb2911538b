//! Player movement: held-key input, gravity and axis-aligned tile collision.

use crate::entities::{HeldKeys, Player};
use crate::map::{Map, TILE_SIZE};

pub const GRAVITY: f32 = 0.6;
pub const JUMP_IMPULSE: f32 = -10.5;
pub const MAX_FALL_SPEED: f32 = 12.0;
/// Horizontal velocity multiplier applied each frame no direction is held.
pub const RELEASE_DECAY: f32 = 0.7;

/// Turn held keys into velocity.  Left wins when both directions are held.
pub fn apply_input(player: &mut Player, keys: HeldKeys) {
    if keys.left {
        player.vx = -player.speed;
    } else if keys.right {
        player.vx = player.speed;
    } else {
        player.vx *= RELEASE_DECAY;
    }

    if keys.jump && player.on_ground {
        player.vy = JUMP_IMPULSE;
        player.on_ground = false;
    }
}

/// Move the player one frame, horizontal axis first.
///
/// A blocked horizontal move cancels the move outright (no sliding along the
/// wall).  A blocked fall grounds the player and snaps `y` down to a tile
/// boundary; a blocked rise only kills the upward velocity.
pub fn resolve_collisions(player: &mut Player, map: &Map) {
    player.on_ground = false;

    let next_x = player.x + player.vx;
    if collides(map, next_x, player.y, player.width, player.height) {
        player.vx = 0.0;
    } else {
        player.x = next_x;
    }

    player.vy = (player.vy + GRAVITY).min(MAX_FALL_SPEED);

    let next_y = player.y + player.vy;
    if !collides(map, player.x, next_y, player.width, player.height) {
        player.y = next_y;
    } else if player.vy > 0.0 {
        player.on_ground = true;
        player.vy = 0.0;
        // Snaps to the top of the cell holding `y`, which lifts the player a
        // whole tile if the fall started deep inside one.
        player.y = (player.y / TILE_SIZE).floor() * TILE_SIZE;
    } else {
        player.vy = 0.0;
    }
}

/// Whether a `width`×`height` box with its top-left at (`x`, `y`) overlaps any
/// solid tile.
pub fn collides(map: &Map, x: f32, y: f32, width: f32, height: f32) -> bool {
    let left = cell(x);
    let right = cell(x + width - 1.0);
    let top = cell(y);
    let bottom = cell(y + height - 1.0);

    (top..=bottom).any(|row| (left..=right).any(|col| map.is_solid(row, col)))
}

fn cell(px: f32) -> i32 {
    (px / TILE_SIZE).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_floors_negative_coordinates() {
        assert_eq!(cell(-0.5), -1);
        assert_eq!(cell(0.0), 0);
        assert_eq!(cell(23.9), 0);
        assert_eq!(cell(24.0), 1);
    }
}
