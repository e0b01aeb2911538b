//! Frame composition.
//!
//! Turns a [`World`] into the ordered list of things to draw.  Backends paint
//! the list front to back, so later sprites land on top of earlier ones.

use crate::entities::World;
use crate::map::{Tile, TILE_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Wall,
    Platform,
    Relic,
    Door,
    Enemy,
    Boss,
    Bullet,
    Player,
}

/// One drawable, with its top-left corner in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub x: f32,
    pub y: f32,
}

/// Full frame: static tiles, then the relic (until collected) and door,
/// living enemies, bullets, and the player last.
pub fn compose(world: &World) -> Vec<Sprite> {
    let mut sprites = Vec::with_capacity(world.map.columns() * world.map.rows() / 2);

    for (row, col, tile) in world.map.cells() {
        let kind = match tile {
            Tile::Wall => SpriteKind::Wall,
            Tile::Platform => SpriteKind::Platform,
            Tile::Relic if !world.flags.relic_collected => SpriteKind::Relic,
            Tile::Door => SpriteKind::Door,
            _ => continue,
        };
        sprites.push(Sprite {
            kind,
            x: col as f32 * TILE_SIZE,
            y: row as f32 * TILE_SIZE,
        });
    }

    for enemy in world.enemies.iter().filter(|e| e.alive) {
        sprites.push(Sprite {
            kind: if enemy.is_boss() { SpriteKind::Boss } else { SpriteKind::Enemy },
            x: enemy.x,
            y: enemy.y,
        });
    }

    // Bullets are stored by their centre point.
    for bullet in &world.bullets {
        sprites.push(Sprite {
            kind: SpriteKind::Bullet,
            x: bullet.x - TILE_SIZE / 2.0,
            y: bullet.y - TILE_SIZE / 2.0,
        });
    }

    sprites.push(Sprite {
        kind: SpriteKind::Player,
        x: world.player.x,
        y: world.player.y,
    });

    sprites
}
