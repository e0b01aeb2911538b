//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world.  No game logic is performed; this module only translates the
//! composed frame and HUD into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use crate::compute::hud;
use crate::entities::{Hud, World};
use crate::map::TILE_SIZE;
use crate::render::{compose, Sprite, SpriteKind};

// ── Layout ────────────────────────────────────────────────────────────────────

/// Terminal columns per tile; keeps tiles roughly square.
const CELL_WIDTH: u16 = 2;
const MAP_LEFT: u16 = 1;
const MAP_TOP: u16 = 2;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_WALL: Color = Color::DarkBlue;
const C_PLATFORM: Color = Color::DarkGrey;
const C_RELIC: Color = Color::Magenta;
const C_DOOR: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_BULLET: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_HUD_HERO: Color = Color::Cyan;
const C_HUD_HEALTH: Color = Color::Red;
const C_HUD_AMMO: Color = Color::Yellow;
const C_OBJECTIVE: Color = Color::White;
const C_STORY: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let hud = hud(world);
    let columns = world.map.columns() as u16;
    let rows = world.map.rows() as u16;

    draw_hud(out, &hud, columns)?;
    for sprite in compose(world) {
        draw_sprite(out, &sprite, columns, rows)?;
    }
    draw_texts(out, &hud, rows)?;

    if hud.paused {
        draw_banner(out, "P A U S E D", Color::Yellow, columns, rows)?;
    } else if world.flags.boss_defeated {
        draw_banner(out, "ESCAPE COMPLETE", Color::Green, columns, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, MAP_TOP + rows + 4))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, columns: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(MAP_LEFT, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HERO))?;
    out.queue(Print(format!("Hero: {}", hud.hero_name)))?;

    let objective = format!("» {}", hud.objective);
    let map_width = columns * CELL_WIDTH;
    let ox = MAP_LEFT + (map_width / 2).saturating_sub(objective.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(ox, 0))?;
    out.queue(style::SetForegroundColor(C_OBJECTIVE))?;
    out.queue(Print(&objective))?;

    // Hearts and ammo, right-aligned against the map edge
    let hearts = format!(
        "{}{}",
        "♥".repeat(hud.health as usize),
        "·".repeat(hud.max_health.saturating_sub(hud.health) as usize)
    );
    let ammo = format!("  Blaster: {}", hud.ammo);
    let right_len = (hearts.chars().count() + ammo.chars().count()) as u16;
    out.queue(cursor::MoveTo(MAP_LEFT + map_width.saturating_sub(right_len), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_HEALTH))?;
    out.queue(Print(&hearts))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(&ammo))?;

    Ok(())
}

// ── Sprites ───────────────────────────────────────────────────────────────────

fn glyph(kind: SpriteKind) -> (&'static str, Color) {
    match kind {
        SpriteKind::Wall => ("██", C_WALL),
        SpriteKind::Platform => ("▓▓", C_PLATFORM),
        SpriteKind::Relic => ("<>", C_RELIC),
        SpriteKind::Door => ("[]", C_DOOR),
        SpriteKind::Enemy => ("}{", C_ENEMY),
        SpriteKind::Boss => ("ΩΩ", C_BOSS),
        SpriteKind::Bullet => ("--", C_BULLET),
        SpriteKind::Player => ("@@", C_PLAYER),
    }
}

/// Terminal cell for a sprite, snapping its centre to the tile grid.
/// `None` when the sprite sits outside the map area.
fn sprite_cell(sprite: &Sprite, columns: u16, rows: u16) -> Option<(u16, u16)> {
    let col = ((sprite.x + TILE_SIZE / 2.0) / TILE_SIZE).floor();
    let row = ((sprite.y + TILE_SIZE / 2.0) / TILE_SIZE).floor();
    if col < 0.0 || row < 0.0 || col >= columns as f32 || row >= rows as f32 {
        return None;
    }
    Some((MAP_LEFT + col as u16 * CELL_WIDTH, MAP_TOP + row as u16))
}

fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    columns: u16,
    rows: u16,
) -> std::io::Result<()> {
    let Some((x, y)) = sprite_cell(sprite, columns, rows) else {
        return Ok(());
    };
    let (text, color) = glyph(sprite.kind);
    out.queue(cursor::MoveTo(x, y))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Story, hint and controls (below the map) ──────────────────────────────────

fn draw_texts<W: Write>(out: &mut W, hud: &Hud, rows: u16) -> std::io::Result<()> {
    let below = MAP_TOP + rows + 1;

    out.queue(cursor::MoveTo(MAP_LEFT, below))?;
    out.queue(style::SetForegroundColor(C_STORY))?;
    out.queue(Print(hud.story))?;

    out.queue(cursor::MoveTo(MAP_LEFT, below + 1))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(hud.hint))?;

    out.queue(cursor::MoveTo(MAP_LEFT, below + 3))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Move   ↑ W SPACE : Jump   J : Shoot   P : Pause   R : Restart   Esc : Heroes   Q : Quit",
    ))?;
    Ok(())
}

// ── Overlay ───────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    label: &str,
    color: Color,
    columns: u16,
    rows: u16,
) -> std::io::Result<()> {
    let inner = label.chars().count() + 4;
    let lines = [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║  {}  ║", label),
        format!("╚{}╝", "═".repeat(inner)),
    ];

    let cx = MAP_LEFT + columns * CELL_WIDTH / 2;
    let start_row = MAP_TOP + (rows / 2).saturating_sub(lines.len() as u16 / 2);

    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sprite(x: f32, y: f32) -> Sprite {
        Sprite { kind: SpriteKind::Player, x, y }
    }

    #[test]
    fn sprite_cell_uses_two_columns_per_tile() {
        assert_eq!(sprite_cell(&sprite(0.0, 0.0), 29, 10), Some((MAP_LEFT, MAP_TOP)));
        assert_eq!(
            sprite_cell(&sprite(3.0 * TILE_SIZE, 2.0 * TILE_SIZE), 29, 10),
            Some((MAP_LEFT + 6, MAP_TOP + 2))
        );
    }

    #[test]
    fn sprite_cell_rounds_to_nearest_tile() {
        assert_eq!(sprite_cell(&sprite(13.0, 0.0), 29, 10), Some((MAP_LEFT + 2, MAP_TOP)));
        assert_eq!(sprite_cell(&sprite(11.0, 0.0), 29, 10), Some((MAP_LEFT, MAP_TOP)));
    }

    #[test]
    fn sprite_cell_skips_off_map_sprites() {
        assert_eq!(sprite_cell(&sprite(-20.0, 0.0), 29, 10), None);
        assert_eq!(sprite_cell(&sprite(29.0 * TILE_SIZE, 0.0), 29, 10), None);
    }

    #[test]
    fn render_writes_hud_values() {
        let world = crate::compute::start(
            Some(crate::entities::Hero::Wraith),
            std::sync::Arc::new(crate::map::Map::standard()),
        );
        let mut out = Vec::new();
        render(&mut out, &world).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("Hero: Wraith"));
        assert!(text.contains("Blaster: 7"));
        assert!(text.contains("♥♥♥"));
    }
}
