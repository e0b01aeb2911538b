//! Pure game-logic entry points.
//!
//! Every public function takes an immutable reference to the current
//! [`World`] and returns a brand-new one, so a frame can be replayed or
//! inspected without touching shared state.

use std::sync::Arc;

use tracing::{debug, info};

use crate::combat;
use crate::entities::{Enemy, HeldKeys, Hero, HeroTraits, Hud, Player, Vec2, World, WorldFlags};
use crate::map::{Map, Tile, TILE_SIZE};
use crate::narrative::{self, NarrativeEvent, NarrativeState, ESCAPED_HINT, ESCAPED_OBJECTIVE, PAUSED_HINT};
use crate::physics;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh world for `hero` on `map`.  Used for both the first start
/// and every restart; nothing from a previous run survives.
pub fn start(hero: Option<Hero>, map: Arc<Map>) -> World {
    let traits = HeroTraits::for_selection(hero);
    let player = Player::spawn(map.find_first(Tile::Spawn), traits);
    let enemies: Vec<Enemy> = map
        .enemy_spawns()
        .into_iter()
        .enumerate()
        .map(|(id, (at, role))| Enemy::spawn(id, at, role))
        .collect();

    info!(
        hero = hero.map_or("-", Hero::name),
        enemies = enemies.len(),
        "world reset"
    );

    let narrative = NarrativeState::Start;
    World {
        map,
        hero,
        player,
        enemies,
        bullets: Vec::new(),
        flags: WorldFlags::default(),
        narrative,
        objective: narrative.objective(),
        hint: narrative.hint(),
        story: narrative.story(),
        frame: 0,
    }
}

/// Start over with the same hero and map.
pub fn restart(world: &World) -> World {
    start(world.hero, Arc::clone(&world.map))
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn toggle_pause(world: &World) -> World {
    let paused = !world.flags.paused;
    debug!(paused, "pause toggled");
    World {
        flags: WorldFlags { paused, ..world.flags },
        hint: if paused { PAUSED_HINT } else { resting_hint(world) },
        ..world.clone()
    }
}

/// Fire in the held direction (right unless left is held).  Leaves the
/// world unchanged when out of ammo or paused.
pub fn shoot(world: &World, keys: HeldKeys) -> World {
    let mut next = world.clone();
    combat::shoot(&mut next.player, &mut next.bullets, keys, world.flags.paused);
    next
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.  A paused world comes back
/// unchanged; the caller still renders it.
pub fn tick(world: &World, keys: HeldKeys) -> World {
    if world.flags.paused {
        return world.clone();
    }
    let mut next = world.clone();
    next.frame += 1;

    // ── 1. Input & physics ───────────────────────────────────────────────────
    physics::apply_input(&mut next.player, keys);
    physics::resolve_collisions(&mut next.player, &next.map);

    // ── 2. Enemy contact ─────────────────────────────────────────────────────
    combat::apply_contact_damage(&mut next.player, &next.enemies);

    // ── 3. Bullets ───────────────────────────────────────────────────────────
    let canvas_width = next.map.pixel_width();
    let killed = combat::advance_bullets(&mut next.bullets, &mut next.enemies, canvas_width);
    let boss_fell = killed
        .iter()
        .any(|&id| next.enemies.iter().any(|e| e.id == id && e.is_boss()));
    if boss_fell {
        next.flags.boss_defeated = true;
        apply_event(&mut next, NarrativeEvent::BossDefeated);
    }

    // ── 4. Relic ─────────────────────────────────────────────────────────────
    if !next.flags.relic_collected && touches(&next.player, next.map.find_first(Tile::Relic)) {
        next.flags.relic_collected = true;
        next.flags.door_unlocked = true;
        next.player.ammo += combat::RELIC_AMMO_BONUS;
        apply_event(&mut next, NarrativeEvent::RelicCollected);
    }

    // ── 5. Door ──────────────────────────────────────────────────────────────
    if next.flags.door_unlocked
        && !next.flags.door_reached
        && touches(&next.player, next.map.find_first(Tile::Door))
    {
        next.flags.door_reached = true;
        apply_event(&mut next, NarrativeEvent::DoorReached);
    }

    next
}

// ── Read-out ─────────────────────────────────────────────────────────────────

pub fn hud(world: &World) -> Hud {
    Hud {
        health: world.player.health,
        max_health: world.player.max_health,
        ammo: world.player.ammo,
        hero_name: world.hero.map_or("-", Hero::name),
        objective: world.objective,
        hint: world.hint,
        story: world.story,
        narrative: world.narrative,
        paused: world.flags.paused,
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Player within one tile of `at` on both axes.
fn touches(player: &Player, at: Vec2) -> bool {
    (player.x - at.x).abs() < TILE_SIZE && (player.y - at.y).abs() < TILE_SIZE
}

fn apply_event(world: &mut World, event: NarrativeEvent) {
    let Some(step) = narrative::transition(world.narrative, event) else {
        return;
    };
    info!(from = ?world.narrative, to = ?step.next, ?event, "narrative transition");

    world.narrative = step.next;
    world.story = step.story;
    world.objective = step.objective;
    world.hint = step.hint;

    // A dead warden keeps the ending text even if the door is reached later.
    if world.flags.boss_defeated {
        world.objective = ESCAPED_OBJECTIVE;
        world.hint = ESCAPED_HINT;
    }
}

/// Hint to show when nothing transient (like pausing) overrides it.
fn resting_hint(world: &World) -> &'static str {
    if world.flags.boss_defeated {
        ESCAPED_HINT
    } else {
        world.narrative.hint()
    }
}
