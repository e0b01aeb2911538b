//! All game entity types: pure data, no logic.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::map::{Map, TILE_SIZE};
use crate::narrative::NarrativeState;

/// Position in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

// ── Heroes ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hero {
    Wraith,
    RuneKnight,
    Ironbound,
}

/// Per-hero constants applied on every reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroTraits {
    /// Horizontal speed in pixels per frame while a direction is held.
    pub speed: f32,
    pub ammo: u32,
    pub health: u32,
}

impl Hero {
    pub const ALL: [Hero; 3] = [Hero::Wraith, Hero::RuneKnight, Hero::Ironbound];

    pub fn name(self) -> &'static str {
        match self {
            Hero::Wraith => "Wraith",
            Hero::RuneKnight => "Rune Knight",
            Hero::Ironbound => "Ironbound",
        }
    }

    pub fn traits(self) -> HeroTraits {
        match self {
            Hero::Wraith => HeroTraits { speed: 3.8, ammo: 7, health: 3 },
            Hero::RuneKnight => HeroTraits { speed: 3.4, ammo: 6, health: 4 },
            Hero::Ironbound => HeroTraits { speed: 3.0, ammo: 5, health: 5 },
        }
    }
}

impl HeroTraits {
    /// Traits for the selected hero; no selection plays as the Rune Knight.
    pub fn for_selection(hero: Option<Hero>) -> HeroTraits {
        hero.unwrap_or(Hero::RuneKnight).traits()
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown hero {0:?} (expected Wraith, Rune Knight or Ironbound)")]
pub struct ParseHeroError(pub String);

impl FromStr for Hero {
    type Err = ParseHeroError;

    /// Case-insensitive; spaces, dashes and underscores are ignored so
    /// `rune-knight` and `Rune Knight` both match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|&c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "wraith" => Ok(Hero::Wraith),
            "runeknight" => Ok(Hero::RuneKnight),
            "ironbound" => Ok(Hero::Ironbound),
            _ => Err(ParseHeroError(s.to_string())),
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Direction keys currently held down, as reported by the input layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

// ── Player & enemies ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub width: f32,
    pub height: f32,
    pub on_ground: bool,
    pub ammo: u32,
    /// Never below 1; contact damage clamps instead of killing.
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
}

impl Player {
    pub fn spawn(at: Vec2, traits: HeroTraits) -> Player {
        Player {
            x: at.x,
            y: at.y,
            vx: 0.0,
            vy: 0.0,
            width: TILE_SIZE,
            height: TILE_SIZE,
            on_ground: false,
            ammo: traits.ammo,
            health: traits.health,
            max_health: traits.health,
            speed: traits.speed,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyRole {
    Grunt,
    /// The warden.  Exactly one per level; its death ends the story.
    Boss,
}

impl EnemyRole {
    pub fn initial_health(self) -> i32 {
        match self {
            EnemyRole::Grunt => 1,
            EnemyRole::Boss => 3,
        }
    }
}

/// Enemies never move; they only hurt on contact.
#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    pub health: i32,
    pub role: EnemyRole,
}

impl Enemy {
    pub fn spawn(id: usize, at: Vec2, role: EnemyRole) -> Enemy {
        Enemy {
            id,
            x: at.x,
            y: at.y,
            alive: true,
            health: role.initial_health(),
            role,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.role == EnemyRole::Boss
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Player shot.  Travels horizontally only.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldFlags {
    pub relic_collected: bool,
    pub door_unlocked: bool,
    pub door_reached: bool,
    pub boss_defeated: bool,
    pub paused: bool,
}

/// The entire game state.  Cloneable so the update functions can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct World {
    pub map: Arc<Map>,
    pub hero: Option<Hero>,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub flags: WorldFlags,
    pub narrative: NarrativeState,
    pub objective: &'static str,
    pub hint: &'static str,
    pub story: &'static str,
    pub frame: u64,
}

/// Read-only values the HUD shows after each step.
#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub hero_name: &'static str,
    pub objective: &'static str,
    pub hint: &'static str,
    pub story: &'static str,
    pub narrative: NarrativeState,
    pub paused: bool,
}
