//! Shots, bullet flight and enemy contact.
//!
//! Functions here mutate the pieces of a world in place and report enemy
//! deaths back to the caller; story updates happen in `compute`.

use tracing::{debug, trace};

use crate::entities::{Bullet, Enemy, HeldKeys, Player};
use crate::map::TILE_SIZE;

pub const BULLET_SPEED: f32 = 6.0;
/// Enemies hurt the player when both axis distances are under this many pixels.
pub const CONTACT_RADIUS: f32 = 10.0;
/// Horizontal push applied to the player on every contact hit (always leftward).
pub const KNOCKBACK: f32 = 20.0;
pub const RELIC_AMMO_BONUS: u32 = 4;

/// Fire one bullet from the player's centre.  No-op when out of ammo or
/// paused.
pub fn shoot(player: &mut Player, bullets: &mut Vec<Bullet>, keys: HeldKeys, paused: bool) {
    if player.ammo == 0 || paused {
        return;
    }
    let direction = if keys.left { -1.0 } else { 1.0 };
    let origin = player.center();
    bullets.push(Bullet {
        x: origin.x,
        y: origin.y,
        vx: direction * BULLET_SPEED,
    });
    player.ammo -= 1;
    trace!(ammo = player.ammo, direction, "shot fired");
}

/// Every living enemy touching the player costs one health (floored at 1)
/// and knocks the player back.  Enemies are checked in id order against the
/// already knocked-back position.  There is no invulnerability window, so an
/// enemy that stays in reach hits again next frame.
pub fn apply_contact_damage(player: &mut Player, enemies: &[Enemy]) {
    for enemy in enemies.iter().filter(|e| e.alive) {
        if (player.x - enemy.x).abs() < CONTACT_RADIUS
            && (player.y - enemy.y).abs() < CONTACT_RADIUS
        {
            player.health = player.health.saturating_sub(1).max(1);
            player.x -= KNOCKBACK;
            debug!(enemy = enemy.id, health = player.health, "contact hit, no invulnerability window");
        }
    }
}

/// Advance every bullet one frame.  Bullets leaving `[0, canvas_width)` or
/// hitting a living enemy are dropped; each bullet damages at most the first
/// enemy it overlaps.  Returns the ids of enemies killed this frame.
pub fn advance_bullets(bullets: &mut Vec<Bullet>, enemies: &mut [Enemy], canvas_width: f32) -> Vec<usize> {
    let mut killed = Vec::new();

    bullets.retain_mut(|bullet| {
        bullet.x += bullet.vx;
        if bullet.x < 0.0 || bullet.x >= canvas_width {
            return false;
        }

        let hit = enemies.iter_mut().find(|enemy| {
            enemy.alive
                && (enemy.x - bullet.x).abs() < TILE_SIZE / 2.0
                && (enemy.y - bullet.y).abs() < TILE_SIZE / 2.0
        });
        let Some(enemy) = hit else {
            return true;
        };

        enemy.health -= 1;
        debug!(enemy = enemy.id, health = enemy.health, "enemy hit");
        if enemy.health <= 0 {
            enemy.alive = false;
            killed.push(enemy.id);
            debug!(enemy = enemy.id, boss = enemy.is_boss(), "enemy destroyed");
        }
        false
    });

    killed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EnemyRole, Hero, Vec2};

    fn grunt(id: usize, x: f32, y: f32) -> Enemy {
        Enemy::spawn(id, Vec2 { x, y }, EnemyRole::Grunt)
    }

    fn player_at(x: f32, y: f32) -> Player {
        Player::spawn(Vec2 { x, y }, Hero::Wraith.traits())
    }

    #[test]
    fn bullet_damages_only_the_first_overlapping_enemy() {
        let mut enemies = vec![grunt(0, 100.0, 50.0), grunt(1, 102.0, 50.0)];
        let mut bullets = vec![Bullet { x: 95.0, y: 50.0, vx: BULLET_SPEED }];

        let killed = advance_bullets(&mut bullets, &mut enemies, 696.0);

        assert_eq!(killed, vec![0]);
        assert!(!enemies[0].alive);
        assert!(enemies[1].alive);
        assert_eq!(enemies[1].health, 1);
        assert!(bullets.is_empty());
    }

    #[test]
    fn overlapping_enemies_take_one_bullet_each() {
        let mut enemies = vec![grunt(0, 100.0, 50.0), grunt(1, 102.0, 50.0)];
        let mut bullets = vec![
            Bullet { x: 95.0, y: 50.0, vx: BULLET_SPEED },
            Bullet { x: 95.0, y: 50.0, vx: BULLET_SPEED },
        ];

        let killed = advance_bullets(&mut bullets, &mut enemies, 696.0);

        assert_eq!(killed, vec![0, 1]);
        assert!(bullets.is_empty());
    }

    #[test]
    fn stacked_enemies_hit_once_because_knockback_clears_the_second() {
        let mut player = player_at(100.0, 50.0);
        let enemies = [grunt(0, 100.0, 50.0), grunt(1, 102.0, 50.0)];

        apply_contact_damage(&mut player, &enemies);

        assert_eq!(player.health, 2);
        assert_eq!(player.x, 80.0);
    }

    #[test]
    fn each_enemy_in_reach_after_knockback_hits_in_the_same_step() {
        let mut player = player_at(100.0, 50.0);
        let enemies = [grunt(0, 100.0, 50.0), grunt(1, 82.0, 50.0)];

        apply_contact_damage(&mut player, &enemies);

        assert_eq!(player.health, 1);
        assert_eq!(player.x, 60.0);
    }

    #[test]
    fn chained_contact_still_floors_health_at_one() {
        let mut player = player_at(100.0, 50.0);
        player.health = 1;
        let enemies = [grunt(0, 100.0, 50.0), grunt(1, 82.0, 50.0)];

        apply_contact_damage(&mut player, &enemies);

        assert_eq!(player.health, 1);
        assert_eq!(player.x, 60.0);
    }
}
