/// Collision resolution between projectiles and their targets.
///
/// Resolution runs in two passes.  The first pass only reads the frame's
/// entities and records which projectile struck what; the second pass
/// builds the new collections from that record.  Nothing is removed while
/// a collection is being scanned, so indices never shift under the loop.

use tracing::debug;

use crate::entities::{Enemy, Player, Projectile};
use crate::geometry::intersects;

/// A player projectile that struck an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub projectile: usize,
    pub enemy: usize,
}

/// Everything collision resolution changed this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub enemies: Vec<Enemy>,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    pub kills: u32,
    pub player_hit: bool,
}

/// Pair each player projectile with at most one enemy: the first alive enemy
/// in record order that it overlaps and that no earlier projectile claimed.
pub fn find_enemy_hits(projectiles: &[Projectile], enemies: &[Enemy]) -> Vec<Hit> {
    let mut hits: Vec<Hit> = Vec::new();
    for (pi, projectile) in projectiles.iter().enumerate() {
        let rect = projectile.rect();
        let target = enemies.iter().enumerate().find(|(ei, enemy)| {
            enemy.alive
                && !hits.iter().any(|h| h.enemy == *ei)
                && intersects(&rect, &enemy.rect())
        });
        if let Some((ei, _)) = target {
            hits.push(Hit {
                projectile: pi,
                enemy: ei,
            });
        }
    }
    hits
}

/// Indices of enemy projectiles overlapping the player.
pub fn find_player_hits(projectiles: &[Projectile], player: &Player) -> Vec<usize> {
    let target = player.rect();
    projectiles
        .iter()
        .enumerate()
        .filter(|(_, p)| intersects(&p.rect(), &target))
        .map(|(i, _)| i)
        .collect()
}

/// Resolve both factions' projectiles against their targets.
pub fn resolve(
    player_projectiles: &[Projectile],
    enemy_projectiles: &[Projectile],
    enemies: &[Enemy],
    player: &Player,
) -> Resolution {
    // ── Pass 1: record hits ──────────────────────────────────────────────────
    let enemy_hits = find_enemy_hits(player_projectiles, enemies);
    let player_hits = find_player_hits(enemy_projectiles, player);

    // ── Pass 2: apply them ───────────────────────────────────────────────────
    let enemies: Vec<Enemy> = enemies
        .iter()
        .enumerate()
        .map(|(i, e)| {
            if enemy_hits.iter().any(|h| h.enemy == i) {
                debug!(enemy = i, x = e.x, y = e.y, "enemy destroyed");
                Enemy {
                    alive: false,
                    ..e.clone()
                }
            } else {
                e.clone()
            }
        })
        .collect();

    let player_projectiles: Vec<Projectile> = player_projectiles
        .iter()
        .enumerate()
        .filter(|(i, _)| !enemy_hits.iter().any(|h| h.projectile == *i))
        .map(|(_, p)| p.clone())
        .collect();

    let enemy_projectiles: Vec<Projectile> = enemy_projectiles
        .iter()
        .enumerate()
        .filter(|(i, _)| !player_hits.contains(i))
        .map(|(_, p)| p.clone())
        .collect();

    Resolution {
        enemies,
        player_projectiles,
        enemy_projectiles,
        kills: enemy_hits.len() as u32,
        player_hit: !player_hits.is_empty(),
    }
}
