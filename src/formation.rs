/// Formation rules: the shared horizontal sweep, the bounce-and-descend at
/// the arena walls, and picking which enemy shoots next.

use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{Enemy, Heading, Projectile};

/// Result of moving the formation one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Sweep {
    pub enemies: Vec<Enemy>,
    pub heading: Heading,
    pub bounced: bool,
}

/// Build the startup grid, row-major, every enemy alive.
pub fn spawn_grid(config: &GameConfig) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity(config.enemy_count());
    for row in 0..config.enemy_rows {
        for col in 0..config.enemy_cols {
            enemies.push(Enemy {
                x: config.formation_origin_x + col as f64 * config.enemy_spacing_x,
                y: config.formation_origin_y + row as f64 * config.enemy_spacing_y,
                width: config.enemy_width,
                height: config.enemy_height,
                alive: true,
            });
        }
    }
    enemies
}

/// Horizontal extent (min left edge, max right edge) of the alive enemies.
pub fn alive_extent(enemies: &[Enemy]) -> Option<(f64, f64)> {
    enemies
        .iter()
        .filter(|e| e.alive)
        .fold(None, |acc, e| match acc {
            None => Some((e.x, e.x + e.width)),
            Some((left, right)) => Some((left.min(e.x), right.max(e.x + e.width))),
        })
}

/// Shift every enemy (dead ones too) along the heading, then bounce if an
/// alive enemy crossed a side wall.
pub fn sweep(enemies: &[Enemy], heading: Heading, config: &GameConfig) -> Sweep {
    let dx = config.enemy_speed * heading.sign();
    let moved: Vec<Enemy> = enemies
        .iter()
        .map(|e| Enemy { x: e.x + dx, ..e.clone() })
        .collect();

    let crossed = match alive_extent(&moved) {
        Some((left, right)) => left < 0.0 || right > config.arena_width,
        None => false,
    };
    if !crossed {
        return Sweep {
            enemies: moved,
            heading,
            bounced: false,
        };
    }

    debug!(?heading, descent = config.enemy_descent, "formation bounced");
    Sweep {
        enemies: moved
            .into_iter()
            .map(|e| Enemy { y: e.y + config.enemy_descent, ..e })
            .collect(),
        heading: heading.reversed(),
        bounced: true,
    }
}

/// Projectile dropped from the middle of an enemy's bottom edge.
pub fn shot_from(enemy: &Enemy, config: &GameConfig) -> Projectile {
    Projectile {
        x: enemy.rect().center_x() - config.projectile_width / 2.0,
        y: enemy.y + enemy.height,
        width: config.projectile_width,
        height: config.projectile_height,
        speed: config.enemy_projectile_speed,
    }
}

/// Returns the new enemy shot when the interval has elapsed and someone is
/// alive to take it.  The caller stamps `now_ms` only when a shot comes back.
pub fn enemy_fire(
    enemies: &[Enemy],
    last_shot_ms: f64,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<Projectile> {
    if now_ms - last_shot_ms <= config.enemy_shot_interval_ms {
        return None;
    }
    let alive: Vec<&Enemy> = enemies.iter().filter(|e| e.alive).collect();
    if alive.is_empty() {
        return None;
    }
    let shooter = alive[rng.gen_range(0..alive.len())];
    debug!(x = shooter.x, y = shooter.y, "enemy fired");
    Some(shot_from(shooter, config))
}
