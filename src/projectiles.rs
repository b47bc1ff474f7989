/// Projectile lifecycle: the player's shot, per-frame travel and off-screen culling.

use tracing::debug;

use crate::config::GameConfig;
use crate::entities::{InputIntent, Player, Projectile};

/// True once the cooldown has strictly elapsed since the last shot, or the
/// player has not fired since the last reset.
pub fn cooldown_ready(player: &Player, now_ms: f64) -> bool {
    match player.last_shot_ms {
        None => true,
        Some(last) => now_ms - last > player.cooldown_ms,
    }
}

/// Projectile leaving the middle of the player's top edge.
pub fn shot_from(player: &Player, config: &GameConfig) -> Projectile {
    Projectile {
        x: player.rect().center_x() - config.projectile_width / 2.0,
        y: player.y - config.projectile_height,
        width: config.projectile_width,
        height: config.projectile_height,
        speed: -config.player_projectile_speed,
    }
}

/// Handle the fire intent.  Returns the player (re-stamped if it fired) and
/// the new projectile, if any.
pub fn player_fire(
    player: &Player,
    intent: &InputIntent,
    now_ms: f64,
    config: &GameConfig,
) -> (Player, Option<Projectile>) {
    if !intent.fire || !cooldown_ready(player, now_ms) {
        return (player.clone(), None);
    }
    debug!(x = player.x, now_ms, "player fired");
    let shot = shot_from(player, config);
    let player = Player {
        last_shot_ms: Some(now_ms),
        ..player.clone()
    };
    (player, Some(shot))
}

/// Move every projectile by its signed speed.
pub fn advance(projectiles: &[Projectile]) -> Vec<Projectile> {
    projectiles
        .iter()
        .map(|p| Projectile {
            y: p.y + p.speed,
            ..p.clone()
        })
        .collect()
}

/// Keep only player shots whose bottom edge is still below the arena top.
pub fn cull_player_projectiles(projectiles: Vec<Projectile>) -> Vec<Projectile> {
    projectiles.into_iter().filter(|p| p.y > -p.height).collect()
}

/// Keep only enemy shots whose top edge is still above the arena floor.
pub fn cull_enemy_projectiles(projectiles: Vec<Projectile>, arena_height: f64) -> Vec<Projectile> {
    projectiles
        .into_iter()
        .filter(|p| p.y < arena_height)
        .collect()
}
