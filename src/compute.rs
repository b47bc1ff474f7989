/// Game-state machine and the per-frame step.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and tracing.

use rand::Rng;
use tracing::{info, warn};

use crate::collision;
use crate::config::GameConfig;
use crate::entities::{Enemy, GamePhase, GameState, Heading, InputIntent, Player};
use crate::formation;
use crate::projectiles;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the startup layout for `config`.
///
/// `config` is expected to have passed [`GameConfig::validate`]; an oversized
/// formation is not rejected here.
pub fn init_state(config: GameConfig) -> GameState {
    let player = Player {
        x: config.player_start_x(),
        y: config.player_start_y(),
        width: config.player_width,
        height: config.player_height,
        speed: config.player_speed,
        last_shot_ms: None,
        cooldown_ms: config.player_cooldown_ms,
    };
    let enemies = formation::spawn_grid(&config);
    GameState {
        config,
        player,
        enemies,
        heading: Heading::Right,
        player_projectiles: Vec::new(),
        enemy_projectiles: Vec::new(),
        last_enemy_shot_ms: 0.0,
        score: 0,
        phase: GamePhase::Active,
        frame: 0,
    }
}

/// Throw the current game away and start over with the same config.
///
/// Valid in any phase: a reset requested mid-game restarts immediately.
pub fn reset(state: &GameState) -> GameState {
    info!(
        phase = ?state.phase,
        score = state.score,
        frames = state.frame,
        "game reset"
    );
    init_state(state.config.clone())
}

// ── Player movement ──────────────────────────────────────────────────────────

/// Apply the horizontal intent and clamp into the arena.
///
/// Holding both directions cancels out: the player stays where it is.
pub fn move_player(player: &Player, intent: &InputIntent, arena_width: f64) -> Player {
    let mut dx = 0.0;
    if intent.move_left {
        dx -= player.speed;
    }
    if intent.move_right {
        dx += player.speed;
    }
    let max_x = (arena_width - player.width).max(0.0);
    Player {
        x: (player.x + dx).clamp(0.0, max_x),
        ..player.clone()
    }
}

// ── Terminal conditions ──────────────────────────────────────────────────────

/// True when an alive enemy's bottom edge has crossed the invasion line.
pub fn formation_landed(enemies: &[Enemy], config: &GameConfig) -> bool {
    let line = config.invasion_line();
    enemies.iter().any(|e| e.alive && e.y + e.height > line)
}

/// Decide the phase at the end of an active frame.
///
/// Loss is checked before the win: a frame that clears the last enemy while
/// an enemy shot lands on the player ends lost, not won.
pub fn evaluate_phase(player_hit: bool, enemies: &[Enemy], config: &GameConfig) -> GamePhase {
    if player_hit || formation_landed(enemies, config) {
        return GamePhase::Lost;
    }
    if enemies.iter().all(|e| !e.alive) {
        return GamePhase::Won;
    }
    GamePhase::Active
}

// ── Per-frame step ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame at clock reading `now_ms`.
///
/// Returns an unchanged copy while the phase is terminal.  All randomness
/// comes through `rng` so callers control determinism.
pub fn step(
    state: &GameState,
    intent: &InputIntent,
    now_ms: f64,
    rng: &mut impl Rng,
) -> GameState {
    if state.phase.is_terminal() {
        return state.clone();
    }
    debug_assert!(now_ms.is_finite(), "clock reading must be finite, got {now_ms}");
    if !now_ms.is_finite() {
        warn!(now_ms, "ignoring frame with a non-finite clock reading");
        return state.clone();
    }
    let config = &state.config;

    // ── 1. Player movement ───────────────────────────────────────────────────
    let player = move_player(&state.player, intent, config.arena_width);

    // ── 2. Player firing ─────────────────────────────────────────────────────
    let (player, shot) = projectiles::player_fire(&player, intent, now_ms, config);
    let mut player_projectiles = state.player_projectiles.clone();
    player_projectiles.extend(shot);

    // ── 3. Projectile travel ─────────────────────────────────────────────────
    let player_projectiles = projectiles::advance(&player_projectiles);
    let mut enemy_projectiles = projectiles::advance(&state.enemy_projectiles);

    // ── 4. Formation sweep, bounce and firing ────────────────────────────────
    let sweep = formation::sweep(&state.enemies, state.heading, config);
    let mut last_enemy_shot_ms = state.last_enemy_shot_ms;
    if let Some(shot) =
        formation::enemy_fire(&sweep.enemies, last_enemy_shot_ms, now_ms, config, rng)
    {
        enemy_projectiles.push(shot);
        last_enemy_shot_ms = now_ms;
    }

    // ── 5. Collisions ────────────────────────────────────────────────────────
    let resolution = collision::resolve(
        &player_projectiles,
        &enemy_projectiles,
        &sweep.enemies,
        &player,
    );

    // ── 6. Culling ───────────────────────────────────────────────────────────
    let player_projectiles = projectiles::cull_player_projectiles(resolution.player_projectiles);
    let enemy_projectiles =
        projectiles::cull_enemy_projectiles(resolution.enemy_projectiles, config.arena_height);

    // ── 7. Lose, then win ────────────────────────────────────────────────────
    let score = state
        .score
        .saturating_add(resolution.kills.saturating_mul(config.score_per_kill));
    let phase = evaluate_phase(resolution.player_hit, &resolution.enemies, config);
    if phase != state.phase {
        info!(?phase, score, frame = state.frame + 1, "game phase changed");
    }

    GameState {
        player,
        enemies: resolution.enemies,
        heading: sweep.heading,
        player_projectiles,
        enemy_projectiles,
        last_enemy_shot_ms,
        score,
        phase,
        frame: state.frame + 1,
        ..state.clone()
    }
}
