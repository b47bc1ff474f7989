/// All game entity types — pure data, no rules.

use crate::config::GameConfig;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Active,
    Lost,
    Won,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Active)
    }
}

/// Horizontal heading shared by the whole formation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(&self) -> f64 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }

    pub fn reversed(&self) -> Heading {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// One frame's worth of player intent, sampled by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub speed: f64,
    /// Clock reading of the last accepted shot; `None` until the first one.
    pub last_shot_ms: Option<f64>,
    pub cooldown_ms: f64,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Dead enemies stay in the formation as inert records.
    pub alive: bool,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Added to `y` every frame; negative travels up.
    pub speed: f64,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation.  Cloneable so the step function can hand back a
/// new copy without touching the original, and so tests can run any number
/// of independent games side by side.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    /// Every enemy of the startup grid, row-major.  Never shrinks.
    pub enemies: Vec<Enemy>,
    pub heading: Heading,
    pub player_projectiles: Vec<Projectile>,
    pub enemy_projectiles: Vec<Projectile>,
    /// Clock reading of the last enemy shot (starts at the clock origin).
    pub last_enemy_shot_ms: f64,
    pub score: u32,
    pub phase: GamePhase,
    /// Number of active frames simulated since the last reset.
    pub frame: u64,
}

impl GameState {
    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }

    pub fn alive_count(&self) -> usize {
        self.alive_enemies().count()
    }
}
