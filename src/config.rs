/// Every tuning constant of the simulation, gathered into one validated value.
///
/// `GameConfig::default()` reproduces the classic 800×600 layout: a 5×10
/// formation, a 500 ms player cooldown and one enemy shot per second.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("{name} must be a finite number >= 0, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("the formation needs at least one row and one column")]
    EmptyFormation,
    #[error("player width {player} does not fit in an arena {arena} wide")]
    PlayerTooWide { player: f64, arena: f64 },
    #[error("player top edge {top} lies outside the arena (0 to {arena})")]
    PlayerOutOfBounds { top: f64, arena: f64 },
    #[error("a {rows} x {cols} formation is too large")]
    FormationTooLarge { rows: usize, cols: usize },
    #[error("{enemies} kills at {per_kill} points each overflow the score")]
    ScoreOverflow { enemies: usize, per_kill: u32 },
    #[error("formation footprint ({right} x {bottom}) does not fit in the {width} x {height} arena")]
    FormationOutOfBounds {
        right: f64,
        bottom: f64,
        width: f64,
        height: f64,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────────
    pub arena_width: f64,
    pub arena_height: f64,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f64,
    pub player_height: f64,
    /// Horizontal distance covered per frame while a direction is held.
    pub player_speed: f64,
    /// Gap between the player's bottom edge and the arena's bottom edge.
    pub player_bottom_gap: f64,
    /// Milliseconds that must pass between two player shots.
    pub player_cooldown_ms: f64,

    // ── Formation ────────────────────────────────────────────────────────────
    pub enemy_rows: usize,
    pub enemy_cols: usize,
    pub enemy_width: f64,
    pub enemy_height: f64,
    pub enemy_speed: f64,
    pub enemy_spacing_x: f64,
    pub enemy_spacing_y: f64,
    pub formation_origin_x: f64,
    pub formation_origin_y: f64,
    /// Vertical drop applied to the whole formation on every bounce.
    pub enemy_descent: f64,
    pub enemy_shot_interval_ms: f64,
    /// Distance above the arena floor an alive enemy may not cross.
    pub invasion_margin: f64,

    // ── Projectiles ──────────────────────────────────────────────────────────
    pub projectile_width: f64,
    pub projectile_height: f64,
    pub player_projectile_speed: f64,
    pub enemy_projectile_speed: f64,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub score_per_kill: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            arena_width: 800.0,
            arena_height: 600.0,
            player_width: 50.0,
            player_height: 20.0,
            player_speed: 5.0,
            player_bottom_gap: 10.0,
            player_cooldown_ms: 500.0,
            enemy_rows: 5,
            enemy_cols: 10,
            enemy_width: 40.0,
            enemy_height: 30.0,
            enemy_speed: 1.0,
            enemy_spacing_x: 60.0,
            enemy_spacing_y: 40.0,
            formation_origin_x: 50.0,
            formation_origin_y: 50.0,
            enemy_descent: 20.0,
            enemy_shot_interval_ms: 1000.0,
            invasion_margin: 50.0,
            projectile_width: 5.0,
            projectile_height: 10.0,
            player_projectile_speed: 7.0,
            enemy_projectile_speed: 3.0,
            score_per_kill: 10,
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl GameConfig {
    /// Check that the numbers describe a playable arena.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("arena_width", self.arena_width)?;
        positive("arena_height", self.arena_height)?;
        positive("player_width", self.player_width)?;
        positive("player_height", self.player_height)?;
        positive("player_speed", self.player_speed)?;
        positive("enemy_width", self.enemy_width)?;
        positive("enemy_height", self.enemy_height)?;
        positive("enemy_speed", self.enemy_speed)?;
        positive("projectile_width", self.projectile_width)?;
        positive("projectile_height", self.projectile_height)?;
        positive("player_projectile_speed", self.player_projectile_speed)?;
        positive("enemy_projectile_speed", self.enemy_projectile_speed)?;

        non_negative("player_bottom_gap", self.player_bottom_gap)?;
        non_negative("player_cooldown_ms", self.player_cooldown_ms)?;
        non_negative("enemy_spacing_x", self.enemy_spacing_x)?;
        non_negative("enemy_spacing_y", self.enemy_spacing_y)?;
        non_negative("formation_origin_x", self.formation_origin_x)?;
        non_negative("formation_origin_y", self.formation_origin_y)?;
        non_negative("enemy_descent", self.enemy_descent)?;
        non_negative("enemy_shot_interval_ms", self.enemy_shot_interval_ms)?;
        non_negative("invasion_margin", self.invasion_margin)?;

        if self.enemy_rows == 0 || self.enemy_cols == 0 {
            return Err(ConfigError::EmptyFormation);
        }
        if self.player_width > self.arena_width {
            return Err(ConfigError::PlayerTooWide {
                player: self.player_width,
                arena: self.arena_width,
            });
        }
        let top = self.player_start_y();
        if top < 0.0 {
            return Err(ConfigError::PlayerOutOfBounds {
                top,
                arena: self.arena_height,
            });
        }

        let enemies = self
            .enemy_rows
            .checked_mul(self.enemy_cols)
            .ok_or(ConfigError::FormationTooLarge {
                rows: self.enemy_rows,
                cols: self.enemy_cols,
            })?;
        // A full clear must still fit in the score counter.
        u32::try_from(enemies)
            .ok()
            .and_then(|n| n.checked_mul(self.score_per_kill))
            .ok_or(ConfigError::ScoreOverflow {
                enemies,
                per_kill: self.score_per_kill,
            })?;

        let right = self.formation_origin_x
            + (self.enemy_cols - 1) as f64 * self.enemy_spacing_x
            + self.enemy_width;
        let bottom = self.formation_origin_y
            + (self.enemy_rows - 1) as f64 * self.enemy_spacing_y
            + self.enemy_height;
        if right > self.arena_width || bottom > self.invasion_line() {
            return Err(ConfigError::FormationOutOfBounds {
                right,
                bottom,
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        Ok(())
    }

    /// Y coordinate an alive enemy's bottom edge must stay at or above.
    pub fn invasion_line(&self) -> f64 {
        self.arena_height - self.invasion_margin
    }

    /// Left edge the player starts at (horizontally centred).
    pub fn player_start_x(&self) -> f64 {
        self.arena_width / 2.0 - self.player_width / 2.0
    }

    pub fn player_start_y(&self) -> f64 {
        self.arena_height - self.player_height - self.player_bottom_gap
    }

    /// Saturates instead of overflowing; `validate` rejects such formations.
    pub fn enemy_count(&self) -> usize {
        self.enemy_rows.saturating_mul(self.enemy_cols)
    }
}
