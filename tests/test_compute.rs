use cannon_defense::compute::*;
use cannon_defense::config::GameConfig;
use cannon_defense::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const FRAME_MS: f64 = 16.0;

fn make_state() -> GameState {
    init_state(GameConfig::default())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> InputIntent {
    InputIntent::default()
}

fn fire() -> InputIntent {
    InputIntent {
        fire: true,
        ..InputIntent::default()
    }
}

fn player_shot(x: f64, y: f64) -> Projectile {
    Projectile { x, y, width: 5.0, height: 10.0, speed: -7.0 }
}

fn enemy_shot(x: f64, y: f64) -> Projectile {
    Projectile { x, y, width: 5.0, height: 10.0, speed: 3.0 }
}

fn kill_all(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.alive = false;
    }
}

// ── init_state / reset ────────────────────────────────────────────────────────

#[test]
fn init_state_player_position() {
    let s = make_state();
    assert_eq!(s.player.x, 375.0); // 800 / 2 - 50 / 2
    assert_eq!(s.player.y, 570.0); // 600 - 20 - 10
    assert_eq!(s.player.last_shot_ms, None);
    assert_eq!(s.player.cooldown_ms, 500.0);
}

#[test]
fn init_state_builds_full_grid() {
    let s = make_state();
    assert_eq!(s.enemies.len(), 50);
    assert!(s.enemies.iter().all(|e| e.alive));
    assert_eq!((s.enemies[0].x, s.enemies[0].y), (50.0, 50.0));
    // row-major: index 11 is row 1, column 1
    assert_eq!((s.enemies[11].x, s.enemies[11].y), (110.0, 90.0));
    assert_eq!((s.enemies[49].x, s.enemies[49].y), (590.0, 210.0));
}

#[test]
fn init_state_empty_collections() {
    let s = make_state();
    assert!(s.player_projectiles.is_empty());
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.frame, 0);
    assert_eq!(s.phase, GamePhase::Active);
    assert_eq!(s.heading, Heading::Right);
    assert_eq!(s.last_enemy_shot_ms, 0.0);
}

#[test]
fn reset_restores_startup_layout_every_time() {
    let startup = make_state();
    let mut rng = seeded_rng();
    let mut s = startup.clone();
    for i in 1..=300 {
        s = step(&s, &fire(), i as f64 * FRAME_MS * 5.0, &mut rng);
    }
    assert_ne!(s, startup);

    let once = reset(&s);
    assert_eq!(once, startup);
    let twice = reset(&once);
    assert_eq!(twice, startup);
}

#[test]
fn reset_works_from_every_phase() {
    let startup = make_state();
    for phase in [GamePhase::Active, GamePhase::Lost, GamePhase::Won] {
        let mut s = make_state();
        s.phase = phase;
        s.score = 120;
        assert_eq!(reset(&s), startup);
    }
}

#[test]
fn reset_keeps_custom_config() {
    let config = GameConfig {
        enemy_rows: 2,
        enemy_cols: 3,
        ..GameConfig::default()
    };
    let s = init_state(config.clone());
    assert_eq!(s.enemies.len(), 6);
    assert_eq!(reset(&s).config, config);
    assert_eq!(reset(&s).enemies.len(), 6);
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_left_and_right() {
    let s = make_state();
    let left = InputIntent { move_left: true, ..idle() };
    let right = InputIntent { move_right: true, ..idle() };
    assert_eq!(move_player(&s.player, &left, 800.0).x, 370.0);
    assert_eq!(move_player(&s.player, &right, 800.0).x, 380.0);
}

#[test]
fn both_directions_cancel_out() {
    let s = make_state();
    let both = InputIntent { move_left: true, move_right: true, fire: false };
    assert_eq!(move_player(&s.player, &both, 800.0).x, s.player.x);
}

#[test]
fn move_clamps_at_both_walls() {
    let mut s = make_state();
    s.player.x = 2.0;
    let left = InputIntent { move_left: true, ..idle() };
    assert_eq!(move_player(&s.player, &left, 800.0).x, 0.0);

    s.player.x = 748.0;
    let right = InputIntent { move_right: true, ..idle() };
    assert_eq!(move_player(&s.player, &right, 800.0).x, 750.0);
}

#[test]
fn player_stays_in_bounds_over_many_frames() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    let left = InputIntent { move_left: true, ..idle() };
    let right = InputIntent { move_right: true, ..idle() };
    for i in 1..=120 {
        s = step(&s, &left, i as f64, &mut rng);
        assert!(s.player.x >= 0.0 && s.player.x <= 750.0);
    }
    assert_eq!(s.player.x, 0.0);
    for i in 121..=400 {
        s = step(&s, &right, i as f64, &mut rng);
        assert!(s.player.x >= 0.0 && s.player.x <= 750.0);
    }
    assert_eq!(s.player.x, 750.0);
}

// ── evaluate_phase ────────────────────────────────────────────────────────────

#[test]
fn evaluate_phase_prefers_loss_over_win() {
    let config = GameConfig::default();
    let mut s = make_state();
    kill_all(&mut s);
    assert_eq!(evaluate_phase(true, &s.enemies, &config), GamePhase::Lost);
    assert_eq!(evaluate_phase(false, &s.enemies, &config), GamePhase::Won);
}

#[test]
fn formation_landed_only_counts_alive_enemies() {
    let config = GameConfig::default();
    let mut s = make_state();
    s.enemies[0].y = 521.0; // bottom edge 551 > 550
    assert!(formation_landed(&s.enemies, &config));
    s.enemies[0].alive = false;
    assert!(!formation_landed(&s.enemies, &config));
}

#[test]
fn formation_touching_the_line_has_not_landed() {
    let config = GameConfig::default();
    let mut s = make_state();
    s.enemies[0].y = 520.0; // bottom edge exactly 550
    assert!(!formation_landed(&s.enemies, &config));
}

// ── step — gameplay ──────────────────────────────────────────────────────────

#[test]
fn idle_frames_only_sweep_the_formation() {
    let start = make_state();
    let mut rng = seeded_rng();
    let mut s = start.clone();
    let n = 50;
    for i in 1..=n {
        s = step(&s, &idle(), i as f64 * FRAME_MS, &mut rng); // up to 800 ms
    }
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.phase, GamePhase::Active);
    assert_eq!(s.heading, Heading::Right);
    for (before, after) in start.enemies.iter().zip(&s.enemies) {
        assert_eq!(after.x, before.x + n as f64);
        assert_eq!(after.y, before.y);
    }
}

#[test]
fn second_shot_inside_cooldown_is_ignored() {
    let mut rng = seeded_rng();
    let s = make_state();
    let s = step(&s, &fire(), 0.0, &mut rng);
    let s = step(&s, &fire(), 400.0, &mut rng);
    assert_eq!(s.player_projectiles.len(), 1);
    assert_eq!(s.player.last_shot_ms, Some(0.0));
}

#[test]
fn shot_after_cooldown_is_accepted() {
    let mut rng = seeded_rng();
    let s = make_state();
    let s = step(&s, &fire(), 0.0, &mut rng);
    let s = step(&s, &fire(), 500.0, &mut rng); // not strictly past 500 ms
    assert_eq!(s.player_projectiles.len(), 1);
    let s = step(&s, &fire(), 501.0, &mut rng);
    assert_eq!(s.player_projectiles.len(), 2);
    assert_eq!(s.player.last_shot_ms, Some(501.0));
}

#[test]
fn new_player_shot_moves_on_its_first_frame() {
    let mut rng = seeded_rng();
    let s = step(&make_state(), &fire(), 10.0, &mut rng);
    let shot = &s.player_projectiles[0];
    assert_eq!(shot.x, 397.5); // 375 + 25 - 2.5
    assert_eq!(shot.y, 553.0); // 570 - 10 - 7
    assert_eq!(shot.speed, -7.0);
}

#[test]
fn overlapping_shot_destroys_enemy() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player_projectiles.push(player_shot(60.0, 60.0));
    let s = step(&s, &idle(), FRAME_MS, &mut rng);

    assert!(!s.enemies[0].alive);
    assert_eq!(s.enemies.iter().filter(|e| e.alive).count(), 49);
    assert_eq!(s.score, 10);
    assert!(s.player_projectiles.is_empty());
    assert_eq!(s.phase, GamePhase::Active);
}

#[test]
fn two_shots_on_two_enemies_score_twice() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player_projectiles.push(player_shot(60.0, 60.0)); // enemy 0
    s.player_projectiles.push(player_shot(120.0, 60.0)); // enemy 1
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert!(!s.enemies[0].alive && !s.enemies[1].alive);
    assert_eq!(s.score, 20);
    assert!(s.player_projectiles.is_empty());
}

#[test]
fn score_saturates_instead_of_overflowing() {
    let config = GameConfig { score_per_kill: u32::MAX, ..GameConfig::default() };
    let mut rng = seeded_rng();
    let mut s = init_state(config);
    s.player_projectiles.push(player_shot(60.0, 60.0)); // enemy 0
    s.player_projectiles.push(player_shot(120.0, 60.0)); // enemy 1
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.score, u32::MAX);

    let mut s = s;
    s.player_projectiles.push(player_shot(180.0, 60.0)); // enemy 2
    let s = step(&s, &idle(), FRAME_MS * 2.0, &mut rng);
    assert!(!s.enemies[2].alive);
    assert_eq!(s.score, u32::MAX);
}

#[test]
fn clearing_the_formation_wins() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    kill_all(&mut s);
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.phase, GamePhase::Won);
}

#[test]
fn killing_the_last_enemy_wins_the_same_frame() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    kill_all(&mut s);
    s.enemies[0].alive = true;
    s.player_projectiles.push(player_shot(60.0, 60.0));
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.score, 10);
    assert_eq!(s.phase, GamePhase::Won);
}

#[test]
fn loss_beats_win_in_the_same_frame() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    kill_all(&mut s);
    s.enemy_projectiles.push(enemy_shot(395.0, 572.0));
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.phase, GamePhase::Lost);
    assert!(s.enemy_projectiles.is_empty());
}

#[test]
fn enemy_shot_on_player_loses() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemy_projectiles.push(enemy_shot(395.0, 572.0));
    s.enemy_projectiles.push(enemy_shot(380.0, 575.0));
    s.enemy_projectiles.push(enemy_shot(10.0, 300.0));
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.phase, GamePhase::Lost);
    assert_eq!(s.enemy_projectiles.len(), 1);
    assert_eq!(s.enemy_projectiles[0].x, 10.0);
}

#[test]
fn formation_reaching_the_floor_loses() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies[0].y = 521.0;
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.phase, GamePhase::Lost);
}

// ── step — ordering and formation ────────────────────────────────────────────

#[test]
fn bounce_reverses_and_descends_every_enemy() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.enemies[3].alive = false;
    for enemy in &mut s.enemies {
        enemy.x += 170.0; // rightmost alive edge now exactly 800
    }
    let before = s.clone();
    let s = step(&s, &idle(), FRAME_MS, &mut rng);
    assert_eq!(s.heading, Heading::Left);
    for (b, a) in before.enemies.iter().zip(&s.enemies) {
        assert_eq!(a.y, b.y + 20.0);
        assert_eq!(a.x, b.x + 1.0);
    }
}

#[test]
fn enemy_shot_spawns_after_projectiles_advance() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    kill_all(&mut s);
    s.enemies[0].alive = true;
    let s = step(&s, &idle(), 1001.0, &mut rng);

    assert_eq!(s.last_enemy_shot_ms, 1001.0);
    assert_eq!(s.enemy_projectiles.len(), 1);
    let shot = &s.enemy_projectiles[0];
    assert_eq!(shot.x, 68.5); // 51 + 20 - 2.5
    assert_eq!(shot.y, 80.0); // enemy bottom edge, not yet advanced
    assert_eq!(shot.speed, 3.0);

    let s = step(&s, &idle(), 1017.0, &mut rng);
    assert_eq!(s.enemy_projectiles[0].y, 83.0);
    assert_eq!(s.enemy_projectiles.len(), 1);
}

#[test]
fn enemy_fire_waits_for_the_interval() {
    let mut rng = seeded_rng();
    let s = step(&make_state(), &idle(), 1000.0, &mut rng);
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.last_enemy_shot_ms, 0.0);
    let s = step(&s, &idle(), 1000.5, &mut rng);
    assert_eq!(s.enemy_projectiles.len(), 1);
    assert_eq!(s.last_enemy_shot_ms, 1000.5);
}

#[test]
fn empty_formation_does_not_stamp_enemy_clock() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    kill_all(&mut s);
    let s = step(&s, &idle(), 5000.0, &mut rng);
    assert!(s.enemy_projectiles.is_empty());
    assert_eq!(s.last_enemy_shot_ms, 0.0);
}

#[test]
fn projectiles_are_culled_once_off_screen() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.player_projectiles.push(player_shot(700.0, 2.0));
    s.enemy_projectiles.push(enemy_shot(10.0, 595.0));

    let s = step(&s, &idle(), 1.0, &mut rng);
    assert_eq!(s.player_projectiles.len(), 1); // y = -5, bottom edge still on screen
    assert_eq!(s.enemy_projectiles.len(), 1); // y = 598

    let s = step(&s, &idle(), 2.0, &mut rng);
    assert!(s.player_projectiles.is_empty());
    assert!(s.enemy_projectiles.is_empty());
}

#[test]
fn step_counts_frames() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.frame = 5;
    let s = step(&s, &idle(), 1.0, &mut rng);
    assert_eq!(s.frame, 6);
}

#[test]
fn step_does_not_mutate_original() {
    let mut rng = seeded_rng();
    let s = make_state();
    let _ = step(&s, &fire(), 2000.0, &mut rng);
    assert_eq!(s, make_state());
}

// ── Terminal phases ───────────────────────────────────────────────────────────

#[test]
fn terminal_phases_freeze_the_simulation() {
    let mut rng = seeded_rng();
    for phase in [GamePhase::Lost, GamePhase::Won] {
        let mut s = make_state();
        s.player_projectiles.push(player_shot(700.0, 300.0));
        s.phase = phase;
        let frozen = s.clone();
        let moving = InputIntent { move_left: true, move_right: false, fire: true };
        for i in 1..=20 {
            s = step(&s, &moving, i as f64 * 1000.0, &mut rng);
            assert_eq!(s, frozen);
        }
    }
}

#[test]
fn games_are_independent() {
    let mut rng_a = seeded_rng();
    let mut rng_b = seeded_rng();
    let a = step(&make_state(), &fire(), 0.0, &mut rng_a);
    let b = step(&make_state(), &idle(), 0.0, &mut rng_b);
    assert_eq!(a.player_projectiles.len(), 1);
    assert!(b.player_projectiles.is_empty());
}

// ── Long-run invariants ───────────────────────────────────────────────────────

#[test]
fn alive_flags_and_score_move_one_way() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for i in 1..=3000u32 {
        let intent = InputIntent {
            move_left: (i / 90) % 2 == 0,
            move_right: (i / 90) % 2 == 1,
            fire: true,
        };
        let next = step(&s, &intent, i as f64 * FRAME_MS, &mut rng);

        let mut newly_dead = 0;
        for (before, after) in s.enemies.iter().zip(&next.enemies) {
            assert!(!(after.alive && !before.alive), "enemy came back to life");
            if before.alive && !after.alive {
                newly_dead += 1;
            }
        }
        assert_eq!(next.score, s.score + newly_dead * 10);
        assert!(next.player.x >= 0.0 && next.player.x <= 750.0);
        assert!(next.player_projectiles.iter().all(|p| p.y + p.height > 0.0));
        assert!(next.enemy_projectiles.iter().all(|p| p.y < 600.0));
        s = next;
    }
    assert!(s.score > 0);
}

#[test]
fn same_seed_same_game() {
    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = make_state();
        for i in 1..=1500u32 {
            s = step(&s, &fire(), i as f64 * FRAME_MS, &mut rng);
        }
        s
    };
    assert_eq!(run(7), run(7));
}

// ── Clock contract ────────────────────────────────────────────────────────────

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "clock reading must be finite")]
fn non_finite_clock_is_asserted_in_debug_builds() {
    let mut rng = seeded_rng();
    let _ = step(&make_state(), &idle(), f64::NAN, &mut rng);
}

#[cfg(not(debug_assertions))]
#[test]
fn non_finite_clock_is_a_no_op() {
    let mut rng = seeded_rng();
    let s = make_state();
    assert_eq!(step(&s, &fire(), f64::INFINITY, &mut rng), s);
    assert_eq!(step(&s, &fire(), f64::NAN, &mut rng), s);
}
