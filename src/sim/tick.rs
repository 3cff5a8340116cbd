//! Simulation tick
//!
//! One call advances the whole game by one frame: virtual clock and deferred
//! actions, background, actors, spawning, collisions, then compaction.

use super::collision::{player_hits_enemy, projectile_hits_enemy};
use super::entities::{Enemy, compact};
use super::input::InputState;
use super::level::level_config;
use super::schedule::Outcome;
use super::state::{GameEvent, GamePhase, GameState, SoundCue};

/// Advance the game state by one tick, `dt_ms` of virtual time
pub fn tick(state: &mut GameState, input: &InputState, dt_ms: f64) {
    state.clock_ms += dt_ms.max(0.0);
    for action in state.schedule.take_due(state.clock_ms) {
        state.apply_deferred(action);
    }

    // Background scrolls in every phase
    state.scroll_stars();

    if state.phase == GamePhase::Playing {
        update_player(state, input);
        spawn_enemies(state);
        for projectile in &mut state.projectiles {
            projectile.update();
        }
        for enemy in &mut state.enemies {
            enemy.update();
        }
        check_collisions(state);
    }

    // Explosions keep animating after the game ends
    for particle in &mut state.particles {
        particle.update();
    }

    compact(&mut state.projectiles);
    compact(&mut state.enemies);
    compact(&mut state.particles);

    state.ticks += 1;
}

fn update_player(state: &mut GameState, input: &InputState) {
    let now = state.clock_ms;
    let shot = state
        .player
        .as_mut()
        .and_then(|player| player.update(input, now));
    if let Some(projectile) = shot {
        state.projectiles.push(projectile);
        state.emit(GameEvent::Sound(SoundCue::Shoot));
    }
}

/// One enemy every `spawn_interval` ticks, starting on tick 0
fn spawn_enemies(state: &mut GameState) {
    let config = level_config(state.level);
    if state.ticks % config.spawn_interval == 0 {
        let enemy = Enemy::spawn(state.rng(), config.enemy_speed, config.tint, config.zigzag);
        state.enemies.push(enemy);
    }
}

/// Score projectile hits, then test the player against every enemy.
///
/// Every projectile/enemy pair is visited once, including entities already
/// flagged earlier in the pass. The pass stops as soon as a hit moves the game
/// out of `Playing`, since the field is cleared at that point.
fn check_collisions(state: &mut GameState) {
    for pi in 0..state.projectiles.len() {
        for ei in 0..state.enemies.len() {
            if !projectile_hits_enemy(&state.projectiles[pi], &state.enemies[ei]) {
                continue;
            }
            state.projectiles[pi].marked_for_deletion = true;
            let enemy = &mut state.enemies[ei];
            enemy.marked_for_deletion = true;
            let (center, color) = (enemy.bounds().center(), enemy.color);

            state.spawn_explosion(center, color);
            state.award_kill();
            if state.phase != GamePhase::Playing {
                return;
            }
        }
    }

    let crash = state
        .player
        .as_ref()
        .filter(|player| state.enemies.iter().any(|e| player_hits_enemy(player, e)))
        .map(|player| (player.bounds().center(), player.color));
    if let Some((center, color)) = crash {
        state.spawn_explosion(center, color);
        state.end_game(Outcome::GameOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::palette;
    use crate::sim::entities::Projectile;
    use crate::sim::input::Key;
    use crate::sim::schedule::Outcome;
    use crate::sim::state::Screen;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f64 = SIM_DT_MS;

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        state.start_session();
        state.drain_events();
        state
    }

    /// Enemy and projectile arranged so they collide after this tick's movement
    fn stage_hit(state: &mut GameState) {
        let config = level_config(state.level);
        let mut enemy = Enemy::new(100.0, config.enemy_speed, config.tint, false);
        enemy.pos.y = 100.0;
        state.enemies.push(enemy);
        state.projectiles.push(Projectile::new(Vec2::new(115.0, 130.0)));
    }

    fn count(events: &[GameEvent], pred: impl Fn(&GameEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[test]
    fn test_start_phase_only_scrolls_background() {
        let mut state = GameState::new(1);
        let before: Vec<f32> = state.stars.iter().map(|s| s.pos.y).collect();
        tick(&mut state, &InputState::default(), DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.enemies.is_empty());
        assert!(state.player.is_none());
        let moved = state
            .stars
            .iter()
            .zip(&before)
            .filter(|(s, y)| s.pos.y != **y)
            .count();
        assert_eq!(moved, STAR_COUNT);
    }

    #[test]
    fn test_spawn_timer() {
        let mut state = playing_state();
        let input = InputState::default();
        tick(&mut state, &input, DT);
        assert_eq!(state.enemies.len(), 1, "spawns on tick 0");
        for _ in 1..90 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.enemies.len(), 1);
        tick(&mut state, &input, DT);
        assert_eq!(state.enemies.len(), 2, "second spawn on tick 90");
        assert!(state.enemies.iter().all(|e| e.speed == 1.5 && !e.zigzag));
    }

    #[test]
    fn test_shoot_emits_cue_and_respects_cooldown() {
        let mut state = playing_state();
        let mut input = InputState::default();
        input.press(Key::Space);

        // 12 ticks of ~16.7ms = 200ms
        for _ in 0..12 {
            tick(&mut state, &input, DT);
        }
        let events = state.drain_events();
        let shots = count(&events, |e| *e == GameEvent::Sound(SoundCue::Shoot));
        assert_eq!(shots, 1);
        assert_eq!(state.projectiles.len(), 1);

        tick(&mut state, &input, 2.0 * DT);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_projectile_hit_scores_and_explodes() {
        let mut state = playing_state();
        tick(&mut state, &InputState::default(), DT); // consume the tick-0 spawn
        state.enemies.clear();
        state.particles.clear();
        state.drain_events();

        stage_hit(&mut state);
        tick(&mut state, &InputState::default(), DT);

        assert_eq!(state.score, POINTS_PER_KILL);
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);
        assert!(state.particles.iter().all(|p| p.color == level_config(1).tint));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::ScoreBoard { score: 10, level: 1 }]
        );
    }

    #[test]
    fn test_projectile_scores_every_overlapping_enemy() {
        let mut state = playing_state();
        tick(&mut state, &InputState::default(), DT);
        state.enemies.clear();

        // Two stacked enemies, one projectile inside both
        for _ in 0..2 {
            let mut enemy = Enemy::new(100.0, 1.5, palette::STAR, false);
            enemy.pos.y = 100.0;
            state.enemies.push(enemy);
        }
        state.projectiles.push(Projectile::new(Vec2::new(115.0, 130.0)));
        tick(&mut state, &InputState::default(), DT);

        assert_eq!(state.score, 2 * POINTS_PER_KILL);
        assert_eq!(state.particles.len(), 2 * PARTICLES_PER_EXPLOSION);
    }

    #[test]
    fn test_ten_hits_advance_to_level_two_once() {
        let mut state = playing_state();
        let input = InputState::default();
        let mut events = Vec::new();

        for _ in 0..10 {
            stage_hit(&mut state);
            tick(&mut state, &input, DT);
            events.extend(state.drain_events());
        }

        assert_eq!(state.score, 100);
        assert_eq!(state.phase, GamePhase::Transition);
        assert_eq!(state.level, 2);
        assert_eq!(count(&events, |e| matches!(e, GameEvent::LevelTitle { .. })), 1);
        assert_eq!(
            count(&events, |e| *e == GameEvent::SwitchScreen(Screen::Transition)),
            1
        );
        assert!(state.enemies.is_empty() && state.projectiles.is_empty());

        // Frozen during the window: nothing spawns, score holds
        for _ in 0..60 {
            tick(&mut state, &input, DT);
        }
        assert_eq!(state.phase, GamePhase::Transition);
        assert!(state.enemies.is_empty());

        // Window elapses on the virtual clock
        tick(&mut state, &input, TRANSITION_MS);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 100);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::SwitchScreen(Screen::Hud)));
        assert!(events.contains(&GameEvent::ScoreBoard { score: 100, level: 2 }));
    }

    #[test]
    fn test_level_three_threshold_is_victory() {
        let mut state = playing_state();
        state.level = 3;
        state.score = 590;
        let input = InputState::default();

        stage_hit(&mut state);
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Victory);
        assert_eq!(state.score, 600);

        let events = state.drain_events();
        assert_eq!(count(&events, |e| matches!(e, GameEvent::LevelTitle { .. })), 0);
        assert!(events.contains(&GameEvent::MusicStop));
        assert!(!events.contains(&GameEvent::Sound(SoundCue::GameOver)));

        for _ in 0..200 {
            tick(&mut state, &input, DT);
            assert_ne!(state.phase, GamePhase::Transition);
        }
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::FinalScore {
            outcome: Outcome::Victory,
            score: 600
        }));
        assert!(events.contains(&GameEvent::SwitchScreen(Screen::Victory)));
    }

    #[test]
    fn test_crash_is_game_over_same_tick() {
        let mut state = playing_state();
        state.score = 50;
        let player_pos = state.player.as_ref().unwrap().pos;
        let mut enemy = Enemy::new(player_pos.x, 1.5, palette::STAR, false);
        enemy.pos.y = player_pos.y;
        state.enemies.push(enemy);

        tick(&mut state, &InputState::default(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.enemies.is_empty());
        assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);
        assert!(state.particles.iter().all(|p| p.color == palette::PLAYER));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Sound(SoundCue::GameOver)));
        assert!(events.contains(&GameEvent::MusicStop));

        // Final score appears after the reveal delay, not before
        tick(&mut state, &InputState::default(), END_SCREEN_DELAY_MS - DT);
        assert!(state.drain_events().is_empty());
        tick(&mut state, &InputState::default(), 2.0 * DT);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::FinalScore {
                    outcome: Outcome::GameOver,
                    score: 50
                },
                GameEvent::SwitchScreen(Screen::GameOver),
            ]
        );
    }

    #[test]
    fn test_actors_freeze_after_game_over_but_particles_fade() {
        let mut state = playing_state();
        state.end_game(Outcome::GameOver);
        state.spawn_explosion(Vec2::new(10.0, 10.0), palette::PLAYER);
        let ship = state.player.as_ref().unwrap().pos;

        let mut input = InputState::default();
        input.press(Key::ArrowLeft);
        input.press(Key::Space);
        tick(&mut state, &input, DT);

        assert_eq!(state.player.as_ref().unwrap().pos, ship);
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.particles.iter().all(|p| p.alpha < 1.0));
    }

    #[test]
    fn test_offscreen_enemy_compacted() {
        let mut state = playing_state();
        let mut enemy = Enemy::new(0.0, 1.5, palette::STAR, false);
        enemy.pos.y = VIEWPORT_HEIGHT;
        state.enemies.push(enemy);
        tick(&mut state, &InputState::default(), DT);
        assert!(state.enemies.iter().all(|e| e.pos.y <= VIEWPORT_HEIGHT));
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = playing_state();
        for _ in 0..3 {
            stage_hit(&mut state);
            tick(&mut state, &InputState::default(), DT);
        }
        state.end_game(Outcome::GameOver);
        assert_eq!(state.score, 30);

        state.start_session();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.ticks, 0);
        assert!(state.projectiles.is_empty());
        assert!(state.enemies.is_empty());
        assert!(state.particles.is_empty());
        assert!(state.schedule.is_empty());
        assert_eq!(state.stars.len(), STAR_COUNT);
    }

    #[test]
    fn test_restart_during_transition_drops_resume() {
        let mut state = playing_state();
        state.score = 90;
        stage_hit(&mut state);
        tick(&mut state, &InputState::default(), DT);
        assert_eq!(state.phase, GamePhase::Transition);

        state.start_session();
        state.drain_events();
        tick(&mut state, &InputState::default(), TRANSITION_MS * 2.0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 1);
        assert!(
            !state
                .drain_events()
                .contains(&GameEvent::SwitchScreen(Screen::Hud))
        );
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        a.start_session();
        b.start_session();

        let mut input = InputState::default();
        input.press(Key::Space);
        for i in 0..600 {
            input.set(Key::ArrowLeft, i % 120 < 60);
            input.set(Key::ArrowRight, i % 120 >= 60);
            tick(&mut a, &input, DT);
            tick(&mut b, &input, DT);
        }

        let snap_a = serde_json::to_string(&a).unwrap();
        let snap_b = serde_json::to_string(&b).unwrap();
        assert_eq!(snap_a, snap_b);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    fn any_input() -> impl Strategy<Value = InputState> {
        prop::collection::vec(any::<bool>(), 9).prop_map(|held| {
            let mut input = InputState::default();
            for (key, down) in Key::ALL.iter().zip(held) {
                input.set(*key, down);
            }
            input
        })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_viewport(inputs in prop::collection::vec(any_input(), 1..300)) {
            let mut state = GameState::new(3);
            state.start_session();
            for input in &inputs {
                tick(&mut state, input, DT);
                if let Some(player) = &state.player {
                    prop_assert!(player.pos.x >= 0.0 && player.pos.x <= VIEWPORT_WIDTH - player.size.x);
                    prop_assert!(player.pos.y >= 0.0 && player.pos.y <= VIEWPORT_HEIGHT - player.size.y);
                }
            }
        }

        #[test]
        fn prop_fast_fire_yields_one_shot(gap in 0.0f64..FIRE_COOLDOWN_MS) {
            let mut state = GameState::new(4);
            state.start_session();
            let mut input = InputState::default();
            input.press(Key::Space);
            tick(&mut state, &input, DT);
            tick(&mut state, &input, gap);
            prop_assert_eq!(state.projectiles.len(), 1);
        }

        #[test]
        fn prop_score_moves_in_tens(inputs in prop::collection::vec(any_input(), 1..400)) {
            let mut state = GameState::new(5);
            state.start_session();
            for input in &inputs {
                let before = state.score;
                let was_playing = state.phase == GamePhase::Playing;
                tick(&mut state, input, DT);
                let delta = state.score - before;
                prop_assert_eq!(delta % POINTS_PER_KILL, 0);
                let resumed = state
                    .drain_events()
                    .contains(&GameEvent::SwitchScreen(Screen::Hud));
                if delta > 0 {
                    prop_assert!(was_playing || resumed);
                }
            }
        }

        #[test]
        fn prop_particle_alpha_strictly_decreases(seed in any::<u64>()) {
            let mut state = GameState::new(seed);
            state.spawn_explosion(Vec2::new(400.0, 300.0), palette::PLAYER);
            prop_assert_eq!(state.particles.len(), PARTICLES_PER_EXPLOSION);
            while !state.particles.is_empty() {
                let before: Vec<f32> = state.particles.iter().map(|p| p.alpha).collect();
                tick(&mut state, &InputState::default(), DT);
                // Compaction keeps order; survivors are a prefix-preserving subset
                for (p, a) in state.particles.iter().zip(&before) {
                    prop_assert!(p.alpha < *a);
                }
            }
        }
    }
}
