//! Game state and core simulation types
//!
//! `GameState` is the single owned session aggregate: every entity list, the
//! score, level, tick counter, virtual clock and RNG live here and are passed
//! by reference into `tick` and the renderer.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Enemy, Particle, Player, Projectile, Star, explosion, starfield};
use super::level::{FIRST_LEVEL, Progression, check_progression};
use super::schedule::{Deferred, Outcome, Schedule};
use crate::consts::*;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, background only
    Start,
    /// Full simulation
    Playing,
    /// Between-level pause, field cleared
    Transition,
    /// Player destroyed (terminal)
    GameOver,
    /// Final level cleared (terminal)
    Victory,
}

impl GamePhase {
    /// Player, projectiles and enemies are drawn in this phase
    pub fn shows_actors(self) -> bool {
        matches!(
            self,
            GamePhase::Playing | GamePhase::GameOver | GamePhase::Victory
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

impl From<Outcome> for GamePhase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::GameOver => GamePhase::GameOver,
            Outcome::Victory => GamePhase::Victory,
        }
    }
}

/// Named UI screens; exactly one is active at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Screen {
    Start,
    Hud,
    Transition,
    GameOver,
    Victory,
}

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Shoot,
    GameOver,
}

/// Side effects for the shell's collaborators (audio, DOM)
///
/// The simulation only records these; the shell drains them once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    MusicStart,
    MusicStop,
    SwitchScreen(Screen),
    ScoreBoard { score: u32, level: u8 },
    LevelTitle { level: u8 },
    FinalScore { outcome: Outcome, score: u32 },
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Current level (1-based)
    pub level: u8,
    /// Ticks since session start
    pub ticks: u64,
    /// Virtual clock (milliseconds since creation, never reset)
    pub clock_ms: f64,
    /// Present in every phase except `Start`
    pub player: Option<Player>,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,
    pub schedule: Schedule,
    /// Sessions started since creation
    pub sessions: u32,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Idle title-screen state with a fresh starfield
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = starfield(&mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Start,
            score: 0,
            level: FIRST_LEVEL,
            ticks: 0,
            clock_ms: 0.0,
            player: None,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
            stars,
            schedule: Schedule::new(),
            sessions: 0,
            events: Vec::new(),
        }
    }

    /// Begin a brand-new session. Allowed from any phase.
    pub fn start_session(&mut self) {
        self.stars = starfield(&mut self.rng);
        self.player = Some(Player::new());
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
        self.level = FIRST_LEVEL;
        self.ticks = 0;
        self.schedule.clear();
        self.sessions += 1;

        self.emit(GameEvent::ScoreBoard {
            score: self.score,
            level: self.level,
        });
        self.emit(GameEvent::SwitchScreen(Screen::Hud));
        self.phase = GamePhase::Playing;
        self.emit(GameEvent::MusicStart);

        log::info!("Session {} started", self.sessions);
    }

    /// RNG shared by spawning, explosions and the starfield
    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Scroll the starfield one tick
    pub fn scroll_stars(&mut self) {
        for star in &mut self.stars {
            star.update(&mut self.rng);
        }
    }

    /// Burst of particles at `center`
    pub fn spawn_explosion(&mut self, center: glam::Vec2, color: crate::Rgba) {
        let burst = explosion(&mut self.rng, center, color);
        self.particles.extend(burst);
    }

    /// Credit one destroyed enemy and re-check level progression
    pub fn award_kill(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.score += POINTS_PER_KILL;
        self.emit(GameEvent::ScoreBoard {
            score: self.score,
            level: self.level,
        });
        self.check_level_progression();
    }

    fn check_level_progression(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match check_progression(self.level, self.score) {
            Progression::Stay => {}
            Progression::Advance(next) => self.begin_transition(next),
            Progression::Victory => self.end_game(Outcome::Victory),
        }
    }

    fn begin_transition(&mut self, next_level: u8) {
        log::info!("Level {} cleared at score {}", self.level, self.score);
        self.phase = GamePhase::Transition;
        self.level = next_level;
        self.emit(GameEvent::LevelTitle { level: next_level });
        self.emit(GameEvent::SwitchScreen(Screen::Transition));

        self.projectiles.clear();
        self.enemies.clear();

        self.schedule
            .schedule(self.clock_ms + TRANSITION_MS, Deferred::ResumeLevel);
    }

    /// Enter a terminal phase
    pub fn end_game(&mut self, outcome: Outcome) {
        log::info!("Session {} ended: {:?} (score {})", self.sessions, outcome, self.score);
        self.phase = outcome.into();
        self.projectiles.clear();
        self.enemies.clear();

        self.emit(GameEvent::MusicStop);
        if outcome == Outcome::GameOver {
            self.emit(GameEvent::Sound(SoundCue::GameOver));
        }

        self.schedule.schedule(
            self.clock_ms + END_SCREEN_DELAY_MS,
            Deferred::RevealOutcome(outcome),
        );
    }

    /// Run a deferred action if the phase it was scheduled for still holds
    pub fn apply_deferred(&mut self, action: Deferred) {
        match action {
            Deferred::ResumeLevel => {
                if self.phase != GamePhase::Transition {
                    log::debug!("Dropping stale level resume");
                    return;
                }
                self.phase = GamePhase::Playing;
                self.emit(GameEvent::SwitchScreen(Screen::Hud));
                self.emit(GameEvent::ScoreBoard {
                    score: self.score,
                    level: self.level,
                });
            }
            Deferred::RevealOutcome(outcome) => {
                if self.phase != GamePhase::from(outcome) {
                    log::debug!("Dropping stale {:?} reveal", outcome);
                    return;
                }
                self.emit(GameEvent::FinalScore {
                    outcome,
                    score: self.score,
                });
                let screen = match outcome {
                    Outcome::GameOver => Screen::GameOver,
                    Outcome::Victory => Screen::Victory,
                };
                self.emit(GameEvent::SwitchScreen(screen));
            }
        }
    }
}
