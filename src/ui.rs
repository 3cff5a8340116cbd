//! DOM overlay: screen switching and HUD text
//!
//! The page provides one element per `Screen` (class `screen`); exactly one of
//! them carries the `active` class.

use crate::sim::{Outcome, Screen};

/// Class marking the visible screen
pub const ACTIVE_CLASS: &str = "active";

impl Screen {
    pub const ALL: [Screen; 5] = [
        Screen::Start,
        Screen::Hud,
        Screen::Transition,
        Screen::GameOver,
        Screen::Victory,
    ];

    /// Page element id for this screen
    pub fn element_id(self) -> &'static str {
        match self {
            Screen::Start => "start-screen",
            Screen::Hud => "hud-screen",
            Screen::Transition => "level-transition-screen",
            Screen::GameOver => "game-over-screen",
            Screen::Victory => "victory-screen",
        }
    }
}

/// Text element ids
pub mod ids {
    pub const SCORE: &str = "score-display";
    pub const LEVEL: &str = "level-display";
    pub const LEVEL_TITLE: &str = "level-title";
    pub const FINAL_SCORE: &str = "final-score";
    pub const VICTORY_SCORE: &str = "victory-score";

    /// Buttons that start a new session
    pub const START_BUTTONS: [&str; 3] = ["start-btn", "restart-btn", "play-again-btn"];
}

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn level_text(level: u8) -> String {
    format!("Level: {}", level)
}

pub fn level_title_text(level: u8) -> String {
    format!("LEVEL {}", level)
}

/// Element id and text for the end-of-game score line
pub fn final_score_text(outcome: Outcome, score: u32) -> (&'static str, String) {
    match outcome {
        Outcome::GameOver => (ids::FINAL_SCORE, format!("Your score: {}", score)),
        Outcome::Victory => (ids::VICTORY_SCORE, format!("Final score: {}", score)),
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::ScreenManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{Document, Element};

    use super::*;
    use crate::error::InitError;
    use crate::sim::GameEvent;

    /// Owns the overlay elements and applies simulation events to them
    pub struct ScreenManager {
        screens: Vec<(Screen, Element)>,
        score: Option<Element>,
        level: Option<Element>,
        level_title: Option<Element>,
        final_score: Option<Element>,
        victory_score: Option<Element>,
    }

    impl ScreenManager {
        pub fn new(document: &Document) -> Result<Self, InitError> {
            let mut screens = Vec::with_capacity(Screen::ALL.len());
            for screen in Screen::ALL {
                let id = screen.element_id();
                let el = document
                    .get_element_by_id(id)
                    .ok_or(InitError::MissingElement(id))?;
                screens.push((screen, el));
            }

            let text = |id: &str| {
                let el = document.get_element_by_id(id);
                if el.is_none() {
                    log::warn!("Missing text element #{}", id);
                }
                el
            };

            Ok(Self {
                screens,
                score: text(ids::SCORE),
                level: text(ids::LEVEL),
                level_title: text(ids::LEVEL_TITLE),
                final_score: text(ids::FINAL_SCORE),
                victory_score: text(ids::VICTORY_SCORE),
            })
        }

        /// Make `screen` the only active one
        pub fn show(&self, screen: Screen) {
            for (s, el) in &self.screens {
                let classes = el.class_list();
                if *s == screen {
                    classes.add_1(ACTIVE_CLASS).ok();
                } else {
                    classes.remove_1(ACTIVE_CLASS).ok();
                }
            }
        }

        /// Apply the display side of an event; audio events are ignored here
        pub fn apply(&self, event: &GameEvent) {
            match *event {
                GameEvent::SwitchScreen(screen) => self.show(screen),
                GameEvent::ScoreBoard { score, level } => {
                    set_text(&self.score, &score_text(score));
                    set_text(&self.level, &level_text(level));
                }
                GameEvent::LevelTitle { level } => {
                    set_text(&self.level_title, &level_title_text(level));
                }
                GameEvent::FinalScore { outcome, score } => {
                    let (id, text) = final_score_text(outcome, score);
                    let target = if id == ids::FINAL_SCORE {
                        &self.final_score
                    } else {
                        &self.victory_score
                    };
                    set_text(target, &text);
                }
                GameEvent::Sound(_) | GameEvent::MusicStart | GameEvent::MusicStop => {}
            }
        }
    }

    fn set_text(el: &Option<Element>, text: &str) {
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }
}
