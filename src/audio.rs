//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects, no external files needed. The tone
//! definitions are plain data so they can be checked off the browser; only
//! `AudioManager` touches Web Audio.

use crate::settings::Settings;
use crate::sim::SoundCue;

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator with exponential frequency and gain sweeps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub wave: Wave,
    pub start_hz: f32,
    pub end_hz: f32,
    pub start_gain: f32,
    pub end_gain: f32,
    /// Seconds until the oscillator stops
    pub duration: f64,
}

/// Laser zap
pub const SHOOT_TONE: Tone = Tone {
    wave: Wave::Square,
    start_hz: 880.0,
    end_hz: 110.0,
    start_gain: 0.1,
    end_gain: 0.001,
    duration: 0.1,
};

/// Long descending growl
pub const GAME_OVER_TONE: Tone = Tone {
    wave: Wave::Sawtooth,
    start_hz: 150.0,
    end_hz: 40.0,
    start_gain: 0.3,
    end_gain: 0.001,
    duration: 1.0,
};

/// Background drone frequency (deep C2)
pub const MUSIC_HZ: f32 = 65.0;
/// Background drone gain at full volume
pub const MUSIC_GAIN: f32 = 0.15;

impl SoundCue {
    pub fn tone(self) -> Tone {
        match self {
            SoundCue::Shoot => SHOOT_TONE,
            SoundCue::GameOver => GAME_OVER_TONE,
        }
    }
}

/// Volume multiplier for one-shot effects
pub fn sfx_scale(settings: &Settings) -> f32 {
    if settings.muted {
        0.0
    } else {
        settings.master_volume * settings.sfx_volume
    }
}

/// Volume multiplier for the background drone
pub fn music_scale(settings: &Settings) -> f32 {
    if settings.muted {
        0.0
    } else {
        settings.master_volume * settings.music_volume
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

    use super::*;

    impl From<Wave> for OscillatorType {
        fn from(wave: Wave) -> Self {
            match wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
            }
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_volume: f32,
        music_volume: f32,
        /// Running drone, if any
        music: Option<(OscillatorNode, GainNode)>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_volume: sfx_scale(settings),
                music_volume: music_scale(settings),
                music: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                if ctx.state() == AudioContextState::Suspended {
                    ctx.resume().ok();
                }
            }
        }

        /// Play a one-shot cue
        pub fn play(&self, cue: SoundCue) {
            if self.sfx_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume();

            let tone = cue.tone();
            let Some((osc, gain)) = create_osc(ctx, tone.start_hz, tone.wave.into()) else {
                return;
            };
            let t = ctx.current_time();

            osc.frequency().set_value_at_time(tone.start_hz, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(tone.end_hz, t + tone.duration)
                .ok();
            gain.gain()
                .set_value_at_time(tone.start_gain * self.sfx_volume, t)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(tone.end_gain, t + tone.duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + tone.duration).ok();
        }

        /// Start the looping drone, replacing any that is already playing
        pub fn start_music(&mut self) {
            self.stop_music();
            if self.music_volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            self.resume();

            let Some((osc, gain)) = create_osc(ctx, MUSIC_HZ, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();
            osc.frequency().set_value_at_time(MUSIC_HZ, t).ok();
            gain.gain()
                .set_value_at_time(MUSIC_GAIN * self.music_volume, t)
                .ok();
            osc.start().ok();

            self.music = Some((osc, gain));
        }

        /// Stop and disconnect the drone. No-op when silent.
        pub fn stop_music(&mut self) {
            if let Some((osc, gain)) = self.music.take() {
                osc.stop().ok();
                osc.disconnect().ok();
                gain.disconnect().ok();
            }
        }
    }

    /// Create an oscillator routed through a fresh gain node
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}
