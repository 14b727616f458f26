//! Audio cues
//!
//! The scene layer queues [`AudioCommand`]s; on wasm32 the [`AudioManager`]
//! turns them into procedurally generated Web Audio sounds - no external
//! files needed.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player jumped
    Jump,
    /// Coin picked up
    CoinCollected,
    /// Rock smashed on the player
    RockSmash,
    /// Level threshold crossed
    LevelUp,
    /// Run ended
    GameOver,
}

/// What the scene wants the audio backend to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play(SoundEffect),
    /// Start the looping background track
    StartMusic,
    /// Silence everything, including music
    StopAll,
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioCommand, SoundEffect};
    use crate::Settings;

    /// Bass line for the background loop (Hz, one note per beat)
    const MUSIC_NOTES: [f32; 8] = [
        110.0, 130.81, 146.83, 130.81, 98.0, 110.0, 123.47, 98.0,
    ];
    const MUSIC_BEAT_SECS: f64 = 0.4;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        music_volume: f32,
        muted: bool,
        music_playing: bool,
        /// Context time the next music note is due
        music_next_note: f64,
        music_step: usize,
        /// Live music voices, stopped by StopAll
        music_voices: Vec<OscillatorNode>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 0.8,
                sfx_volume: 1.0,
                music_volume: 0.7,
                muted: false,
                music_playing: false,
                music_next_note: 0.0,
                music_step: 0,
                music_voices: Vec::new(),
            }
        }

        /// Pull volumes from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
            }
        }

        fn music_level(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.music_volume
            }
        }

        pub fn handle(&mut self, command: AudioCommand) {
            match command {
                AudioCommand::Play(effect) => self.play(effect),
                AudioCommand::StartMusic => {
                    self.music_playing = true;
                    self.music_step = 0;
                    self.music_next_note = self.ctx.as_ref().map_or(0.0, |c| c.current_time());
                }
                AudioCommand::StopAll => {
                    self.music_playing = false;
                    for voice in self.music_voices.drain(..) {
                        voice.stop().ok();
                    }
                }
            }
        }

        /// Keep the music loop scheduled a beat ahead; call once per frame
        pub fn update(&mut self) {
            if !self.music_playing {
                return;
            }
            let Some(ctx) = self.ctx.clone() else { return };
            let now = ctx.current_time();
            // Skip notes missed while the tab was hidden
            if self.music_next_note < now {
                self.music_next_note = now;
            }
            while self.music_next_note < now + MUSIC_BEAT_SECS {
                let freq = MUSIC_NOTES[self.music_step % MUSIC_NOTES.len()];
                let t = self.music_next_note;
                let vol = self.music_level();
                if vol > 0.0
                    && let Some((osc, gain)) = self.create_osc(&ctx, freq, OscillatorType::Triangle)
                {
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + MUSIC_BEAT_SECS * 0.9)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + MUSIC_BEAT_SECS).ok();
                    self.music_voices.push(osc);
                }
                self.music_step += 1;
                self.music_next_note += MUSIC_BEAT_SECS;
            }
            // Voices older than a couple of beats have already stopped
            let keep = 4;
            if self.music_voices.len() > keep {
                let excess = self.music_voices.len() - keep;
                self.music_voices.drain(..excess);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Jump => self.play_jump(ctx, vol * 0.5),
                SoundEffect::CoinCollected => self.play_coin(ctx, vol),
                SoundEffect::RockSmash => self.play_rock_smash(ctx, vol),
                SoundEffect::LevelUp => self.play_level_up(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Jump - quick upward chirp
        fn play_jump(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.frequency().set_value_at_time(220.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(660.0, t + 0.12)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        /// Coin - two-note ding
        fn play_coin(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [988.0, 1319.0].iter().enumerate() {
                let delay = i as f64 * 0.07;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.2, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.25).ok();
                }
            }
        }

        /// Rock smash - crunchy thud
        fn play_rock_smash(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            // Bass impact
            if let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * 0.5, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.frequency().set_value_at_time(90.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(35.0, t + 0.2)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.3).ok();
            }

            // Gravelly crackle
            if let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.frequency().set_value_at_time(120.0, t).ok();
                osc.frequency().set_value_at_time(900.0, t + 0.01).ok();
                osc.frequency().set_value_at_time(150.0, t + 0.03).ok();
                osc.frequency().set_value_at_time(700.0, t + 0.05).ok();
                osc.frequency().set_value_at_time(80.0, t + 0.08).ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.18).ok();
            }
        }

        /// Level up - rising jingle
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [523.0, 659.0, 784.0, 1047.0].iter().enumerate() {
                let delay = i as f64 * 0.09;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.35).ok();
                }
            }
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
                let delay = i as f64 * 0.2;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.3, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.4).ok();
                }
            }
        }
    }
}
