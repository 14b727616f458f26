//! Sprite animation clips and playback

/// Named animation clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clip {
    HeroWalk,
    HeroIdle,
    HeroUp,
    HeroFall,
    HeroHurt,
    HeroDefeat,
    CoinSpin,
}

/// Frame range and timing for a clip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipDef {
    pub first_frame: u32,
    pub last_frame: u32,
    /// Frames per second
    pub frame_rate: f32,
    pub looping: bool,
}

impl ClipDef {
    pub fn frame_count(&self) -> u32 {
        self.last_frame - self.first_frame + 1
    }

    /// Milliseconds each frame stays on screen
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.frame_rate
    }
}

impl Clip {
    pub const ALL: [Clip; 7] = [
        Clip::HeroWalk,
        Clip::HeroIdle,
        Clip::HeroUp,
        Clip::HeroFall,
        Clip::HeroHurt,
        Clip::HeroDefeat,
        Clip::CoinSpin,
    ];

    pub fn def(self) -> ClipDef {
        let (first_frame, last_frame, frame_rate, looping) = match self {
            Clip::HeroWalk => (8, 13, 10.0, true),
            Clip::HeroIdle => (0, 3, 7.0, true),
            Clip::HeroUp => (77, 78, 8.0, true),
            Clip::HeroFall => (22, 23, 8.0, true),
            Clip::HeroHurt => (59, 61, 5.0, false),
            // 7 frames stretched over 3 seconds
            Clip::HeroDefeat => (62, 68, 7.0 / 3.0, false),
            Clip::CoinSpin => (0, 5, 10.0, true),
        };
        ClipDef {
            first_frame,
            last_frame,
            frame_rate,
            looping,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Clip::HeroWalk => "hero_walk",
            Clip::HeroIdle => "hero_idle",
            Clip::HeroUp => "hero_up",
            Clip::HeroFall => "hero_fall",
            Clip::HeroHurt => "hero_hurt",
            Clip::HeroDefeat => "hero_defeat",
            Clip::CoinSpin => "coins_spin",
        }
    }

    /// Idle-family clips are never restarted by a fresh idle request
    pub fn is_idle(self) -> bool {
        matches!(self, Clip::HeroIdle)
    }
}

/// Playback state for one sprite
#[derive(Debug, Clone, Default)]
pub struct Animator {
    current: Option<Clip>,
    frame: u32,
    elapsed_ms: f32,
    finished: bool,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `clip`. With `ignore_if_playing`, a clip that is already
    /// current keeps its frame position.
    pub fn play(&mut self, clip: Clip, ignore_if_playing: bool) {
        if ignore_if_playing && self.current == Some(clip) {
            return;
        }
        self.current = Some(clip);
        self.frame = 0;
        self.elapsed_ms = 0.0;
        self.finished = false;
    }

    pub fn current(&self) -> Option<Clip> {
        self.current
    }

    pub fn is_playing(&self, clip: Clip) -> bool {
        self.current == Some(clip)
    }

    /// True when a non-looping clip has reached its last frame
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Absolute sheet frame currently shown
    pub fn frame(&self) -> u32 {
        self.current
            .map(|clip| clip.def().first_frame + self.frame)
            .unwrap_or(0)
    }

    pub fn advance(&mut self, dt_ms: f32) {
        let Some(clip) = self.current else { return };
        if self.finished {
            return;
        }
        let def = clip.def();
        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= def.frame_ms() {
            self.elapsed_ms -= def.frame_ms();
            if self.frame + 1 < def.frame_count() {
                self.frame += 1;
            } else if def.looping {
                self.frame = 0;
            } else {
                self.finished = true;
                self.elapsed_ms = 0.0;
                break;
            }
        }
    }
}
