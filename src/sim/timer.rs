//! One-shot and repeating timers driven by the simulation clock

/// A millisecond timer with a rate multiplier
#[derive(Debug, Clone, PartialEq)]
pub struct Timer {
    /// Delay between firings (ms)
    pub delay_ms: f32,
    /// Time accumulated toward the next firing (ms, already scaled)
    pub elapsed_ms: f32,
    /// Rate multiplier; 2.0 runs the timer twice as fast
    pub time_scale: f32,
    repeat: bool,
    done: bool,
}

impl Timer {
    /// Fires once after `delay_ms`
    pub fn once(delay_ms: f32) -> Self {
        Self {
            delay_ms,
            elapsed_ms: 0.0,
            time_scale: 1.0,
            repeat: false,
            done: false,
        }
    }

    /// Fires every `delay_ms`
    pub fn repeating(delay_ms: f32) -> Self {
        Self {
            repeat: true,
            ..Self::once(delay_ms)
        }
    }

    /// True once a one-shot timer has fired
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fraction of the current delay elapsed, in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.done {
            1.0
        } else if self.delay_ms <= 0.0 {
            0.0
        } else {
            (self.elapsed_ms / self.delay_ms).clamp(0.0, 1.0)
        }
    }

    /// Advance by `dt_ms` of unscaled time. Returns true if the timer fired.
    ///
    /// Fires at most once per call; a repeating timer carries the remainder
    /// over, capped at one full delay.
    pub fn advance(&mut self, dt_ms: f32) -> bool {
        if self.done {
            return false;
        }
        self.elapsed_ms += dt_ms * self.time_scale;
        if self.elapsed_ms < self.delay_ms {
            return false;
        }
        if self.repeat {
            self.elapsed_ms = (self.elapsed_ms - self.delay_ms).clamp(0.0, self.delay_ms);
        } else {
            self.elapsed_ms = self.delay_ms;
            self.done = true;
        }
        true
    }
}
