//! Per-tick input and key edge tracking

/// Held control state for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key held
    pub jump: bool,
    /// Left key held
    pub left: bool,
    /// Right key held
    pub right: bool,
}

impl TickInput {
    /// -1 left, 0 neither/both, 1 right
    #[inline]
    pub fn direction(&self) -> i32 {
        self.right as i32 - self.left as i32
    }
}

/// Rising/falling edge detection for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyEdge {
    /// Went down this tick
    pub pressed: bool,
    /// Went up this tick
    pub released: bool,
    previous_down: bool,
}

impl KeyEdge {
    pub fn update(&mut self, down: bool) {
        self.pressed = !self.previous_down && down;
        self.released = self.previous_down && !down;
        self.previous_down = down;
    }

    pub fn is_down(&self) -> bool {
        self.previous_down
    }
}
