//! Minimal arcade-style physics body
//!
//! Euler integration with per-body gravity and optional movement bounds.
//! Contacts against bounds set `blocked` flags for the step, which is what
//! the player reads as "on floor" / "on wall".

use glam::Vec2;

/// Axis-aligned rectangle (top-left origin, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Collision shape, centered on the body position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { half: Vec2 },
    Circle { radius: f32 },
}

impl Shape {
    /// Half extents of the shape's bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Rect { half } => half,
            Shape::Circle { radius } => Vec2::splat(radius),
        }
    }
}

/// Which sides touched the bounds during the last step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blocked {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A physics body
#[derive(Debug, Clone)]
pub struct Body {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: Shape,
    /// Downward acceleration (px/s²)
    pub gravity_y: f32,
    /// Keep the body inside this rectangle
    pub bounds: Option<Rect>,
    pub blocked: Blocked,
}

impl Body {
    pub fn rect(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Rect {
                half: Vec2::new(width / 2.0, height / 2.0),
            },
            gravity_y: 0.0,
            bounds: None,
            blocked: Blocked::default(),
        }
    }

    pub fn circle(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            shape: Shape::Circle { radius },
            gravity_y: 0.0,
            bounds: None,
            blocked: Blocked::default(),
        }
    }

    #[inline]
    pub fn on_floor(&self) -> bool {
        self.blocked.down
    }

    #[inline]
    pub fn on_wall(&self) -> bool {
        self.blocked.left || self.blocked.right
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.vel != Vec2::ZERO
    }

    /// Advance one step
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += self.gravity_y * dt;
        self.pos += self.vel * dt;
        self.blocked = Blocked::default();

        let Some(bounds) = self.bounds else { return };
        let half = self.shape.half_extents();

        if self.pos.x - half.x <= bounds.x {
            self.pos.x = bounds.x + half.x;
            self.vel.x = self.vel.x.max(0.0);
            self.blocked.left = true;
        } else if self.pos.x + half.x >= bounds.right() {
            self.pos.x = bounds.right() - half.x;
            self.vel.x = self.vel.x.min(0.0);
            self.blocked.right = true;
        }

        if self.pos.y - half.y <= bounds.y {
            self.pos.y = bounds.y + half.y;
            self.vel.y = self.vel.y.max(0.0);
            self.blocked.up = true;
        } else if self.pos.y + half.y >= bounds.bottom() {
            self.pos.y = bounds.bottom() - half.y;
            self.vel.y = self.vel.y.min(0.0);
            self.blocked.down = true;
        }
    }

    /// Shape overlap test
    pub fn overlaps(&self, other: &Body) -> bool {
        match (self.shape, other.shape) {
            (Shape::Rect { half: a }, Shape::Rect { half: b }) => {
                let d = (self.pos - other.pos).abs();
                d.x < a.x + b.x && d.y < a.y + b.y
            }
            (Shape::Circle { radius: a }, Shape::Circle { radius: b }) => {
                self.pos.distance_squared(other.pos) < (a + b) * (a + b)
            }
            (Shape::Rect { half }, Shape::Circle { radius }) => {
                rect_circle_overlap(self.pos, half, other.pos, radius)
            }
            (Shape::Circle { radius }, Shape::Rect { half }) => {
                rect_circle_overlap(other.pos, half, self.pos, radius)
            }
        }
    }
}

fn rect_circle_overlap(rect_center: Vec2, half: Vec2, circle_center: Vec2, radius: f32) -> bool {
    let closest = circle_center.clamp(rect_center - half, rect_center + half);
    closest.distance_squared(circle_center) < radius * radius
}
