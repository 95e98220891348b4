//! Small math helpers shared by the camera and scripted pans.

use glam::Vec2;

/// Axis-aligned rectangle in world space.
///
/// World Y grows upward, so `y` is the *top* edge and the rectangle spans
/// `y - height ..= y` vertically.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl WorldRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y + height / 2.0,
            width,
            height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y - self.height / 2.0)
    }

    /// Bottom-left corner (smallest x and y)
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y - self.height)
    }

    /// Top-right corner (largest x and y)
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Grow the rectangle by `margin` on every side.
    pub fn inflate(&self, margin: f32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y + margin,
            width: self.width + margin * 2.0,
            height: self.height + margin * 2.0,
        }
    }

    /// Move the rectangle by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }
}

/// Named anchor inside a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Alignment {
    /// Relative position inside a box: x 0 = left, 1 = right; y 0 = bottom, 1 = top.
    pub fn fraction(self) -> Vec2 {
        match self {
            Alignment::TopLeft => Vec2::new(0.0, 1.0),
            Alignment::TopCenter => Vec2::new(0.5, 1.0),
            Alignment::TopRight => Vec2::new(1.0, 1.0),
            Alignment::CenterLeft => Vec2::new(0.0, 0.5),
            Alignment::Center => Vec2::new(0.5, 0.5),
            Alignment::CenterRight => Vec2::new(1.0, 0.5),
            Alignment::BottomLeft => Vec2::new(0.0, 0.0),
            Alignment::BottomCenter => Vec2::new(0.5, 0.0),
            Alignment::BottomRight => Vec2::new(1.0, 0.0),
        }
    }
}

impl From<Alignment> for Vec2 {
    fn from(alignment: Alignment) -> Self {
        alignment.fraction()
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in/ease-out between `a` and `b`. `t` is clamped to [0, 1].
pub fn smoothstep(a: f32, b: f32, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    lerp(a, b, t * t * (3.0 - 2.0 * t))
}

pub fn smoothstep_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    Vec2::new(smoothstep(a.x, b.x, t), smoothstep(a.y, b.y, t))
}

/// Clamp that tolerates an inverted range by collapsing it to `max`.
pub fn clamp_range(value: f32, (min, max): (f32, f32)) -> f32 {
    value.max(min).min(max)
}
