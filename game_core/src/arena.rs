use glam::Vec2;

/// Rectangular play bounds in LCD pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arena {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl Arena {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Ball spawn point
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            ((self.min_x + self.max_x) / 2) as f32,
            ((self.min_y + self.max_y) / 2) as f32,
        )
    }

    /// Clamp the left edge of something `span` pixels wide so it stays inside
    pub fn clamp_x(&self, x: i32, span: i32) -> i32 {
        x.min(self.max_x - span).max(self.min_x)
    }
}

impl Default for Arena {
    fn default() -> Self {
        use crate::Params;
        Self::new(
            Params::ARENA_MIN_X,
            Params::ARENA_MIN_Y,
            Params::ARENA_MAX_X,
            Params::ARENA_MAX_Y,
        )
    }
}
