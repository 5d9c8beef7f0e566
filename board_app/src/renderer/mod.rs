pub mod draw;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw::BoardRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Green,
    Red,
    Yellow,
}

impl Color {
    pub fn css(self) -> &'static str {
        match self {
            Color::Black => "#000000",
            Color::White => "#FFFFFF",
            Color::Green => "#00FF00",
            Color::Red => "#FF0000",
            Color::Yellow => "#FFFF00",
        }
    }
}

/// Minimal LCD surface. Coordinates are pixels from the top-left corner.
pub trait Display {
    fn set_color(&mut self, color: Color);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn fill_circle(&mut self, x: i32, y: i32, r: i32);
    fn display_text(&mut self, x: i32, y: i32, text: &str);
    fn clear(&mut self);
}
