//! HTML canvas standing in for the LCD

use super::{Color, Display};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasDisplay {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasDisplay {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Context is not a CanvasRenderingContext2d"))?;
        ctx.set_font("16px monospace");
        ctx.set_text_baseline("top");
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }
}

impl Display for CanvasDisplay {
    #[allow(deprecated)]
    fn set_color(&mut self, color: Color) {
        let css = JsValue::from_str(color.css());
        self.ctx.set_fill_style(&css);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_circle(&mut self, x: i32, y: i32, r: i32) {
        self.ctx.begin_path();
        // Arc only fails for a negative radius
        let _ = self.ctx.arc(x as f64, y as f64, r.max(0) as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn display_text(&mut self, x: i32, y: i32, text: &str) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    #[allow(deprecated)]
    fn clear(&mut self) {
        self.ctx.set_fill_style(&JsValue::from_str(Color::Black.css()));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }
}
