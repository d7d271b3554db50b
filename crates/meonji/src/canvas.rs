//! Braille-canvas drawing surface for the terminal.
//!
//! The engine draws in logical pixels; here one logical pixel is one
//! braille dot, so every terminal cell carries a 2x4 block of them.
//! Ratatui's canvas widget handles the cell transform, the way a DPR
//! scale would on a pixel display.

use meonji_core::Rgb;
use meonji_engine::Surface;
use ratatui::style::Color;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle};
use ratatui::widgets::Widget;

/// Horizontal braille dots per terminal cell.
pub const DOTS_PER_CELL_X: u16 = 2;
/// Vertical braille dots per terminal cell.
pub const DOTS_PER_CELL_Y: u16 = 4;

#[derive(Debug, Clone, Copy)]
struct DrawnCircle {
    x: f32,
    y: f32,
    radius: f32,
    color: Rgb,
    alpha: f32,
}

/// Retained list of circles painted by the last engine tick.
///
/// Kept between frames so a parked (hidden) effect keeps showing its
/// last frame without any new draw calls.
#[derive(Debug, Default)]
pub struct CircleCanvas {
    circles: Vec<DrawnCircle>,
    width: f32,
    height: f32,
}

impl CircleCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match the canvas to the current drawable area, in dots.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Build the ratatui widget painting the retained circles.
    pub fn widget(&self) -> impl Widget + '_ {
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.width as f64])
            .y_bounds([0.0, self.height as f64])
            .paint(|ctx| {
                for circle in &self.circles {
                    if circle.alpha <= 0.0 {
                        continue;
                    }
                    // No alpha channel in a terminal: dim toward the
                    // black background instead.
                    let Rgb(r, g, b) = circle.color.scaled(circle.alpha);
                    ctx.draw(&Circle {
                        x: circle.x as f64,
                        // The canvas y axis points up; the engine's
                        // points down.
                        y: (self.height - circle.y) as f64,
                        radius: circle.radius as f64,
                        color: Color::Rgb(r, g, b),
                    });
                }
            })
    }
}

impl Surface for CircleCanvas {
    fn clear(&mut self) {
        self.circles.clear();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32) {
        self.circles.push(DrawnCircle {
            x,
            y,
            radius,
            color,
            alpha,
        });
    }
}
