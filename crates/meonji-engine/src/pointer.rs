//! Shared pointer-position tracking.
//!
//! The raw pointer position lives in one process-wide hub; every
//! consumer holds a cloned handle, so the `Arc` reference count is the
//! subscription count and the last value is retained centrally. Each
//! consumer then derives its own canvas-relative coordinate, sticky to
//! the last in-bounds value.

use std::sync::{Arc, RwLock};

use crate::viewport::Viewport;

/// A 2D point in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Process-wide latest pointer position (page coordinates).
///
/// Cloning the hub registers interest; dropping the last clone
/// releases the shared state. Mutation happens only from the host's
/// event loop, but the lock keeps the single-writer guarantee intact
/// if a host ever updates from another thread.
#[derive(Debug, Clone, Default)]
pub struct PointerHub {
    inner: Arc<RwLock<Point>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest raw pointer position.
    pub fn update(&self, x: f32, y: f32) {
        if let Ok(mut position) = self.inner.write() {
            *position = Point::new(x, y);
        }
    }

    /// Latest raw pointer position.
    pub fn position(&self) -> Point {
        self.inner.read().map(|p| *p).unwrap_or_default()
    }
}

/// A canvas's bounding rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl CanvasRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect for a canvas that fills its host region starting at the
    /// page origin.
    pub fn from_viewport(viewport: &Viewport) -> Self {
        Self::new(0.0, 0.0, viewport.width, viewport.height)
    }
}

/// Per-consumer pointer view: canvas-relative, center-origin, sticky
/// to the last in-bounds value so particles do not jump when the
/// pointer leaves the canvas.
#[derive(Debug)]
pub struct CanvasPointer {
    hub: PointerHub,
    last_good: Point,
}

impl CanvasPointer {
    pub fn new(hub: PointerHub) -> Self {
        Self {
            hub,
            last_good: Point::default(),
        }
    }

    /// Recompute the center-origin coordinate if the raw position is
    /// inside `rect`; otherwise keep the previous value.
    pub fn resolve(&mut self, rect: &CanvasRect) -> Point {
        let raw = self.hub.position();
        let x = raw.x - rect.left - rect.width / 2.0;
        let y = raw.y - rect.top - rect.height / 2.0;
        let inside = x < rect.width / 2.0
            && x > -rect.width / 2.0
            && y < rect.height / 2.0
            && y > -rect.height / 2.0;
        if inside {
            self.last_good = Point::new(x, y);
        }
        self.last_good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hub_shared_between_clones() {
        let hub = PointerHub::new();
        let consumer = hub.clone();
        hub.update(10.0, 20.0);
        assert_eq!(consumer.position(), Point::new(10.0, 20.0));
    }

    #[test]
    fn test_center_origin_coordinate() {
        let hub = PointerHub::new();
        let mut pointer = CanvasPointer::new(hub.clone());
        let rect = CanvasRect::new(0.0, 0.0, 800.0, 600.0);

        hub.update(400.0, 300.0);
        assert_eq!(pointer.resolve(&rect), Point::new(0.0, 0.0));

        hub.update(500.0, 200.0);
        assert_eq!(pointer.resolve(&rect), Point::new(100.0, -100.0));
    }

    #[test]
    fn test_offset_rect() {
        let hub = PointerHub::new();
        let mut pointer = CanvasPointer::new(hub.clone());
        let rect = CanvasRect::new(100.0, 50.0, 200.0, 200.0);

        hub.update(200.0, 150.0);
        assert_eq!(pointer.resolve(&rect), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_sticky_when_out_of_bounds() {
        let hub = PointerHub::new();
        let mut pointer = CanvasPointer::new(hub.clone());
        let rect = CanvasRect::new(0.0, 0.0, 800.0, 600.0);

        hub.update(410.0, 310.0);
        let good = pointer.resolve(&rect);
        assert_eq!(good, Point::new(10.0, 10.0));

        // Pointer leaves the canvas; the last in-bounds value holds.
        hub.update(5000.0, 5000.0);
        assert_eq!(pointer.resolve(&rect), good);
        hub.update(-50.0, 300.0);
        assert_eq!(pointer.resolve(&rect), good);

        // Re-entering updates again.
        hub.update(300.0, 300.0);
        assert_eq!(pointer.resolve(&rect), Point::new(-100.0, 0.0));
    }
}
