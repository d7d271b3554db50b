//! Canvas dimensions, device-pixel-ratio handling, and resize
//! debouncing.

use std::time::{Duration, Instant};

/// How long resize signals must stay quiet before the pending resize
/// fires. Coalesces the event burst of a drag-resize into a single
/// pool reinitialization.
pub const RESIZE_SETTLE: Duration = Duration::from_millis(100);

/// Highest device pixel ratio the engine will render at.
const MAX_DPR: f32 = 2.0;

/// Logical canvas size plus the device-pixel-ratio transform.
///
/// All simulation runs in logical pixels; a drawing backend multiplies
/// by [`Viewport::dpr`] to size its backing store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical width in pixels.
    pub width: f32,
    /// Logical height in pixels.
    pub height: f32,
    /// Device pixel ratio, clamped to at most 2.
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width,
            height,
            dpr: dpr.min(MAX_DPR),
        }
    }

    /// Backing-store width in device pixels.
    pub fn device_width(&self) -> f32 {
        self.width * self.dpr
    }

    /// Backing-store height in device pixels.
    pub fn device_height(&self) -> f32 {
        self.height * self.dpr
    }

    /// True when there is no drawable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Pending dimensions for a debounced resize.
#[derive(Debug, Clone, Copy)]
struct PendingResize {
    width: f32,
    height: f32,
    deadline: Instant,
}

/// Coalesces a burst of resize signals into one settled resize.
///
/// Time is passed in explicitly so callers control the clock; nothing
/// here sleeps or schedules.
#[derive(Debug, Default)]
pub struct ResizeDebouncer {
    pending: Option<PendingResize>,
}

impl ResizeDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a resize signal, replacing any pending one and pushing
    /// the deadline out to `now + RESIZE_SETTLE`.
    pub fn signal(&mut self, width: f32, height: f32, now: Instant) {
        self.pending = Some(PendingResize {
            width,
            height,
            deadline: now + RESIZE_SETTLE,
        });
    }

    /// Take the settled resize, if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<(f32, f32)> {
        match self.pending {
            Some(p) if now >= p.deadline => {
                self.pending = None;
                Some((p.width, p.height))
            }
            _ => None,
        }
    }

    /// Discard any pending resize (teardown path).
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deadline of the pending resize, if any. Lets an event loop cap
    /// its poll timeout so the settle fires on time.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_dimensions() {
        let vp = Viewport::new(800.0, 600.0, 1.5);
        assert_eq!(vp.device_width(), 1200.0);
        assert_eq!(vp.device_height(), 900.0);
    }

    #[test]
    fn test_dpr_clamped() {
        let vp = Viewport::new(100.0, 100.0, 3.0);
        assert_eq!(vp.dpr, 2.0);
    }

    #[test]
    fn test_empty_viewport() {
        assert!(Viewport::new(0.0, 100.0, 1.0).is_empty());
        assert!(Viewport::new(100.0, 0.0, 1.0).is_empty());
        assert!(!Viewport::new(1.0, 1.0, 1.0).is_empty());
    }

    #[test]
    fn test_debounce_coalesces_burst() {
        let mut debouncer = ResizeDebouncer::new();
        let start = Instant::now();

        // Ten signals within 50ms collapse into one settled resize.
        for i in 0..10 {
            let t = start + Duration::from_millis(i * 5);
            debouncer.signal(100.0 + i as f32, 200.0, t);
            assert_eq!(debouncer.poll(t), None);
        }

        let last = start + Duration::from_millis(45);
        // Still quiet just before the settle window closes.
        assert_eq!(debouncer.poll(last + Duration::from_millis(99)), None);
        // Fires once the window has passed, with the last dimensions.
        assert_eq!(
            debouncer.poll(last + RESIZE_SETTLE),
            Some((109.0, 200.0))
        );
        // And only once.
        assert_eq!(debouncer.poll(last + Duration::from_secs(10)), None);
    }

    #[test]
    fn test_cancel_discards_pending() {
        let mut debouncer = ResizeDebouncer::new();
        let now = Instant::now();
        debouncer.signal(50.0, 50.0, now);
        assert!(debouncer.deadline().is_some());
        debouncer.cancel();
        assert!(debouncer.deadline().is_none());
        assert_eq!(debouncer.poll(now + Duration::from_secs(1)), None);
    }
}
