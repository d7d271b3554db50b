//! Drawing surface abstraction.

use meonji_core::Rgb;

/// A canvas the engine can draw on.
///
/// Coordinates are logical pixels; an implementation backed by a
/// higher-density store scales by the viewport's device pixel ratio
/// itself, so drawing code never deals in device pixels.
pub trait Surface {
    /// Erase the whole drawable area.
    fn clear(&mut self);

    /// Fill a circle at the given center with the given opacity.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32);
}
