//! Particle simulation engine for the meonji ambient background.
//!
//! This crate drives a pool of small drifting circles: constant linear
//! drift, alpha fading near the canvas edges, a soft pointer-follow
//! offset, and in-place recycling of particles that leave the
//! viewport. Rendering goes through the [`Surface`] trait so the
//! engine stays independent of any particular drawing backend.

mod engine;
mod gate;
mod particle;
mod pointer;
mod render;
mod simulator;
mod surface;
mod viewport;

pub use engine::Engine;
pub use gate::{GateState, Transition, VisibilityGate, VISIBILITY_THRESHOLD};
pub use particle::Particle;
pub use pointer::{CanvasPointer, CanvasRect, Point, PointerHub};
pub use render::draw_particle;
pub use simulator::Simulator;
pub use surface::Surface;
pub use viewport::{ResizeDebouncer, Viewport, RESIZE_SETTLE};
