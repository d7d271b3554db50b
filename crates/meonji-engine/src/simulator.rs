//! Particle pool simulation.

use meonji_core::EngineConfig;
use rand::Rng;

use crate::particle::Particle;
use crate::pointer::Point;
use crate::viewport::Viewport;

/// Opacity gained per tick while a particle fades in.
const ALPHA_STEP: f32 = 0.02;

/// Distance from an edge (logical pixels) over which the fade-out
/// ramps from fully transparent to fully visible.
const EDGE_FADE_RANGE: f32 = 20.0;

/// Linearly remap `value` from `[start1, end1]` to `[start2, end2]`,
/// clamping negative results to zero. The upper bound is deliberately
/// left open: results above the target range mean "well inside".
fn remap(value: f32, start1: f32, end1: f32, start2: f32, end2: f32) -> f32 {
    let remapped = (value - start1) * (end2 - start2) / (end1 - start1) + start2;
    if remapped > 0.0 { remapped } else { 0.0 }
}

/// Round to two decimals, matching the drawn precision of the fade so
/// the `> 1` branch decision is stable across ticks.
fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// Owns the particle pool and advances it one tick at a time.
///
/// The pool is a fixed-length arena mutated in place; recycling writes
/// a freshly sampled particle into the vacated slot, so the pool never
/// grows or shrinks outside a full reinitialization.
#[derive(Debug)]
pub struct Simulator {
    particles: Vec<Particle>,
    config: EngineConfig,
}

impl Simulator {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            particles: Vec::new(),
            config,
        }
    }

    /// Respawn the whole pool for the given viewport. An empty
    /// viewport clears the pool instead, so nothing gets drawn.
    pub fn reinit<R: Rng>(&mut self, rng: &mut R, viewport: &Viewport) {
        self.particles.clear();
        if viewport.is_empty() {
            return;
        }
        let count = self.config.particle_count();
        self.particles.reserve_exact(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(rng, viewport.width, viewport.height, &self.config));
        }
    }

    /// Advance every particle exactly once.
    ///
    /// Per particle: fade the alpha by proximity to the closest edge,
    /// apply constant drift, ease the pointer-follow offset toward its
    /// target, then recycle the slot if the effective position left
    /// the viewport (one radius of slack on every side).
    pub fn step<R: Rng>(&mut self, rng: &mut R, pointer: Point, viewport: &Viewport) {
        let (w, h) = (viewport.width, viewport.height);

        for slot in 0..self.particles.len() {
            let p = &mut self.particles[slot];

            let edges = [
                p.effective_x() - p.size,
                w - p.effective_x() - p.size,
                p.effective_y() - p.size,
                h - p.effective_y() - p.size,
            ];
            let closest_edge = edges.iter().copied().fold(f32::INFINITY, f32::min);
            let edge_factor = round2(remap(closest_edge, 0.0, EDGE_FADE_RANGE, 0.0, 1.0));

            if edge_factor > 1.0 {
                // Well inside the canvas: gradual fade-in.
                p.alpha = (p.alpha + ALPHA_STEP).min(p.target_alpha);
            } else {
                // Near an edge: fade out before the circle clips.
                p.alpha = p.target_alpha * edge_factor;
            }

            p.x += p.dx;
            p.y += p.dy;

            let influence = self.config.staticity / p.magnetism;
            p.translate_x += (pointer.x / influence - p.translate_x) / self.config.ease;
            p.translate_y += (pointer.y / influence - p.translate_y) / self.config.ease;

            let out_of_bounds = p.effective_x() < -p.size
                || p.effective_x() > w + p.size
                || p.effective_y() < -p.size
                || p.effective_y() > h + p.size;
            if out_of_bounds {
                self.particles[slot] = Particle::spawn(rng, w, h, &self.config);
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }
}
