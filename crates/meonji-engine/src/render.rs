//! Drawing a particle's current state to a surface.

use meonji_core::Rgb;

use crate::particle::Particle;
use crate::surface::Surface;

/// Paint one particle at its effective position.
pub fn draw_particle(surface: &mut dyn Surface, particle: &Particle, color: Rgb) {
    surface.fill_circle(
        particle.effective_x(),
        particle.effective_y(),
        particle.size,
        color,
        particle.alpha,
    );
}
