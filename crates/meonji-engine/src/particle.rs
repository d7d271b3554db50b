//! Particle state and spawn sampling.

use meonji_core::EngineConfig;
use rand::Rng;

/// State of a single particle in the pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current logical position (canvas pixels).
    pub x: f32,
    pub y: f32,
    /// Spawn position. Retained for inspection, unused by physics.
    pub initial_x: f32,
    pub initial_y: f32,
    /// Pointer-magnetism offset, eased toward a pointer-derived
    /// target each tick.
    pub translate_x: f32,
    pub translate_y: f32,
    /// Radius.
    pub size: f32,
    /// Current drawn opacity, always in `[0, target_alpha]`.
    pub alpha: f32,
    /// Opacity ceiling sampled at spawn.
    pub target_alpha: f32,
    /// Constant per-tick drift velocity.
    pub dx: f32,
    pub dy: f32,
    /// Resistance coefficient shaping how strongly this particle is
    /// pulled by the pointer relative to others.
    pub magnetism: f32,
}

impl Particle {
    /// Sample a fresh particle for a canvas of the given logical size.
    ///
    /// Positions land on whole pixels in `[0, width) x [0, height)`;
    /// the opacity ceiling is sampled from `[0.1, 0.7]` and rounded to
    /// one decimal so the fade-in settles on a stable value.
    pub fn spawn<R: Rng>(rng: &mut R, width: f32, height: f32, config: &EngineConfig) -> Self {
        let x = rng.gen_range(0.0..width).floor();
        let y = rng.gen_range(0.0..height).floor();
        // Reorder malformed configured ranges instead of panicking.
        let size_min = config.size[0].min(config.size[1]);
        let size_max = config.size[0].max(config.size[1]);
        let size = rng.gen_range(size_min..=size_max);
        let target_alpha = (rng.gen_range(0.1..=0.7f32) * 10.0).round() / 10.0;
        let half_speed = config.speed.abs() / 2.0;
        let dx = rng.gen_range(-half_speed..=half_speed);
        let dy = rng.gen_range(-half_speed..=half_speed);
        let magnetism = rng.gen_range(0.1..=4.1);

        Self {
            x,
            y,
            initial_x: x,
            initial_y: y,
            translate_x: 0.0,
            translate_y: 0.0,
            size,
            alpha: 0.0,
            target_alpha,
            dx,
            dy,
            magnetism,
        }
    }

    /// Position including the pointer-follow offset.
    pub fn effective_x(&self) -> f32 {
        self.x + self.translate_x
    }

    /// Position including the pointer-follow offset.
    pub fn effective_y(&self) -> f32 {
        self.y + self.translate_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let config = EngineConfig::default();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0, &config);
            assert!(p.x >= 0.0 && p.x < 800.0);
            assert!(p.y >= 0.0 && p.y < 600.0);
            assert_eq!(p.x, p.x.floor());
            assert_eq!(p.y, p.y.floor());
            assert_eq!(p.initial_x, p.x);
            assert_eq!(p.initial_y, p.y);
        }
    }

    #[test]
    fn test_spawn_sampled_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = EngineConfig::default();
        for _ in 0..200 {
            let p = Particle::spawn(&mut rng, 800.0, 600.0, &config);
            assert!(p.size >= config.size[0] && p.size <= config.size[1]);
            assert!(p.target_alpha >= 0.1 && p.target_alpha <= 0.7);
            // Rounded to one decimal.
            assert!((p.target_alpha * 10.0 - (p.target_alpha * 10.0).round()).abs() < 1e-4);
            assert!(p.dx >= -config.speed / 2.0 && p.dx <= config.speed / 2.0);
            assert!(p.dy >= -config.speed / 2.0 && p.dy <= config.speed / 2.0);
            assert!(p.magnetism >= 0.1 && p.magnetism <= 4.1);
        }
    }

    #[test]
    fn test_spawn_starts_invisible_and_unoffset() {
        let mut rng = StdRng::seed_from_u64(1);
        let config = EngineConfig::default();
        let p = Particle::spawn(&mut rng, 100.0, 100.0, &config);
        assert_eq!(p.alpha, 0.0);
        assert_eq!(p.translate_x, 0.0);
        assert_eq!(p.translate_y, 0.0);
    }
}
