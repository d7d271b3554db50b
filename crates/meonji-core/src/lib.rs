//! Shared types for the meonji ambient particle effect.
//!
//! This crate holds the configuration and color types used by both the
//! particle engine and the terminal host, so neither has to depend on
//! the other for plain data.

use serde::{Deserialize, Serialize};

/// Hard upper bound on the particle pool size, regardless of the
/// configured quantity.
pub const MAX_QUANTITY: usize = 500;

/// An RGB color triple.
///
/// Serialized as a plain `[r, g, b]` array in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Scale all channels by an opacity factor in `[0, 1]`.
    ///
    /// Terminals have no alpha channel, so drawn opacity is
    /// approximated by dimming toward the (black) background.
    pub fn scaled(self, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        Rgb(
            (self.0 as f32 * a) as u8,
            (self.1 as f32 * a) as u8,
            (self.2 as f32 * a) as u8,
        )
    }
}

/// Color theme for the particle fill, cycled at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorTheme {
    #[default]
    White,
    Cyan,
    Green,
    Magenta,
    Amber,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::White => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Amber,
            ColorTheme::Amber => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
        }
    }

    /// Fill color for this theme.
    pub fn rgb(self) -> Rgb {
        match self {
            ColorTheme::White => Rgb(255, 255, 255),
            ColorTheme::Cyan => Rgb(80, 220, 230),
            ColorTheme::Green => Rgb(120, 230, 140),
            ColorTheme::Magenta => Rgb(220, 120, 220),
            ColorTheme::Amber => Rgb(240, 190, 80),
            ColorTheme::Red => Rgb(235, 100, 100),
            ColorTheme::Blue => Rgb(100, 140, 245),
        }
    }
}

/// Tuning parameters for the particle engine.
///
/// All fields have defaults, so a configuration file only needs to
/// name the values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Requested particle count, capped at [`MAX_QUANTITY`].
    pub quantity: usize,
    /// Baseline pointer-attraction divisor. Larger values keep the
    /// particles more static under pointer movement.
    pub staticity: f32,
    /// Smoothing divisor for the pointer-follow offset. Larger values
    /// make the follow slower and softer.
    pub ease: f32,
    /// Particle fill color.
    pub color: Rgb,
    /// Radius range `[min, max]` sampled per particle at spawn.
    pub size: [f32; 2],
    /// Maximum drift magnitude; per-axis velocity is sampled from
    /// `[-speed/2, speed/2]`.
    pub speed: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quantity: 30,
            staticity: 50.0,
            ease: 50.0,
            color: Rgb::WHITE,
            size: [0.1, 2.0],
            speed: 0.2,
        }
    }
}

impl EngineConfig {
    /// Effective pool size: the configured quantity, capped.
    pub fn particle_count(&self) -> usize {
        self.quantity.min(MAX_QUANTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.quantity, 30);
        assert_eq!(config.staticity, 50.0);
        assert_eq!(config.ease, 50.0);
        assert_eq!(config.color, Rgb::WHITE);
        assert_eq!(config.size, [0.1, 2.0]);
        assert_eq!(config.speed, 0.2);
    }

    #[test]
    fn test_particle_count_cap() {
        let config = EngineConfig {
            quantity: 1000,
            ..Default::default()
        };
        assert_eq!(config.particle_count(), MAX_QUANTITY);

        let config = EngineConfig {
            quantity: 30,
            ..Default::default()
        };
        assert_eq!(config.particle_count(), 30);
    }

    #[test]
    fn test_rgb_scaled() {
        assert_eq!(Rgb(200, 100, 50).scaled(0.5), Rgb(100, 50, 25));
        assert_eq!(Rgb(200, 100, 50).scaled(0.0), Rgb(0, 0, 0));
        // Out-of-range factors are clamped.
        assert_eq!(Rgb(200, 100, 50).scaled(2.0), Rgb(200, 100, 50));
        assert_eq!(Rgb(200, 100, 50).scaled(-1.0), Rgb(0, 0, 0));
    }

    #[test]
    fn test_theme_cycle_returns_to_start() {
        let start = ColorTheme::White;
        let mut theme = start;
        for _ in 0..7 {
            theme = theme.next();
        }
        assert_eq!(theme, start);
    }
}
