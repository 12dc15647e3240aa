use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Radius range for randomly created particles, in pixels.
pub const RADIUS_RANGE: Range<f64> = 1.0..3.0;
/// Upward speed range for randomly created particles, in pixels per frame.
pub const SPEED_RANGE: Range<f64> = 0.1..0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// The two colors a particle may be drawn with.
pub type Palette = [Color; 2];

pub const DEFAULT_PALETTE: Palette = [
    Color::rgb(0.0, 0.74, 0.83),
    Color::rgb(0.92, 0.92, 0.96),
];

/// A single drifting particle. Identity is its index in the owning field.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
    pub speed: f64,
}

impl Particle {
    /// Create a particle after validating its attributes.
    ///
    /// Errors with `Error::InvalidParam` if any value is non-finite or if
    /// `radius` or `speed` is not positive.
    pub fn new(x: f64, y: f64, radius: f64, color: Color, speed: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(Error::InvalidParam("speed must be finite and > 0".into()));
        }
        Ok(Self {
            x,
            y,
            radius,
            color,
            speed,
        })
    }

    /// Sample a particle uniformly inside a `width` x `height` surface.
    ///
    /// Both bounds must be positive; `ParticleField::create` checks them once for the whole field.
    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64, palette: &Palette) -> Self {
        Self {
            x: rng.gen_range(0.0..width),
            y: rng.gen_range(0.0..height),
            radius: rng.gen_range(RADIUS_RANGE),
            color: palette[rng.gen_range(0..palette.len())],
            speed: rng.gen_range(SPEED_RANGE),
        }
    }

    /// Move up by `speed`, reappearing at the bottom edge once above the top.
    #[inline]
    pub fn drift(&mut self, height: f64) {
        self.y -= self.speed;
        if self.y < 0.0 {
            self.y = height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn new_particle_ok() -> Result<()> {
        let p = Particle::new(4.0, 8.0, 2.0, DEFAULT_PALETTE[0], 0.5)?;
        assert_eq!(p.x, 4.0);
        assert_eq!(p.y, 8.0);
        assert_eq!(p.radius, 2.0);
        assert_eq!(p.speed, 0.5);
        Ok(())
    }

    #[test]
    fn invalid_radius_rejected() {
        let err = Particle::new(0.0, 0.0, 0.0, DEFAULT_PALETTE[0], 0.5).unwrap_err();
        assert!(err.to_string().contains("radius"));
    }

    #[test]
    fn invalid_speed_rejected() {
        let err = Particle::new(0.0, 0.0, 1.0, DEFAULT_PALETTE[0], -1.0).unwrap_err();
        assert!(err.to_string().contains("speed"));
        let err = Particle::new(f64::NAN, 0.0, 1.0, DEFAULT_PALETTE[0], 1.0).unwrap_err();
        assert!(err.to_string().contains("position"));
    }

    #[test]
    fn random_particles_respect_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let p = Particle::random(&mut rng, 640.0, 480.0, &DEFAULT_PALETTE);
            assert!((0.0..640.0).contains(&p.x));
            assert!((0.0..480.0).contains(&p.y));
            assert!(RADIUS_RANGE.contains(&p.radius));
            assert!(SPEED_RANGE.contains(&p.speed));
            assert!(DEFAULT_PALETTE.contains(&p.color));
        }
    }

    #[test]
    fn both_palette_colors_are_used() {
        let mut rng = StdRng::seed_from_u64(3);
        let picks: Vec<Color> = (0..200)
            .map(|_| Particle::random(&mut rng, 10.0, 10.0, &DEFAULT_PALETTE).color)
            .collect();
        assert!(picks.contains(&DEFAULT_PALETTE[0]));
        assert!(picks.contains(&DEFAULT_PALETTE[1]));
    }

    #[test]
    fn drift_wraps_to_bottom_keeping_x() -> Result<()> {
        let mut p = Particle::new(12.0, 0.3, 1.0, DEFAULT_PALETTE[1], 0.5)?;
        p.drift(100.0);
        assert_eq!(p.y, 100.0);
        assert_eq!(p.x, 12.0);
        p.drift(100.0);
        assert_eq!(p.y, 99.5);
        Ok(())
    }

    #[test]
    fn drift_to_exactly_zero_does_not_wrap() -> Result<()> {
        let mut p = Particle::new(0.0, 0.5, 1.0, DEFAULT_PALETTE[0], 0.5)?;
        p.drift(50.0);
        assert_eq!(p.y, 0.0);
        Ok(())
    }
}
