use crate::error::{Error, Result};
use crate::particle::{Palette, Particle};
use crate::scheduler::FrameScheduler;
use crate::surface::DrawingSurface;
use rand::Rng;
use tracing::{debug, warn};

fn check_bounds(width: f64, height: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 || !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidParam(format!(
            "surface bounds must be finite and > 0, got {width}x{height}"
        )));
    }
    Ok(())
}

/// A fixed population of particles drifting upward across a drawing surface.
///
/// The particle count never changes after construction. Each `advance` clears
/// the whole surface, draws every particle, drifts them, and asks the
/// scheduler for the next frame.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    frame: u64,
}

impl ParticleField {
    /// Create `count` randomly placed particles inside a `width` x `height` surface.
    pub fn create<R: Rng + ?Sized>(
        count: usize,
        width: f64,
        height: f64,
        palette: &Palette,
        rng: &mut R,
    ) -> Result<Self> {
        check_bounds(width, height)?;
        let particles = (0..count)
            .map(|_| Particle::random(rng, width, height, palette))
            .collect();
        debug!(count, width, height, "created particle field");
        Ok(Self {
            particles,
            width,
            height,
            frame: 0,
        })
    }

    /// Like [`create`](Self::create), taking the bounds from `surface`.
    ///
    /// A surface without a usable area cannot host the field.
    pub fn for_surface<S: DrawingSurface + ?Sized, R: Rng + ?Sized>(
        count: usize,
        surface: &S,
        palette: &Palette,
        rng: &mut R,
    ) -> Result<Self> {
        let (width, height) = (surface.width(), surface.height());
        if check_bounds(width, height).is_err() {
            return Err(Error::SurfaceUnavailable(format!(
                "surface reports unusable size {width}x{height}"
            )));
        }
        Self::create(count, width, height, palette, rng)
    }

    /// Build a field from already constructed particles.
    ///
    /// Every particle must lie on the surface: `0 <= x < width`, `0 <= y <= height`.
    pub fn from_particles(particles: Vec<Particle>, width: f64, height: f64) -> Result<Self> {
        check_bounds(width, height)?;
        if let Some((i, p)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..width).contains(&p.x) || !(0.0..=height).contains(&p.y))
        {
            return Err(Error::InvalidParam(format!(
                "particle {i} at ({}, {}) lies outside the {width}x{height} surface",
                p.x, p.y
            )));
        }
        Ok(Self {
            particles,
            width,
            height,
            frame: 0,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Number of completed `advance` calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Store new surface bounds. Particle positions are left as they are.
    ///
    /// Zero-sized bounds are accepted; negative or non-finite ones are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            warn!(width, height, "ignoring invalid resize");
            return;
        }
        if width != self.width || height != self.height {
            debug!(width, height, "particle field resized");
        }
        self.width = width;
        self.height = height;
    }

    /// Clear the whole surface and paint every particle at its current position.
    pub fn draw<S: DrawingSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        for p in &self.particles {
            surface.set_fill_color(p.color);
            surface.fill_circle(p.x, p.y, p.radius);
        }
    }

    /// Move every particle one frame upward, wrapping against the current height.
    pub fn drift(&mut self) {
        let height = self.height;
        for p in &mut self.particles {
            p.drift(height);
        }
    }

    /// Run one animation frame and schedule the next one.
    pub fn advance<S, F>(&mut self, surface: &mut S, scheduler: &mut F)
    where
        S: DrawingSurface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        self.draw(surface);
        self.drift();
        self.frame += 1;
        scheduler.request_frame();
    }
}
