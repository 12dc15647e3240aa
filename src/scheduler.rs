use crate::field::ParticleField;
use crate::surface::DrawingSurface;

/// Host facility that runs the next frame before the following repaint.
///
/// A field calls `request_frame` at the end of every `advance`, which keeps
/// the animation alive for as long as the host keeps honoring requests.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Deterministic scheduler that runs requested frames on demand instead of
/// waiting for a display refresh.
#[derive(Debug, Default)]
pub struct FrameStepper {
    pending: bool,
    requested: u64,
}

impl FrameStepper {
    /// A stepper with the first frame already requested.
    pub fn primed() -> Self {
        Self {
            pending: true,
            requested: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Total number of requests received from the field.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Run up to `frames` pending frames, returning how many actually ran.
    pub fn run<S: DrawingSurface>(
        &mut self,
        field: &mut ParticleField,
        surface: &mut S,
        frames: usize,
    ) -> usize {
        let mut ran = 0;
        while ran < frames && self.pending {
            self.pending = false;
            field.advance(surface, self);
            ran += 1;
        }
        ran
    }
}

impl FrameScheduler for FrameStepper {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn unprimed_stepper_runs_nothing() -> crate::Result<()> {
        let mut field = ParticleField::from_particles(Vec::new(), 10.0, 10.0)?;
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut stepper = FrameStepper::default();
        assert_eq!(stepper.run(&mut field, &mut surface, 5), 0);
        assert!(surface.commands().is_empty());
        Ok(())
    }

    #[test]
    fn advance_keeps_loop_alive() -> crate::Result<()> {
        let mut field = ParticleField::from_particles(Vec::new(), 10.0, 10.0)?;
        let mut surface = RecordingSurface::new(10.0, 10.0);
        let mut stepper = FrameStepper::primed();
        assert_eq!(stepper.run(&mut field, &mut surface, 7), 7);
        assert!(stepper.is_pending());
        assert_eq!(stepper.requested(), 7);
        assert_eq!(field.frame(), 7);
        Ok(())
    }
}
