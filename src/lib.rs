//! A decorative star field: a fixed set of particles drifting up a drawing
//! surface, redrawn once per frame by whatever host drives it.

pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod particle;
pub mod scheduler;
pub mod surface;

pub use config::FieldConfig;
pub use debounce::Debounce;
pub use error::{Error, Result};
pub use field::ParticleField;
pub use particle::{Color, Palette, Particle, DEFAULT_PALETTE};
pub use scheduler::{FrameScheduler, FrameStepper};
pub use surface::{DrawCommand, DrawingSurface, RecordingSurface};
