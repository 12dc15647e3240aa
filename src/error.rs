use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or hosting a particle field.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid caller-supplied parameter (bounds, particle attributes, config values).
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// The drawing surface could not be acquired. Fatal: the field never starts.
    #[error("drawing surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// Malformed RON configuration.
    #[error("config error: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::SurfaceUnavailable("window has zero height".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("surface unavailable"));
        assert!(msg.contains("zero height"));
    }

    #[test]
    fn io_errors_convert() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }
}
