//! Crate-level error types.

use std::fmt;

/// Errors produced by the morphtext crate.
///
/// The per-frame path never fails; these surface only from configuration
/// I/O and explicit surface construction.
#[derive(Debug)]
pub enum MorphError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The backing pixmap could not be allocated at the requested size.
    Surface {
        /// Requested physical width in pixels.
        width: u32,
        /// Requested physical height in pixels.
        height: u32,
    },
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Surface { width, height } => {
                write!(f, "cannot allocate {width}x{height} surface")
            }
        }
    }
}

impl std::error::Error for MorphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MorphError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_surface_size() {
        let err = MorphError::Surface {
            width: 0,
            height: 12,
        };
        assert_eq!(err.to_string(), "cannot allocate 0x12 surface");
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error;
        let err = MorphError::from(std::io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("boom"));
    }
}
