//! Crate-level error types.

use std::fmt;

#[cfg(feature = "viewer")]
use crate::gpu::render_context::RenderContextError;
use crate::part::PartId;

/// Errors produced by the partpick crate.
///
/// The selection core itself never fails; these cover loading part data and
/// options, and (with the `viewer` feature) GPU and window setup.
#[derive(Debug)]
pub enum PartPickError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Part record JSON could not be parsed.
    PartsParse(String),
    /// A part record failed validation.
    InvalidPart {
        /// Id as found in the record (may itself be the invalid field).
        id: u32,
        /// Which constraint was violated.
        reason: String,
    },
    /// Two records in one batch share an id.
    DuplicatePart(PartId),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// GPU context initialization failure.
    #[cfg(feature = "viewer")]
    Gpu(RenderContextError),
    /// Viewer event-loop failure.
    #[cfg(feature = "viewer")]
    Viewer(String),
}

impl fmt::Display for PartPickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::PartsParse(msg) => write!(f, "part data parse error: {msg}"),
            Self::InvalidPart { id, reason } => {
                write!(f, "invalid part {id}: {reason}")
            }
            Self::DuplicatePart(id) => write!(f, "duplicate part id {id}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            #[cfg(feature = "viewer")]
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            #[cfg(feature = "viewer")]
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for PartPickError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "viewer")]
            Self::Gpu(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PartPickError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(feature = "viewer")]
impl From<RenderContextError> for PartPickError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}
