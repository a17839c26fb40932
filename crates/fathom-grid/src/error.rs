//! Error types for grid construction, serialization, and swapping.

use std::fmt;
use std::io;

/// Errors arising from grid shape validation or shape (de)serialization.
#[derive(Debug)]
pub enum GridError {
    /// A spacing component is zero, negative, or not finite.
    InvalidSpacing {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// The offending spacing value.
        value: f64,
    },
    /// An origin component is NaN or infinite.
    NonFiniteOrigin {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// The offending origin value.
        value: f64,
    },
    /// The derived upper corner `origin + spacing * resolution` is not finite.
    NonFiniteExtent {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// The overflowed upper-corner coordinate.
        value: f64,
    },
    /// The product of the per-axis resolutions does not fit in `usize`.
    CellCountOverflow {
        /// Per-axis cell counts; unused axes are 1.
        resolution: [u32; 3],
    },
    /// A decoded tuple has a different number of axes than the grid.
    AxisCountMismatch {
        /// Axes required by the grid dimensionality.
        expected: usize,
        /// Axes found in the stream.
        found: usize,
    },
    /// A decoded resolution component does not fit in `u32`.
    ResolutionOverflow {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// The decoded value.
        value: u64,
    },
    /// The stream is truncated or otherwise undecodable.
    MalformedStream {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// Attempted to swap grids of different concrete types.
    GridTypeMismatch,
    /// A dedicated worker pool could not be built.
    ThreadPool {
        /// Description reported by the pool builder.
        reason: String,
    },
    /// An I/O error occurred while reading or writing a stream.
    Io(io::Error),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacing { axis, value } => {
                write!(f, "grid spacing on axis {axis} must be finite and positive, got {value}")
            }
            Self::NonFiniteOrigin { axis, value } => {
                write!(f, "grid origin on axis {axis} must be finite, got {value}")
            }
            Self::NonFiniteExtent { axis, value } => {
                write!(f, "grid extent on axis {axis} overflows to {value}")
            }
            Self::CellCountOverflow { resolution } => {
                write!(f, "cell count of resolution {resolution:?} overflows usize")
            }
            Self::AxisCountMismatch { expected, found } => {
                write!(f, "expected a {expected}-axis tuple, found {found} axes")
            }
            Self::ResolutionOverflow { axis, value } => {
                write!(f, "resolution {value} on axis {axis} exceeds u32::MAX")
            }
            Self::MalformedStream { detail } => write!(f, "malformed grid stream: {detail}"),
            Self::GridTypeMismatch => write!(f, "cannot swap grids of different concrete types"),
            Self::ThreadPool { reason } => write!(f, "failed to build worker pool: {reason}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GridError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            return Self::MalformedStream {
                detail: format!("truncated stream: {e}"),
            };
        }
        Self::Io(e)
    }
}
