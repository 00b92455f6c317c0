//! Error types for this crate.
//!
//! Each fallible subsystem gets its own enum with a hand-written `Display`/`Error`
//! impl, following the convention of the reference codebase's own bitmap and
//! bulk-compression codecs. [`DecodeError`] unifies them at the public boundary.

use core::fmt;

/// Errors raised by the depth-1/2/3 scanline raster engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterError {
    /// The input was exhausted while reading a command byte or an operand.
    UnexpectedEof,
    /// A command byte decoded to an opcode this engine does not implement.
    UnknownOpcode { opcode: u8 },
    /// The opcode stream tried to advance past row 0 of the raster.
    RasterOverrun,
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "input exhausted while reading a command or operand"),
            Self::UnknownOpcode { opcode } => write!(f, "unknown raster opcode {opcode:#04x}"),
            Self::RasterOverrun => write!(f, "opcode stream overran the raster (wrote past row 0)"),
        }
    }
}

impl core::error::Error for RasterError {}

/// Errors raised by the 32 BPP plane decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneError {
    /// The leading `0x10` plane-format marker was missing.
    MissingHeader,
    /// The input was exhausted while reading a plane code byte or delta/literal byte.
    UnexpectedEof,
    /// A plane's run lengths would write past the end of a scanline.
    RowOverrun,
    /// The four planes together did not consume exactly `size` input bytes.
    SizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for PlaneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "32 bpp stream is missing the 0x10 plane header"),
            Self::UnexpectedEof => write!(f, "input exhausted while decoding a plane"),
            Self::RowOverrun => write!(f, "plane run length overran a scanline"),
            Self::SizeMismatch { expected, actual } => {
                write!(f, "plane decoder consumed {actual} bytes, expected {expected}")
            }
        }
    }
}

impl core::error::Error for PlaneError {}

/// Unified error returned by the public decode entry points.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("output or input dimensions are invalid (zero width/height, or size overflow)")]
    InvalidDimensions,

    #[error("failed to allocate the scratch native-depth raster")]
    Alloc,

    #[error("raster decode failed: {0}")]
    Raster(#[from] RasterError),

    #[error("plane decode failed: {0}")]
    Plane(#[from] PlaneError),
}
