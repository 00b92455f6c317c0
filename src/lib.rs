//! Decoder for the RDP bitmap compression format: the interleaved run-length
//! raster engines used by 15/16/24 BPP bitmaps, and the separate four-plane
//! delta codec used by 32 BPP bitmaps.
//!
//! The public surface is four depth-specialized functions ([`decode_15`],
//! [`decode_16`], [`decode_24`], [`decode_32`]) plus a [`decode`] dispatcher
//! keyed by [`Depth`]. Each reconstructs a native-depth raster from a
//! compressed byte stream and repacks it into canonical RGBA8888.

mod color;
mod cursor;
mod decode;
mod error;
mod mask;
mod opcode;
mod plane;
mod raster;

pub use decode::{decode, decode_15, decode_16, decode_24, decode_32, BitmapDecoder, Depth};
pub use error::{DecodeError, PlaneError, RasterError};
