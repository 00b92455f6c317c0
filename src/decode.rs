//! Public entry points: the four depth-specialized decode operations (§6),
//! plus a `Depth`-dispatching convenience wrapper around them.

use tracing::{instrument, warn};

use crate::color;
use crate::error::DecodeError;
use crate::raster::{self, Triple};

/// Pixel depth of a compressed bitmap stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    Fifteen,
    Sixteen,
    TwentyFour,
    ThirtyTwo,
}

fn checked_len(width: usize, height: usize, bytes_per_pixel: usize) -> Result<usize, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(bytes_per_pixel))
        .ok_or(DecodeError::InvalidDimensions)
}

fn alloc_scratch(len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).map_err(|_| DecodeError::Alloc)?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Copies the overlapping `min(output_*, input_*)` region from a native-depth
/// scratch raster into `output_rgba`, converting each pixel with `convert`.
fn blit<const N: usize>(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    native: &[u8],
    input_width: usize,
    input_height: usize,
    convert: impl Fn(&[u8]) -> [u8; 4],
) {
    let copy_width = output_width.min(input_width);
    let copy_height = output_height.min(input_height);

    for row in 0..copy_height {
        let native_row = &native[row * input_width * N..];
        let out_row = &mut output_rgba[row * output_width * 4..];
        for col in 0..copy_width {
            let pixel = &native_row[col * N..(col + 1) * N];
            let rgba = convert(pixel);
            out_row[col * 4..col * 4 + 4].copy_from_slice(&rgba);
        }
    }
}

/// Decodes a 15 BPP (RGB555) compressed bitmap into RGBA8888.
#[instrument(skip(output_rgba, input), fields(depth = "15"))]
pub fn decode_15(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> bool {
    try_decode_15(output_rgba, output_width, output_height, input_width, input_height, input)
        .inspect_err(|err| warn!(%err, "15 bpp decode failed"))
        .is_ok()
}

fn try_decode_15(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> Result<(), DecodeError> {
    let len = checked_len(input_width, input_height, 2)?;
    let mut scratch = alloc_scratch(len)?;
    raster::decode::<u16>(&mut scratch, input_width, input_height, input)?;

    blit::<2>(output_rgba, output_width, output_height, &scratch, input_width, input_height, |pixel| {
        color::rgb555_to_rgba(u16::from_le_bytes([pixel[0], pixel[1]]))
    });
    Ok(())
}

/// Decodes a 16 BPP (RGB565) compressed bitmap into RGBA8888.
#[instrument(skip(output_rgba, input), fields(depth = "16"))]
pub fn decode_16(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> bool {
    try_decode_16(output_rgba, output_width, output_height, input_width, input_height, input)
        .inspect_err(|err| warn!(%err, "16 bpp decode failed"))
        .is_ok()
}

fn try_decode_16(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> Result<(), DecodeError> {
    let len = checked_len(input_width, input_height, 2)?;
    let mut scratch = alloc_scratch(len)?;
    raster::decode::<u16>(&mut scratch, input_width, input_height, input)?;

    blit::<2>(output_rgba, output_width, output_height, &scratch, input_width, input_height, |pixel| {
        color::rgb565_to_rgba(u16::from_le_bytes([pixel[0], pixel[1]]))
    });
    Ok(())
}

/// Decodes a 24 BPP compressed bitmap into RGBA8888.
#[instrument(skip(output_rgba, input), fields(depth = "24"))]
pub fn decode_24(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> bool {
    try_decode_24(output_rgba, output_width, output_height, input_width, input_height, input)
        .inspect_err(|err| warn!(%err, "24 bpp decode failed"))
        .is_ok()
}

fn try_decode_24(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> Result<(), DecodeError> {
    let len = checked_len(input_width, input_height, 3)?;
    let mut scratch = alloc_scratch(len)?;
    raster::decode::<Triple>(&mut scratch, input_width, input_height, input)?;

    blit::<3>(output_rgba, output_width, output_height, &scratch, input_width, input_height, |pixel| {
        color::bgr_to_rgba([pixel[0], pixel[1], pixel[2]])
    });
    Ok(())
}

/// Decodes a 32 BPP compressed bitmap into RGBA8888.
#[instrument(skip(output_rgba, input), fields(depth = "32"))]
pub fn decode_32(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> bool {
    try_decode_32(output_rgba, output_width, output_height, input_width, input_height, input)
        .inspect_err(|err| warn!(%err, "32 bpp decode failed"))
        .is_ok()
}

fn try_decode_32(
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> Result<(), DecodeError> {
    let len = checked_len(input_width, input_height, 4)?;
    let mut scratch = alloc_scratch(len)?;
    crate::plane::decode(&mut scratch, input_width, input_height, input)?;

    blit::<4>(output_rgba, output_width, output_height, &scratch, input_width, input_height, |pixel| {
        color::plane_quad_to_rgba([pixel[0], pixel[1], pixel[2], pixel[3]])
    });
    Ok(())
}

/// Dispatches to the matching `decode_<DEPTH>` operation at runtime.
///
/// Purely a convenience wrapper; it adds no semantics beyond picking the
/// right one of the four depth-specialized operations above.
pub fn decode(
    depth: Depth,
    output_rgba: &mut [u8],
    output_width: usize,
    output_height: usize,
    input_width: usize,
    input_height: usize,
    input: &[u8],
) -> bool {
    match depth {
        Depth::Fifteen => decode_15(output_rgba, output_width, output_height, input_width, input_height, input),
        Depth::Sixteen => decode_16(output_rgba, output_width, output_height, input_width, input_height, input),
        Depth::TwentyFour => decode_24(output_rgba, output_width, output_height, input_width, input_height, input),
        Depth::ThirtyTwo => decode_32(output_rgba, output_width, output_height, input_width, input_height, input),
    }
}

/// A small, stateless entry point bundling the four depth-specialized
/// operations and the runtime dispatcher. The format defines no
/// encoder-tunable knobs, so this carries no fields beyond the depth itself;
/// dimension validation happens per call, not at construction.
#[derive(Debug, Clone, Copy)]
pub struct BitmapDecoder {
    depth: Depth,
}

impl BitmapDecoder {
    pub fn new(depth: Depth) -> Self {
        Self { depth }
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    /// Decodes `input` at this decoder's depth into `output_rgba`.
    pub fn decode(
        &self,
        output_rgba: &mut [u8],
        output_width: usize,
        output_height: usize,
        input_width: usize,
        input_height: usize,
        input: &[u8],
    ) -> bool {
        decode(self.depth, output_rgba, output_width, output_height, input_width, input_height, input)
    }
}
