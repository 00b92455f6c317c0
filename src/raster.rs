//! Depth-parameterized scanline raster engine (§3, §4.2, §4.4).
//!
//! The three near-identical 1/2/3-bytes-per-pixel engines described by the
//! source are expressed once here, generic over [`NativePixel`], following
//! the `DepthMode` pattern the reference codebase uses for its own
//! interleaved-RLE engine (one zero-sized type per pixel width, monomorphized
//! rather than dispatched dynamically per pixel).

use core::ops::BitXor;

use crate::cursor::Cursor;
use crate::error::RasterError;
use crate::mask::MaskState;
use crate::opcode::{read_command, Command};

/// A native-depth pixel the raster engine can read, write and XOR.
pub(crate) trait NativePixel: Copy + BitXor<Output = Self> {
    const BYTES: usize;
    const ZERO: Self;
    const WHITE: Self;

    fn read_le(bytes: &[u8]) -> Self;
    fn write_le(self, out: &mut [u8]);
}

impl NativePixel for u8 {
    const BYTES: usize = 1;
    const ZERO: Self = 0;
    const WHITE: Self = 0xFF;

    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }

    fn write_le(self, out: &mut [u8]) {
        out[0] = self;
    }
}

impl NativePixel for u16 {
    const BYTES: usize = 2;
    const ZERO: Self = 0;
    const WHITE: Self = 0xFFFF;

    fn read_le(bytes: &[u8]) -> Self {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }
}

/// Three raw bytes, in the order the opcode stream writes them (see §4.6:
/// the 24 BPP wrapper reads this triple back as B, G, R).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Triple(pub [u8; 3]);

impl BitXor for Triple {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Triple([self.0[0] ^ rhs.0[0], self.0[1] ^ rhs.0[1], self.0[2] ^ rhs.0[2]])
    }
}

impl NativePixel for Triple {
    const BYTES: usize = 3;
    const ZERO: Self = Triple([0, 0, 0]);
    const WHITE: Self = Triple([0xFF, 0xFF, 0xFF]);

    fn read_le(bytes: &[u8]) -> Self {
        Triple([bytes[0], bytes[1], bytes[2]])
    }

    fn write_le(self, out: &mut [u8]) {
        out.copy_from_slice(&self.0);
    }
}

/// Final, post-aliasing opcode (§4.1 "Post-classification opcode aliasing").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Fill,
    Mix,
    FillOrMix,
    Colour,
    Copy,
    Bicolour,
    White,
    Black,
}

fn alias(opcode: u8) -> Option<Op> {
    match opcode {
        0 => Some(Op::Fill),
        1 => Some(Op::Mix),
        2 => Some(Op::FillOrMix),
        3 => Some(Op::Colour),
        4 => Some(Op::Copy),
        8 => Some(Op::Bicolour),
        0x0D => Some(Op::White),
        0x0E => Some(Op::Black),
        _ => None,
    }
}

/// Decodes one compressed bitmap into `dst`, a row-major, top-down raster of
/// `width * height` pixels of type `P`.
pub(crate) fn decode<P: NativePixel>(dst: &mut [u8], width: usize, height: usize, input: &[u8]) -> Result<(), RasterError> {
    debug_assert_eq!(dst.len(), width * height * P::BYTES);

    let mut input = Cursor::new(input);

    let mut x = width; // forces a scanline advance on the first pixel
    let mut rows_remaining = height;
    let mut line: Option<usize> = None;
    let mut prev_line: Option<usize> = None;

    let mut last_opcode: Option<u8> = None;
    let mut insert_mix = false;
    let mut bicolour_next_is_1 = true;
    let mut mix = P::WHITE;
    let mut colour1 = P::ZERO;
    let mut colour2 = P::ZERO;
    let mut mask_state = MaskState::default();

    let advance = |x: &mut usize, rows_remaining: &mut usize, line: &mut Option<usize>, prev_line: &mut Option<usize>| -> Result<(), RasterError> {
        if *rows_remaining == 0 {
            return Err(RasterError::RasterOverrun);
        }
        *rows_remaining -= 1;
        *prev_line = *line;
        *line = Some(*rows_remaining);
        *x = 0;
        Ok(())
    };

    let read_above = |x: usize, prev_line: Option<usize>, dst: &[u8]| -> P {
        match prev_line {
            Some(row) => P::read_le(&dst[(row * width + x) * P::BYTES..]),
            None => P::ZERO,
        }
    };

    while !input.is_empty() {
        let code = input.read_u8()?;
        mask_state.fom_mask = 0;

        let Command { opcode: raw_opcode, mut count } = read_command(code, &mut input)?;
        let mut opcode = raw_opcode;

        match opcode {
            6 => {
                mix = P::read_le(input.read_exact(P::BYTES)?);
                opcode = 1;
            }
            7 => {
                mix = P::read_le(input.read_exact(P::BYTES)?);
                opcode = 2;
            }
            9 => {
                mask_state.fom_mask = 0x03;
                opcode = 2;
            }
            0x0A => {
                mask_state.fom_mask = 0x05;
                opcode = 2;
            }
            8 => {
                colour1 = P::read_le(input.read_exact(P::BYTES)?);
                colour2 = P::read_le(input.read_exact(P::BYTES)?);
            }
            3 => {
                colour2 = P::read_le(input.read_exact(P::BYTES)?);
            }
            0 => {
                let at_very_start = x == width && prev_line.is_none();
                if last_opcode == Some(0) && !at_very_start {
                    insert_mix = true;
                }
            }
            _ => {}
        }
        last_opcode = Some(opcode);

        let op = alias(opcode).ok_or(RasterError::UnknownOpcode { opcode })?;
        if op == Op::Bicolour {
            bicolour_next_is_1 = true;
        }

        while count > 0 {
            if x >= width {
                advance(&mut x, &mut rows_remaining, &mut line, &mut prev_line)?;
            }
            let row = line.expect("line is set by the unconditional advance above");

            match op {
                Op::Fill => {
                    if insert_mix {
                        let above = read_above(x, prev_line, dst);
                        let value = if prev_line.is_some() { above ^ mix } else { mix };
                        value.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                        insert_mix = false;
                        count -= 1;
                        x += 1;
                        continue;
                    }
                    let above = read_above(x, prev_line, dst);
                    let value = if prev_line.is_some() { above } else { P::ZERO };
                    value.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::Mix => {
                    let above = read_above(x, prev_line, dst);
                    let value = if prev_line.is_some() { above ^ mix } else { mix };
                    value.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::FillOrMix => {
                    let set = mask_state.next_bit(&mut input)?;
                    let above = read_above(x, prev_line, dst);
                    let value = if set {
                        if prev_line.is_some() { above ^ mix } else { mix }
                    } else if prev_line.is_some() {
                        above
                    } else {
                        P::ZERO
                    };
                    value.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::Colour => {
                    colour2.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::Copy => {
                    let value = P::read_le(input.read_exact(P::BYTES)?);
                    value.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::Bicolour => {
                    let value = if bicolour_next_is_1 {
                        count += 1;
                        colour1
                    } else {
                        colour2
                    };
                    bicolour_next_is_1 = !bicolour_next_is_1;
                    value.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::White => {
                    P::WHITE.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
                Op::Black => {
                    P::ZERO.write_le(&mut dst[(row * width + x) * P::BYTES..][..P::BYTES]);
                }
            }

            count -= 1;
            x += 1;
        }
    }

    Ok(())
}
