//! Command-byte extraction, shared across the depth-1/2/3 raster engines.
//!
//! This is the depth-independent half of the opcode decoder (§4.1): turning a
//! single command byte into a raw `(opcode, count)` pair. Operand bytes whose
//! width depends on the native pixel size (`mix`, `colour1`, `colour2`) are
//! read later, in `raster::alias`, once the pixel type is known.

use crate::cursor::Cursor;
use crate::error::RasterError;

/// A raw, pre-aliasing opcode/count pair, as extracted from a single command byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Command {
    pub(crate) opcode: u8,
    pub(crate) count: usize,
}

/// Extracts `(opcode, count)` from `code`, reading any count-extension bytes
/// this stage of the format requires.
pub(crate) fn read_command(code: u8, input: &mut Cursor<'_>) -> Result<Command, RasterError> {
    let hi = code >> 4;

    let (mut opcode, mut count, offset): (u8, usize, u8) = if hi <= 0x0B {
        (hi >> 1, usize::from(code & 0x1F), 32)
    } else if matches!(hi, 0x0C..=0x0E) {
        (hi - 6, usize::from(code & 0x0F), 16)
    } else {
        let opcode = code & 0x0F;
        let count = if opcode < 9 {
            let lo = usize::from(input.read_u8()?);
            let hi = usize::from(input.read_u8()?);
            lo | (hi << 8)
        } else if opcode < 0x0B {
            8
        } else {
            1
        };
        (opcode, count, 0)
    };

    if offset != 0 {
        let is_fill_or_mix = opcode == 2 || opcode == 7;
        if count == 0 {
            let extra = usize::from(input.read_u8()?);
            count = if is_fill_or_mix { extra + 1 } else { extra + usize::from(offset) };
        } else if is_fill_or_mix {
            count <<= 3;
        }
    }

    Ok(Command { opcode, count })
}
