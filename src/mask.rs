//! Rotating bitmask used by Fill-Or-Mix opcodes (§4.3).

use crate::cursor::Cursor;
use crate::error::RasterError;

#[derive(Debug, Default)]
pub(crate) struct MaskState {
    mask: u8,
    mixmask: u8,
    /// Non-zero overrides `mask` with a fixed value (3 or 5) for FillOrMix_1/_2.
    /// Cleared at the start of every outer command iteration by the caller.
    pub(crate) fom_mask: u8,
}

impl MaskState {
    /// Rotates the mask, refilling it from `fom_mask` or the input stream when
    /// the rotating pointer wraps, and returns whether the current bit is set.
    pub(crate) fn next_bit(&mut self, input: &mut Cursor<'_>) -> Result<bool, RasterError> {
        self.mixmask = self.mixmask.wrapping_shl(1);
        if self.mixmask == 0 {
            self.mask = if self.fom_mask != 0 { self.fom_mask } else { input.read_u8()? };
            self.mixmask = 1;
        }
        Ok(self.mask & self.mixmask != 0)
    }
}
