//! The 32 BPP plane decoder (§4.5): four independent run-length/delta planes,
//! each reconstructed bottom-up with a previous-row zigzag delta.

use crate::cursor::Cursor;
use crate::error::PlaneError;

/// Decodes a compressed 32 BPP stream into `dst`, a row-major, top-down
/// raster of `width * height` pixels, 4 bytes each (see the channel layout
/// note on [`decode`]).
pub(crate) fn decode(dst: &mut [u8], width: usize, height: usize, input: &[u8]) -> Result<(), PlaneError> {
    debug_assert_eq!(dst.len(), width * height * 4);

    let mut cursor = Cursor::new(input);
    let header = cursor.read_u8().map_err(|_| PlaneError::UnexpectedEof)?;
    if header != 0x10 {
        return Err(PlaneError::MissingHeader);
    }

    // Plane order B, G, R, A (§4.6), landing at byte offsets 3, 2, 1, 0 within
    // each 4-byte pixel: plane index 0 (B) is decoded first, written at +3;
    // the last plane decoded (A) lands at +0.
    for channel_offset in [3usize, 2, 1, 0] {
        decode_plane(&mut cursor, dst, width, height, channel_offset)?;
    }

    if !cursor.is_empty() {
        return Err(PlaneError::SizeMismatch {
            expected: input.len(),
            actual: cursor.position(),
        });
    }

    Ok(())
}

fn decode_plane(
    cursor: &mut Cursor<'_>,
    dst: &mut [u8],
    width: usize,
    height: usize,
    channel_offset: usize,
) -> Result<(), PlaneError> {
    let mut prev_row_base: Option<usize> = None;

    for row_index in (0..height).rev() {
        let row_base = row_index * width * 4 + channel_offset;
        let mut col = 0usize;
        let mut color: u8 = 0;
        let mut delta: i32 = 0;

        while col < width {
            let code = cursor.read_u8().map_err(|_| PlaneError::UnexpectedEof)?;
            let mut repl_len = usize::from(code & 0x0F);
            let mut col_len = usize::from((code >> 4) & 0x0F);
            let revcode = (repl_len << 4) | col_len;
            if (16..=47).contains(&revcode) {
                repl_len = revcode;
                col_len = 0;
            }

            match prev_row_base {
                None => {
                    for _ in 0..col_len {
                        if col >= width {
                            return Err(PlaneError::RowOverrun);
                        }
                        color = cursor.read_u8().map_err(|_| PlaneError::UnexpectedEof)?;
                        dst[row_base + col * 4] = color;
                        col += 1;
                    }
                    for _ in 0..repl_len {
                        if col >= width {
                            return Err(PlaneError::RowOverrun);
                        }
                        dst[row_base + col * 4] = color;
                        col += 1;
                    }
                }
                Some(prev_base) => {
                    for _ in 0..col_len {
                        if col >= width {
                            return Err(PlaneError::RowOverrun);
                        }
                        let raw = cursor.read_u8().map_err(|_| PlaneError::UnexpectedEof)?;
                        delta = if raw & 1 != 0 {
                            -(i32::from(raw >> 1) + 1)
                        } else {
                            i32::from(raw >> 1)
                        };
                        let above = dst[prev_base + col * 4];
                        color = (i32::from(above) + delta) as u8;
                        dst[row_base + col * 4] = color;
                        col += 1;
                    }
                    for _ in 0..repl_len {
                        if col >= width {
                            return Err(PlaneError::RowOverrun);
                        }
                        // Repeat runs reuse the last decoded delta against each
                        // column's own "above" pixel, not a fixed byte value.
                        let above = dst[prev_base + col * 4];
                        color = (i32::from(above) + delta) as u8;
                        dst[row_base + col * 4] = color;
                        col += 1;
                    }
                }
            }
        }

        prev_row_base = Some(row_base);
    }

    Ok(())
}
