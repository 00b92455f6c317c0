//! Boundary-case coverage for the opcode/raster/plane decoders (§8), driven
//! entirely through the public `decode_*` entry points.

use ironrdp_bitmap_rle::{decode_16, decode_32};
use rstest::rstest;

fn rgb565(r5: u16, g6: u16, b5: u16) -> u16 {
    (r5 << 11) | (g6 << 5) | b5
}

fn le(pixel: u16) -> [u8; 2] {
    pixel.to_le_bytes()
}

#[test]
fn empty_row_advance_on_entry() {
    // x == width at decoder entry forces an immediate scanline advance before
    // the very first pixel; prev_line is null on that first (bottom) row.
    let red = rgb565(0x1F, 0, 0);
    let mut input = vec![0x81]; // Copy (hi=8 -> opcode 4), count = 1.
    input.extend(le(red));
    let mut out = [0u8; 4];
    assert!(decode_16(&mut out, 1, 1, 1, 1, &input));
    assert_eq!(out, [255, 0, 0, 255]);
}

#[test]
fn fill_after_fill_inserts_mix_not_at_stream_start() {
    // Row of 3: first Fill (count=1) establishes last_opcode=Fill without
    // triggering insert_mix (it's the very first command). The second Fill
    // (count=2) immediately follows another Fill, so its first pixel is
    // emitted as `mix` (no previous line) instead of the usual zero fill.
    let input = [0x01, 0x02];
    let mut out = [0u8; 3 * 4];
    assert!(decode_16(&mut out, 3, 1, 3, 1, &input));
    // pixel0: plain Fill, no above -> 0 -> rgb565(0) -> rgba (0,0,0,255).
    assert_eq!(&out[0..4], [0, 0, 0, 255]);
    // pixel1: insert_mix pixel -> mix (all-ones) -> rgb565(0xFFFF) -> white.
    assert_eq!(&out[4..8], [255, 255, 255, 255]);
    // pixel2: remainder of the second Fill's count, no above -> 0.
    assert_eq!(&out[8..12], [0, 0, 0, 255]);
}

#[test]
fn fill_or_mix_count_zero_normalizes_to_extra_plus_one() {
    // hi=4 -> opcode 2 (Fill-Or-Mix); count field 0, offset 32, is_fom -> count = extra + 1 = 1.
    // The one Fill-Or-Mix pixel then reads one mask byte; bit 0 set selects `mix`.
    let input = [0x40, 0x00, 0x01];
    let mut out = [0u8; 4];
    assert!(decode_16(&mut out, 1, 1, 1, 1, &input));
    assert_eq!(out, [255, 255, 255, 255]);
}

#[test]
fn plain_fill_count_zero_normalizes_to_extra_plus_offset() {
    // hi=0 -> opcode 0 (Fill); count field 0, offset 32, non-fom -> count = extra + offset = 3 + 32 = 35.
    // Single-row, no previous line, so every one of the 35 Fill pixels is zero.
    let input = [0x00, 0x03];
    let mut out = [0u8; 35 * 4];
    assert!(decode_16(&mut out, 35, 1, 35, 1, &input));
    assert!(out.chunks_exact(4).all(|pixel| pixel == [0, 0, 0, 255]));
}

#[test]
fn long_form_count_drives_a_mix_run() {
    // hi=0xF, opcode=1 (Mix), count read as two LE bytes = 4. Plain Mix never
    // reads a mix operand from the stream (only SetMix opcodes 6/7 do); the
    // register defaults to all-ones.
    let input = [0xF1, 0x04, 0x00];
    let mut out = [0u8; 2 * 2 * 4];
    assert!(decode_16(&mut out, 2, 2, 2, 2, &input));
    // Bottom row (decoded first) has no previous line -> value is `mix` (all-ones) directly.
    assert_eq!(&out[8..12], [255, 255, 255, 255]);
    // Top row XORs against the all-ones bottom row with the all-ones mix -> zero.
    assert_eq!(&out[0..4], [0, 0, 0, 255]);
}

#[rstest]
#[case::even_count(2, 4)] // count=2 bicolour units -> 4 pixels alternating colour1,colour2.
#[case::odd_count(1, 2)]
fn bicolour_run_pairs_colours(#[case] count_field: u8, #[case] expected_pixels: usize) {
    let colour1 = rgb565(0x1F, 0, 0); // red
    let colour2 = rgb565(0, 0, 0x1F); // blue
    let mut input = vec![0xE0 | count_field]; // hi=0xE -> opcode 8 (Bicolour).
    input.extend(le(colour1));
    input.extend(le(colour2));
    let width = expected_pixels;
    let mut out = vec![0u8; width * 4];
    assert!(decode_16(&mut out, width, 1, width, 1, &input));
    for pixel in 0..expected_pixels {
        let expected = if pixel % 2 == 0 { [255, 0, 0, 255] } else { [0, 0, 255, 255] };
        assert_eq!(&out[pixel * 4..pixel * 4 + 4], expected, "pixel {pixel}");
    }
}

#[rstest]
#[case::fill_or_mix_1(0x09)] // opcode 9 -> mask fixed to 0x03.
#[case::fill_or_mix_2(0x0A)] // opcode 0xA -> mask fixed to 0x05.
fn fixed_fill_or_mix_masks_read_no_extra_bytes(#[case] fom_opcode: u8) {
    // hi=0xF selects the long form; these two opcodes get a fixed count of 8
    // per the count-extraction table and never read a mask byte from the stream.
    let code = 0xF0 | fom_opcode;
    let input = [code];
    let mut out = [0u8; 8 * 4];
    assert!(decode_16(&mut out, 8, 1, 8, 1, &input));
}

#[test]
fn plane_decoder_first_row_then_delta_row() {
    // 1x2 32bpp raster: bottom row (row 1, decoded first) is a literal, the
    // top row (row 0) is a zigzag delta against it.
    let mut input = vec![0x10u8];
    // Plane B (offset+3): first row literal 0x40, second row delta -> zigzag(0x02)=+1 -> 0x41.
    input.extend([0x10, 0x40, 0x10, 0x02]);
    // Plane G (offset+2): literal 0x10, then delta zigzag(0x01)=-1 -> 0x0F.
    input.extend([0x10, 0x10, 0x10, 0x01]);
    // Plane R (offset+1): literal 0x20, then delta zigzag(0x00)=0 -> 0x20.
    input.extend([0x10, 0x20, 0x10, 0x00]);
    // Plane A (offset+0): literal 0xFF, then delta zigzag(0x00)=0 -> 0xFF.
    input.extend([0x10, 0xFF, 0x10, 0x00]);

    let mut out = [0u8; 1 * 2 * 4];
    assert!(decode_32(&mut out, 1, 2, 1, 2, &input));
    // Row 1 (bottom, decoded first): B=0x40,G=0x10,R=0x20,A=0xFF -> RGBA (0x20,0x10,0x40,0xFF).
    assert_eq!(&out[4..8], [0x20, 0x10, 0x40, 0xFF]);
    // Row 0 (top): B=0x41,G=0x0F,R=0x20,A=0xFF -> RGBA (0x20,0x0F,0x41,0xFF).
    assert_eq!(&out[0..4], [0x20, 0x0F, 0x41, 0xFF]);
}

#[test]
fn thirty_two_bpp_requires_header_byte() {
    let mut out = [0u8; 4];
    assert!(!decode_32(&mut out, 1, 1, 1, 1, &[0x00]));
}
