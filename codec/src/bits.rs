//! Row bit-packing shared by the encoder and the playback engine.
//!
//! A row is packed 8 cells per byte, most significant bit first, with the last
//! byte zero-padded; every byte is rendered as two lowercase hex digits.

use std::fmt::Write;

pub fn pack_row(cells: &[bool]) -> String {
    let mut hex = String::with_capacity((cells.len() + 7) / 8 * 2);

    for byte in serialize_bitset(cells) {
        write!(hex, "{:02x}", byte).unwrap();
    }

    hex
}

fn serialize_bitset(cells: &[bool]) -> impl Iterator<Item = u8> + '_ {
    cells.chunks(8).map(|cells| {
        cells.iter().enumerate().fold(
            0u8,
            |byte, (bit_idx, bit)| {
                if *bit {
                    byte | (0x80 >> bit_idx)
                } else {
                    byte
                }
            },
        )
    })
}

/// Expands a packed row back into `width` cells.
///
/// Never fails: characters that aren't hex digits count as zero nibbles and a
/// row that's too short leaves the remaining cells dead.
pub fn unpack_row(hex: &str, width: usize) -> Vec<bool> {
    let mut cells = Vec::with_capacity(width);

    for nibble in hex.chars().map(|ch| ch.to_digit(16).unwrap_or(0)) {
        for bit in (0..4).rev() {
            if cells.len() == width {
                return cells;
            }

            cells.push(nibble & (1 << bit) != 0);
        }
    }

    cells.resize(width, false);
    cells
}

/// Whether `hex` is a well-formed packed row for `width` cells.
pub fn is_packed_row(hex: &str, width: usize) -> bool {
    hex.len() == (width + 7) / 8 * 2
        && hex
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn packs_msb_first() {
        assert_eq!(pack_row(&cells("10000000")), "80");
        assert_eq!(pack_row(&cells("00000001")), "01");
        assert_eq!(pack_row(&cells("1010101111001101")), "abcd");
    }

    #[test]
    fn pads_partial_byte_with_zeros() {
        assert_eq!(pack_row(&cells("111")), "e0");
        assert_eq!(pack_row(&cells("111111111")), "ff80");
    }

    #[test]
    fn unpack_truncates_padding() {
        assert_eq!(unpack_row("ff80", 9), cells("111111111"));
        assert_eq!(unpack_row("e0", 3), cells("111"));
    }

    #[test]
    fn unpack_tolerates_garbage() {
        assert_eq!(unpack_row("zz", 8), cells("00000000"));
        assert_eq!(unpack_row("f", 8), cells("11110000"));
        assert_eq!(unpack_row("", 3), cells("000"));
    }

    #[test]
    fn recognizes_packed_rows() {
        assert!(is_packed_row("ff80", 9));
        assert!(!is_packed_row("ff8", 9));
        assert!(!is_packed_row("FF80", 9));
        assert!(!is_packed_row("fg80", 9));
    }
}
