use crate::*;
use std::collections::HashMap;

/// Memoized row expansion, keyed by the packed hex row itself.
///
/// Unbounded: it holds one entry per distinct row ever decoded.
#[derive(Clone, Debug, Default)]
pub struct RowCache {
    rows: HashMap<String, Vec<bool>>,
}

impl RowCache {
    pub fn bits(&mut self, hex: &str, width: usize) -> &[bool] {
        if !self.rows.contains_key(hex) {
            self.rows.insert(hex.to_owned(), bits::unpack_row(hex, width));
        }

        &self.rows[hex]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Overwrites `grid` with a keyframe; rows the frame lacks become dead.
    pub(crate) fn decode_into(&mut self, frame: &FullFrame, grid: &mut PixelGrid) {
        let width = grid.width();

        for y in 0..grid.height() {
            match frame.rows().get(y) {
                Some(hex) => {
                    let bits = self.bits(hex, width);
                    grid.row_mut(y).copy_from_slice(bits);
                }
                None => grid.row_mut(y).fill(false),
            }
        }
    }
}
