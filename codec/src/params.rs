use crate::*;

/// Shape and rate of an animation; baked into every generated script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) fps: u32,
}

/// Upper bound on `width * height`.
pub const MAX_CELLS: usize = 1 << 24;

impl Params {
    pub fn new(width: usize, height: usize, fps: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CodecError::InvalidParams(format!(
                "grid must be non-empty, got {}x{}",
                width, height
            )));
        }

        let cells = width.checked_mul(height);
        let hex_chars = width
            .checked_add(7)
            .map(|width| width / 8)
            .and_then(|bytes| bytes.checked_mul(2))
            .and_then(|chars| chars.checked_mul(height));

        match (cells, hex_chars) {
            (Some(cells), Some(_)) if cells <= MAX_CELLS => (),
            _ => {
                return Err(CodecError::InvalidParams(format!(
                    "grid {}x{} exceeds {} cells",
                    width, height, MAX_CELLS
                )))
            }
        }

        if fps == 0 {
            return Err(CodecError::InvalidParams("fps must be non-zero".into()));
        }

        Ok(Self { width, height, fps })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Bytes needed to pack one row, MSB-first.
    pub fn row_bytes(&self) -> usize {
        (self.width + 7) / 8
    }

    /// Hex characters a full frame occupies once serialized.
    pub fn full_frame_chars(&self) -> usize {
        self.height * self.row_bytes() * 2
    }

    /// Whether a frame with `changes` differing cells is cheaper to ship as a
    /// full frame; the cut-off is a tenth of the full frame's hex length.
    pub(crate) fn exceeds_delta_threshold(&self, changes: usize) -> bool {
        changes * 10 > self.full_frame_chars()
    }
}
