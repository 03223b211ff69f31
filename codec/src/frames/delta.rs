use crate::*;

/// A single changed cell; 0-based in memory, 1-based once serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Change {
    pub x: usize,
    pub y: usize,
    pub alive: bool,
}

/// Cells that differ from the previously reconstructed frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeltaFrame {
    changes: Vec<Change>,
}

impl DeltaFrame {
    pub fn new(changes: Vec<Change>) -> Self {
        Self { changes }
    }

    /// Lists the cells of `curr` that differ from `prev`, row-major.
    pub fn diff(prev: &PixelGrid, curr: &PixelGrid) -> Self {
        let changes = prev
            .cells()
            .zip(curr.cells())
            .filter(|((_, _, a), (_, _, b))| a != b)
            .map(|(_, (x, y, alive))| Change { x, y, alive })
            .collect();

        Self { changes }
    }

    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }
}

impl Frame for DeltaFrame {
    fn build(ctxt: FrameCtxt<'_>) -> Option<Self> {
        let delta = Self::diff(ctxt.prev?, ctxt.curr);

        if ctxt.params.exceeds_delta_threshold(delta.len()) {
            None
        } else {
            Some(delta)
        }
    }
}
