use crate::*;

/// A keyframe: every row of the grid, bit-packed into hex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FullFrame {
    rows: Vec<String>,
}

impl FullFrame {
    pub fn new(curr: &PixelGrid) -> Self {
        Self {
            rows: curr.rows().map(bits::pack_row).collect(),
        }
    }

    /// Wraps already packed rows (bottom row first); used by the parser.
    pub(crate) fn from_rows(rows: Vec<String>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

impl Frame for FullFrame {
    fn build(ctxt: FrameCtxt<'_>) -> Option<Self> {
        Some(Self::new(ctxt.curr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_every_row_bottom_first() {
        let params = Params::new(9, 2, 30).unwrap();
        let grid = PixelGrid::parse(&params, 0, "100000001\n000000000").unwrap();

        assert_eq!(FullFrame::new(&grid).rows(), &["0000", "8080"]);
    }

    #[test]
    fn builds_with_or_without_previous_frame() {
        let params = Params::new(8, 1, 30).unwrap();
        let prev = PixelGrid::parse(&params, 0, "00000000").unwrap();
        let curr = PixelGrid::parse(&params, 1, "11000000").unwrap();

        for prev in [None, Some(&prev)] {
            let ctxt = FrameCtxt {
                params: &params,
                prev,
                curr: &curr,
            };

            let record = FullFrame::build_record(ctxt).unwrap();

            assert_eq!(record.as_full().unwrap().rows(), &["c0"]);
        }
    }
}
