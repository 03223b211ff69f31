//! Keyframe/delta codec for monochrome animations, plus the playback engine
//! that replays them against a host's clock and renderer.

pub mod bits;
mod error;
mod frame;
mod frames;
mod grid;
mod params;
mod player;
pub mod script;
mod sequence;
mod source;
mod stats;

use tracing::debug;

pub use self::{
    error::*, frame::*, frames::*, grid::*, params::*, player::*, script::LuaScript, sequence::*,
    source::*, stats::*,
};

/// Turns pixel grids into frame records, one at a time and in order.
#[derive(Debug)]
pub struct Encoder<'a> {
    params: &'a Params,
    stats: Stats,
    frames: Vec<FrameRecord>,
    prev: Option<PixelGrid>,
}

impl<'a> Encoder<'a> {
    pub fn new(params: &'a Params) -> Self {
        Self {
            params,
            stats: Default::default(),
            frames: Default::default(),
            prev: Default::default(),
        }
    }

    pub fn add(&mut self, curr: PixelGrid) -> Result<&FrameRecord> {
        let idx = self.frames.len();

        curr.check_shape(self.params, idx)?;

        let ctxt = FrameCtxt {
            params: self.params,
            prev: self.prev.as_ref(),
            curr: &curr,
        };

        let record = DeltaFrame::build_record(ctxt)
            .or_else(|| FullFrame::build_record(ctxt))
            .unwrap(); // keyframes always build

        debug!(frame = idx, kind = ?record.kind(), "encoded frame");

        if let FrameRecord::Delta(delta) = &record {
            self.stats.changes += delta.len();
        }

        *self.stats.records.entry(record.kind()).or_default() += 1;
        self.stats.bytes += script::record_len(&record);
        self.stats.frames += 1;
        self.prev = Some(curr);
        self.frames.push(record);

        Ok(&self.frames[idx])
    }

    pub fn finish(self) -> Result<(Stats, AnimationSequence)> {
        let sequence = AnimationSequence::new(*self.params, self.frames)?;

        Ok((self.stats, sequence))
    }
}

/// Encodes a whole sequence of grids; nothing is returned unless every frame
/// fits `params`.
pub fn encode(
    params: &Params,
    grids: impl IntoIterator<Item = PixelGrid>,
) -> Result<(Stats, AnimationSequence)> {
    let mut encoder = Encoder::new(params);

    for grid in grids {
        encoder.add(grid)?;
    }

    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(params: &Params, text: &str) -> PixelGrid {
        PixelGrid::parse(params, 0, text).unwrap()
    }

    #[test]
    fn first_frame_is_full_even_if_blank() {
        let params = Params::new(8, 8, 30).unwrap();
        let (stats, seq) = encode(&params, [PixelGrid::new(8, 8)]).unwrap();

        assert_eq!(seq.frames()[0].kind(), FrameKind::Full);
        assert_eq!(stats.count(FrameKind::Full), 1);
        assert_eq!(stats.count(FrameKind::Delta), 0);
    }

    #[test]
    fn single_change_in_tiny_grid_is_full() {
        let params = Params::new(8, 2, 30).unwrap();
        let blank = grid(&params, "00000000\n00000000");
        let dot = grid(&params, "00000000\n10000000");

        let (_, seq) = encode(&params, [blank, dot]).unwrap();

        assert_eq!(
            seq.frames()[1],
            FrameRecord::Full(FullFrame::from_rows(vec!["80".into(), "00".into()]))
        );
    }

    #[test]
    fn unchanged_frame_gives_empty_delta() {
        let params = Params::new(8, 8, 30).unwrap();
        let (stats, seq) =
            encode(&params, [PixelGrid::new(8, 8), PixelGrid::new(8, 8)]).unwrap();

        assert_eq!(seq.len(), 2);
        assert_eq!(seq.frames()[1], FrameRecord::Delta(DeltaFrame::default()));
        assert_eq!(stats.changes, 0);
    }

    #[test]
    fn empty_input_is_rejected() {
        let params = Params::new(8, 8, 30).unwrap();

        assert_eq!(
            encode(&params, Vec::new()).unwrap_err(),
            CodecError::EmptySequence
        );
    }

    #[test]
    fn mismatched_grid_is_rejected() {
        let params = Params::new(8, 8, 30).unwrap();
        let err = encode(&params, [PixelGrid::new(8, 8), PixelGrid::new(8, 7)]).unwrap_err();

        assert_eq!(
            err,
            CodecError::DimensionMismatch {
                frame: 1,
                axis: Axis::Rows,
                expected: 8,
                found: 7,
            }
        );
    }

    #[test]
    fn stats_track_bytes_and_changes() {
        let params = Params::new(64, 64, 30).unwrap();
        let mut moved = PixelGrid::new(64, 64);
        moved.set(3, 4, true);

        let (stats, seq) = encode(&params, [PixelGrid::new(64, 64), moved]).unwrap();

        assert_eq!(stats.frames, 2);
        assert_eq!(stats.changes, 1);
        assert_eq!(stats.count(FrameKind::Delta), 1);
        assert_eq!(
            stats.bytes,
            seq.frames().iter().map(script::record_len).sum::<usize>()
        );
    }
}
