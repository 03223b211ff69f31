use crate::*;

/// An encoded animation: its shape and rate plus one record per frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationSequence {
    params: Params,
    frames: Vec<FrameRecord>,
}

impl AnimationSequence {
    /// Fails with [`CodecError::EmptySequence`] when `frames` is empty; the
    /// first record has to be a full frame.
    pub fn new(params: Params, frames: Vec<FrameRecord>) -> Result<Self> {
        match frames.first() {
            None => Err(CodecError::EmptySequence),
            Some(FrameRecord::Delta(_)) => Err(CodecError::syntax(
                0,
                "first frame of a sequence must be a full frame",
            )),
            Some(FrameRecord::Full(_)) => Ok(Self { params, frames }),
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Record for a 1-based frame index, as the playback engine counts them.
    pub fn get(&self, frame_index: usize) -> Option<&FrameRecord> {
        frame_index
            .checked_sub(1)
            .and_then(|idx| self.frames.get(idx))
    }

    /// Duration of the whole animation, in seconds.
    pub fn duration(&self) -> f64 {
        self.frames.len() as f64 / self.params.fps as f64
    }
}

/// Reconstructs every frame of `sequence`, in order.
pub fn replay(sequence: &AnimationSequence) -> Vec<PixelGrid> {
    let params = sequence.params();
    let mut cache = RowCache::default();
    let mut state = PixelGrid::new(params.width, params.height);

    sequence
        .frames()
        .iter()
        .map(|frame| {
            match frame {
                FrameRecord::Full(frame) => cache.decode_into(frame, &mut state),
                FrameRecord::Delta(frame) => {
                    for change in frame.changes() {
                        if state.contains(change.x, change.y) {
                            state.set(change.x, change.y, change.alive);
                        }
                    }
                }
            }

            state.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_delta_first() {
        let params = Params::new(8, 1, 30).unwrap();

        assert_eq!(
            AnimationSequence::new(params, vec![]),
            Err(CodecError::EmptySequence)
        );
        assert!(AnimationSequence::new(params, vec![DeltaFrame::default().into()]).is_err());
    }

    #[test]
    fn frames_are_one_based() {
        let params = Params::new(8, 1, 30).unwrap();
        let full = FullFrame::new(&PixelGrid::new(8, 1));
        let seq = AnimationSequence::new(
            params,
            vec![full.clone().into(), DeltaFrame::default().into()],
        )
        .unwrap();

        assert_eq!(seq.get(0), None);
        assert_eq!(seq.get(1), Some(&FrameRecord::Full(full)));
        assert_eq!(seq.get(2).map(FrameRecord::kind), Some(FrameKind::Delta));
        assert_eq!(seq.get(3), None);
    }
}
