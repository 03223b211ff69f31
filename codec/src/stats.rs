use crate::FrameKind;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub bytes: usize,
    pub frames: usize,
    pub changes: usize,
    pub records: BTreeMap<FrameKind, usize>,
}

impl Stats {
    pub fn count(&self, kind: FrameKind) -> usize {
        self.records.get(&kind).copied().unwrap_or_default()
    }
}
