use crate::*;

pub trait Frame
where
    Self: Sized,
    FrameRecord: From<Self>,
{
    fn build(ctxt: FrameCtxt<'_>) -> Option<Self>;

    fn build_record(ctxt: FrameCtxt<'_>) -> Option<FrameRecord> {
        Self::build(ctxt).map(FrameRecord::from)
    }
}

#[derive(Copy, Clone)]
pub struct FrameCtxt<'a> {
    pub params: &'a Params,
    pub prev: Option<&'a PixelGrid>,
    pub curr: &'a PixelGrid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrameKind {
    Full,
    Delta,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameRecord {
    Full(FullFrame),
    Delta(DeltaFrame),
}

impl FrameRecord {
    pub fn kind(&self) -> FrameKind {
        match self {
            FrameRecord::Full(_) => FrameKind::Full,
            FrameRecord::Delta(_) => FrameKind::Delta,
        }
    }

    pub fn as_full(&self) -> Option<&FullFrame> {
        match self {
            FrameRecord::Full(frame) => Some(frame),
            FrameRecord::Delta(_) => None,
        }
    }

    pub fn as_delta(&self) -> Option<&DeltaFrame> {
        match self {
            FrameRecord::Delta(frame) => Some(frame),
            FrameRecord::Full(_) => None,
        }
    }
}

impl From<FullFrame> for FrameRecord {
    fn from(frame: FullFrame) -> Self {
        Self::Full(frame)
    }
}

impl From<DeltaFrame> for FrameRecord {
    fn from(frame: DeltaFrame) -> Self {
        Self::Delta(frame)
    }
}
