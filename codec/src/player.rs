//! Time-synchronized playback of an [`AnimationSequence`].
//!
//! The host drives a [`Player`] through two hooks: [`Player::on_activate`],
//! fired once when the host is ready, and [`Player::on_tick`], fired at
//! whatever cadence the host likes. Each tick converts elapsed wall-clock time
//! into a target frame and applies every frame up to it, in order, so the
//! final picture doesn't depend on how ticks were scheduled.

mod cache;
mod host;

pub use self::{cache::*, host::*};
use crate::*;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Running,
    /// Ran past the last frame; ticks are ignored until the next activation.
    Stopped,
}

#[derive(Clone, Debug)]
pub struct PlaybackState {
    current: PixelGrid,
    frame_index: usize,
    start_time: f64,
    status: Status,
    row_cache: RowCache,
}

impl PlaybackState {
    fn new(params: &Params) -> Self {
        Self {
            current: PixelGrid::new(params.width, params.height),
            frame_index: 0,
            start_time: 0.0,
            status: Status::Idle,
            row_cache: RowCache::default(),
        }
    }

    pub fn current(&self) -> &PixelGrid {
        &self.current
    }

    /// 1-based index of the most recently applied frame; 0 before activation.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn row_cache(&self) -> &RowCache {
        &self.row_cache
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    sequence: AnimationSequence,
    binding: HostBinding,
    state: PlaybackState,
}

impl Player {
    pub fn new(sequence: AnimationSequence, binding: HostBinding) -> Self {
        let state = PlaybackState::new(sequence.params());

        Self {
            sequence,
            binding,
            state,
        }
    }

    pub fn from_script(script: LuaScript) -> Self {
        Self::new(script.sequence, script.binding)
    }

    pub fn sequence(&self) -> &AnimationSequence {
        &self.sequence
    }

    pub fn binding(&self) -> &HostBinding {
        &self.binding
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    /// Back to a blank, idle state. Decoded rows stay cached.
    pub fn reset(&mut self) {
        let row_cache = std::mem::take(&mut self.state.row_cache);

        self.state = PlaybackState {
            row_cache,
            ..PlaybackState::new(self.sequence.params())
        };
    }

    /// Starts playback if the host identifies as the expected one; shows the
    /// first frame and announces itself. Any previous run is discarded.
    pub fn on_activate<H>(&mut self, host: &mut H) -> bool
    where
        H: Host + ?Sized,
    {
        self.reset();

        let ctxt = host.activation_context();

        if !self.binding.accepts(&ctxt) {
            debug!(
                identity = %ctxt.identity,
                variant = %ctxt.variant,
                "host rejected, staying idle"
            );

            return false;
        }

        self.state.start_time = host.clock_now();
        self.state.frame_index = 1;
        self.state.status = Status::Running;
        self.apply_frame(1, host);

        host.notify_ready(&self.binding.ready_message);

        info!(
            frames = self.sequence.len(),
            fps = self.sequence.params().fps,
            "playback started"
        );

        true
    }

    pub fn on_tick<H>(&mut self, host: &mut H)
    where
        H: Host + ?Sized,
    {
        if self.state.status != Status::Running {
            return;
        }

        let elapsed = host.clock_now() - self.state.start_time;
        let target = (elapsed * self.sequence.params().fps as f64).floor() + 1.0;

        if target > self.sequence.len() as f64 {
            info!(frame = self.state.frame_index, "playback finished");
            self.state.status = Status::Stopped;
            return;
        }

        // Also rejects NaN, should the clock misbehave.
        if !(target >= 1.0) {
            return;
        }

        let target = target as usize;

        while self.state.frame_index < target {
            self.state.frame_index += 1;
            self.apply_frame(self.state.frame_index, host);
        }
    }

    fn apply_frame<H>(&mut self, frame_index: usize, host: &mut H)
    where
        H: Host + ?Sized,
    {
        let Self {
            sequence,
            binding,
            state,
        } = self;

        match sequence.get(frame_index) {
            Some(FrameRecord::Full(frame)) => {
                state.row_cache.decode_into(frame, &mut state.current);

                for (x, y, alive) in state.current.cells() {
                    let (wx, wy) = binding.world(x, y);
                    host.render_cell(alive, wx, wy);
                }
            }

            Some(FrameRecord::Delta(frame)) => {
                for change in frame.changes() {
                    if !state.current.contains(change.x, change.y) {
                        warn!(frame = frame_index, ?change, "change outside the grid, skipping");
                        continue;
                    }

                    state.current.set(change.x, change.y, change.alive);

                    let (wx, wy) = binding.world(change.x, change.y);
                    host.render_cell(change.alive, wx, wy);
                }
            }

            None => {
                warn!(frame = frame_index, "no such frame, skipping");
            }
        }
    }
}
