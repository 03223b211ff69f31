/// What the host reports when it becomes ready; playback only starts when
/// both fields match the [`HostBinding`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationContext {
    pub identity: String,
    pub variant: String,
}

/// The environment a [`Player`](crate::Player) runs in.
pub trait Host {
    fn activation_context(&self) -> ActivationContext;

    /// Monotonic seconds.
    fn clock_now(&self) -> f64;

    /// Places a visible (`alive`) or invisible cell at world coordinates.
    fn render_cell(&mut self, alive: bool, x: i64, y: i64);

    fn notify_ready(&mut self, message: &str);
}

/// Where and for whom an animation is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostBinding {
    pub origin_x: i64,
    pub origin_y: i64,
    /// Host tile used for alive cells.
    pub alive_cell: String,
    /// Host tile used for dead cells.
    pub dead_cell: String,
    pub identity: String,
    pub variant: String,
    pub ready_message: String,
}

impl HostBinding {
    /// World coordinates of a 0-based grid cell.
    pub fn world(&self, x: usize, y: usize) -> (i64, i64) {
        (self.origin_x + x as i64, self.origin_y + y as i64)
    }

    pub fn accepts(&self, ctxt: &ActivationContext) -> bool {
        ctxt.identity == self.identity && ctxt.variant == self.variant
    }
}

impl Default for HostBinding {
    fn default() -> Self {
        Self {
            origin_x: 0,
            origin_y: 0,
            alive_cell: "$asphalt04".into(),
            dead_cell: "$asphalt01".into(),
            identity: "Bad Apple".into(),
            variant: "flat".into(),
            ready_message: "Bad Apple!!".into(),
        }
    }
}
