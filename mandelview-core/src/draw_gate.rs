/// Scheduling gate behind the throttled draw: no matter how many
/// redraw requests arrive within one display-refresh interval, at most
/// one passes through.
///
/// The host-side scheduler calls [`request`](DrawGate::request) from
/// every input handler and [`complete`](DrawGate::complete) from the
/// deferred frame callback once the draw has run. There is no
/// cancellation and no error path.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawGate {
    pending: bool,
}

impl DrawGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask to schedule a draw. Returns `true` exactly when the caller
    /// must schedule the frame callback; while one is already pending
    /// this is a no-op returning `false`.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Mark the pending draw as executed, re-arming the gate.
    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
