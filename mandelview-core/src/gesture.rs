use crate::config::{MIN_PINCH_SPAN, PINCH_NOISE_THRESHOLD};

/// Pointer-drag lifecycle: a button (or finger) is either down with a
/// last-seen position, or up. Move events only yield deltas while down.
///
/// Used for both mouse drags and single-finger pans.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    anchor: Option<(f64, f64)>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.anchor = Some((x, y));
    }

    pub fn release(&mut self) {
        self.anchor = None;
    }

    pub fn is_down(&self) -> bool {
        self.anchor.is_some()
    }

    /// Advance to a new pointer position. Returns the delta since the
    /// previous position while pressed, `None` otherwise.
    pub fn motion(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (ax, ay) = self.anchor?;
        self.anchor = Some((x, y));
        Some((x - ax, y - ay))
    }
}

/// Distance between two fingers in client coordinates.
pub fn finger_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

/// State of one two-finger pinch, created at gesture start and dropped
/// at gesture end so the scale baseline always resets between gestures.
///
/// Scale readings are ratios of the current finger span to the span at
/// gesture start, the way gesture recognizers report them.
#[derive(Clone, Copy, Debug)]
pub struct PinchSession {
    initial_span: f64,
    last_scale: f64,
}

impl PinchSession {
    /// Open a session from the finger span at gesture start. Spans
    /// below `MIN_PINCH_SPAN` make the ratio too unstable to track and
    /// refuse a session.
    pub fn begin(initial_span: f64) -> Option<Self> {
        if initial_span < MIN_PINCH_SPAN {
            return None;
        }
        Some(Self {
            initial_span,
            last_scale: 1.0,
        })
    }

    /// Scale reading for the current finger span.
    pub fn scale_for_span(&self, span: f64) -> f64 {
        span / self.initial_span
    }

    /// Feed the next scale reading. Returns the step to apply to the
    /// zoom, or `None` when the jump from the previous reading is at or
    /// above the noise threshold and must be ignored.
    ///
    /// The baseline advances to the new reading either way: a rejected
    /// jump resets where the next step is measured from instead of
    /// poisoning every following reading.
    pub fn step(&mut self, scale: f64) -> Option<f64> {
        let ds = scale - self.last_scale;
        self.last_scale = scale;
        if ds.abs() < PINCH_NOISE_THRESHOLD {
            Some(ds)
        } else {
            None
        }
    }
}
