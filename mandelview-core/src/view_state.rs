use crate::config::{
    ViewConfig, ITER_MAX, ITER_MIN, MIN_ZOOM, TOUCH_PAN_MULTIPLIER, WHEEL_ZOOM_SENSITIVITY,
};

/// Camera parameters driving the next render.
///
/// One live record for the whole process. Handlers never write fields
/// directly; every mutation goes through a named operation below so the
/// zoom floor and iteration bounds are enforced in one place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub zoom: f64,
    pub x_pos: f64,
    pub y_pos: f64,
    pub iters: u32,
}

impl ViewState {
    pub fn new(config: &ViewConfig) -> Self {
        Self {
            zoom: config.zoom.max(MIN_ZOOM),
            x_pos: config.x_pos,
            y_pos: config.y_pos,
            iters: config.iters.clamp(ITER_MIN, ITER_MAX),
        }
    }

    /// Wheel zoom: step is proportional to the current zoom, so the
    /// perceived speed stays constant at any depth. Scrolling up
    /// (negative delta) zooms in. Returns the new zoom.
    pub fn zoom_by_wheel(&mut self, delta_y: f64) -> f64 {
        self.zoom += -delta_y * WHEEL_ZOOM_SENSITIVITY * self.zoom;
        self.zoom = self.zoom.max(MIN_ZOOM);
        self.zoom
    }

    /// Apply one accepted pinch scale step. The noise gate on the step
    /// lives in [`crate::gesture::PinchSession`], not here.
    pub fn zoom_by_pinch_step(&mut self, ds: f64) -> f64 {
        self.zoom += ds * self.zoom;
        self.zoom = self.zoom.max(MIN_ZOOM);
        self.zoom
    }

    /// Pan by a pixel-space drag delta. Displacement is normalized by
    /// the viewport dimensions and divided by zoom so a drag covers the
    /// same on-screen distance at any depth. Screen y grows downward,
    /// fractal y grows upward.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64, viewport_w: f64, viewport_h: f64) {
        self.x_pos += dx / viewport_w / self.zoom;
        self.y_pos -= dy / viewport_h / self.zoom;
    }

    /// Pan by a single-finger touch displacement. Same mapping as a
    /// mouse drag with a fixed speed-up.
    pub fn pan_by_touch(&mut self, dx: f64, dy: f64, viewport_w: f64, viewport_h: f64) {
        self.pan_by_pixels(
            dx * TOUCH_PAN_MULTIPLIER,
            dy * TOUCH_PAN_MULTIPLIER,
            viewport_w,
            viewport_h,
        );
    }

    /// Set the iteration budget, clamped into `ITER_MIN..=ITER_MAX`.
    /// Returns the clamped value for mirroring back into widgets.
    pub fn set_iters(&mut self, raw: i64) -> u32 {
        self.iters = raw.clamp(ITER_MIN as i64, ITER_MAX as i64) as u32;
        self.iters
    }

    /// Set the iteration budget from raw widget text. Empty or
    /// unparsable input silently maps to the minimum; everything else
    /// is truncated and clamped. Never an error.
    pub fn set_iters_from_text(&mut self, text: &str) -> u32 {
        let raw = text
            .trim()
            .parse::<f64>()
            .map(|v| if v.is_nan() { ITER_MIN as i64 } else { v as i64 })
            .unwrap_or(ITER_MIN as i64);
        self.set_iters(raw)
    }
}
