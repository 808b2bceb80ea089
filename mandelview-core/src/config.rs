//! Viewer tuning constants and startup configuration.
//!
//! Every handler-facing constant lives here so the clamping and
//! sensitivity policy is defined in one place.

/// Floor for the zoom factor. Zooming out never goes below this.
pub const MIN_ZOOM: f64 = 0.1;

/// Zoom step per wheel-delta unit, scaled by the current zoom.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Pinch scale steps at or above this are treated as gesture-recognition
/// noise and ignored.
pub const PINCH_NOISE_THRESHOLD: f64 = 0.5;

/// Minimum finger span (pixels) for a pinch session to start. Below this
/// the scale ratio is too unstable to use.
pub const MIN_PINCH_SPAN: f64 = 10.0;

/// Single-finger pan moves the view this much faster than a mouse drag.
pub const TOUCH_PAN_MULTIPLIER: f64 = 2.0;

/// Iteration budget bounds for the slider/text input path.
pub const ITER_MIN: u32 = 1;
pub const ITER_MAX: u32 = 1000;

/// DOM id of the drawable surface. Startup fails if it is absent.
pub const CANVAS_ELEMENT_ID: &str = "screen";

/// DOM ids of the (optional) iteration widgets.
pub const ITER_SLIDER_ID: &str = "iter-slider";
pub const ITER_TEXT_ID: &str = "iter-text";

/// Initial camera parameters handed to the renderer at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub zoom: f64,
    /// Horizontal pan offset in fractal-space units.
    pub x_pos: f64,
    /// Vertical pan offset in fractal-space units.
    pub y_pos: f64,
    pub iters: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        // Full Mandelbrot view centered on the real axis.
        Self {
            zoom: 0.5,
            x_pos: -0.5,
            y_pos: 0.0,
            iters: 100,
        }
    }
}
