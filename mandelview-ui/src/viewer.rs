//! Input-to-state translation: each raw input becomes a delta, a named
//! state update, and the matching push into the rendering engine.

use log::debug;
use mandelview_core::{finger_distance, DragTracker, PinchSession, ViewState};

use crate::renderer::RenderBackend;

/// The live view session: the camera record, the gesture trackers, and
/// the engine the camera is pushed into. Event listeners own a shared
/// handle and call one method per raw event; methods report whether
/// the view changed so the caller knows to request a draw.
pub struct Viewer<B: RenderBackend> {
    backend: B,
    state: ViewState,
    drag: DragTracker,
    touch_pan: DragTracker,
    pinch: Option<PinchSession>,
}

impl<B: RenderBackend> Viewer<B> {
    pub fn new(backend: B, state: ViewState) -> Self {
        let viewer = Self {
            backend,
            state,
            drag: DragTracker::new(),
            touch_pan: DragTracker::new(),
            pinch: None,
        };
        // Seed the engine so the first draw matches the state record.
        viewer.backend.set_zoom(viewer.state.zoom);
        viewer.backend.set_position(viewer.state.x_pos, viewer.state.y_pos);
        viewer.backend.set_iters(viewer.state.iters);
        viewer
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn draw(&self) {
        self.backend.draw();
    }

    /// Wheel zoom. Always changes the view.
    pub fn on_wheel(&mut self, delta_y: f64) {
        let zoom = self.state.zoom_by_wheel(delta_y);
        self.backend.set_zoom(zoom);
        self.backend.refresh_zoom();
    }

    pub fn on_pointer_press(&mut self, x: f64, y: f64) {
        self.drag.press(x, y);
    }

    pub fn on_pointer_release(&mut self) {
        self.drag.release();
    }

    /// Mouse motion pans only while the button is held. Returns whether
    /// the view moved.
    pub fn on_pointer_move(&mut self, x: f64, y: f64, viewport_w: f64, viewport_h: f64) -> bool {
        let Some((dx, dy)) = self.drag.motion(x, y) else {
            return false;
        };
        self.state.pan_by_pixels(dx, dy, viewport_w, viewport_h);
        self.push_position();
        true
    }

    /// Fingers went down (or changed). One finger starts a pan; two
    /// fingers end any pan and open a pinch session with a fresh scale
    /// baseline.
    pub fn on_touch_start(&mut self, touches: &[(f64, f64)]) {
        match touches {
            [finger] => {
                self.pinch = None;
                self.touch_pan.press(finger.0, finger.1);
            }
            [a, b, ..] => {
                self.touch_pan.release();
                self.pinch = PinchSession::begin(finger_distance(*a, *b));
            }
            [] => {
                self.touch_pan.release();
                self.pinch = None;
            }
        }
    }

    /// Finger motion: pan with one finger, pinch-zoom with two.
    /// Returns whether the view changed (rejected pinch noise does not
    /// count).
    pub fn on_touch_move(
        &mut self,
        touches: &[(f64, f64)],
        viewport_w: f64,
        viewport_h: f64,
    ) -> bool {
        match touches {
            [finger] => {
                let Some((dx, dy)) = self.touch_pan.motion(finger.0, finger.1) else {
                    return false;
                };
                self.state.pan_by_touch(dx, dy, viewport_w, viewport_h);
                self.push_position();
                true
            }
            [a, b, ..] => {
                let Some(session) = self.pinch.as_mut() else {
                    return false;
                };
                let scale = session.scale_for_span(finger_distance(*a, *b));
                let Some(ds) = session.step(scale) else {
                    return false;
                };
                let zoom = self.state.zoom_by_pinch_step(ds);
                self.backend.set_zoom(zoom);
                self.backend.refresh_zoom();
                true
            }
            [] => false,
        }
    }

    /// Fingers lifted; `remaining` is what is still on the surface.
    /// Dropping below two fingers ends the pinch session for good, and
    /// a single leftover finger rebases the pan so it does not jump.
    pub fn on_touch_end(&mut self, remaining: &[(f64, f64)]) {
        match remaining {
            [finger] => {
                self.pinch = None;
                self.touch_pan.press(finger.0, finger.1);
            }
            [] => {
                self.pinch = None;
                self.touch_pan.release();
            }
            _ => {}
        }
    }

    /// The canvas pixel dimensions changed; tell the engine to rebuild
    /// its projection before the next draw.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        debug!("viewport resized to {width}x{height}");
        self.backend.resize_viewport();
    }

    /// Iteration budget from either widget's raw text. Returns the
    /// clamped value for mirroring into the sibling widget.
    pub fn on_iters_input(&mut self, raw: &str) -> u32 {
        let iters = self.state.set_iters_from_text(raw);
        self.backend.set_iters(iters);
        self.backend.refresh_iters();
        iters
    }

    fn push_position(&mut self) {
        self.backend.set_position(self.state.x_pos, self.state.y_pos);
        self.backend.refresh_position();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::mock::RecordingBackend;
    use mandelview_core::config::{ITER_MAX, MIN_ZOOM};
    use mandelview_core::ViewConfig;

    fn viewer() -> (
        Viewer<RecordingBackend>,
        std::rc::Rc<std::cell::RefCell<Vec<&'static str>>>,
    ) {
        let (backend, calls) = RecordingBackend::new();
        let viewer = Viewer::new(backend, ViewState::new(&ViewConfig::default()));
        calls.borrow_mut().clear();
        (viewer, calls)
    }

    #[test]
    fn new_seeds_the_engine_with_initial_state() {
        let (backend, calls) = RecordingBackend::new();
        let viewer = Viewer::new(backend, ViewState::new(&ViewConfig::default()));

        assert_eq!(
            calls.borrow().as_slice(),
            ["set_zoom", "set_position", "set_iters"]
        );
        assert_eq!(viewer.state().zoom, 0.5);
    }

    #[test]
    fn wheel_pushes_zoom_and_refreshes() {
        let (mut viewer, calls) = viewer();

        viewer.on_wheel(-100.0);

        assert_eq!(calls.borrow().as_slice(), ["set_zoom", "refresh_zoom"]);
        assert!((viewer.state().zoom - 0.55).abs() < 1e-12);
    }

    #[test]
    fn pointer_move_without_press_is_inert() {
        let (mut viewer, calls) = viewer();

        assert!(!viewer.on_pointer_move(50.0, 50.0, 800.0, 600.0));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn drag_pushes_position_and_refreshes() {
        let (mut viewer, calls) = viewer();

        viewer.on_pointer_press(100.0, 100.0);
        assert!(viewer.on_pointer_move(120.0, 90.0, 800.0, 600.0));
        viewer.on_pointer_release();
        assert!(!viewer.on_pointer_move(300.0, 300.0, 800.0, 600.0));

        assert_eq!(
            calls.borrow().as_slice(),
            ["set_position", "refresh_position"]
        );
        // 20 / 800 / 0.5 right, 10 / 600 / 0.5 up (screen y inverted).
        assert!((viewer.state().x_pos - (-0.45)).abs() < 1e-12);
        assert!((viewer.state().y_pos - (10.0 / 600.0 / 0.5)).abs() < 1e-12);
    }

    #[test]
    fn single_finger_pan_uses_the_touch_multiplier() {
        let (mut viewer, _calls) = viewer();

        viewer.on_touch_start(&[(200.0, 200.0)]);
        assert!(viewer.on_touch_move(&[(210.0, 200.0)], 800.0, 600.0));

        // 10px * 2.0 multiplier / 800 / 0.5
        assert!((viewer.state().x_pos - (-0.5 + 0.05)).abs() < 1e-12);
    }

    #[test]
    fn pinch_spread_zooms_in_and_noise_is_rejected() {
        let (mut viewer, calls) = viewer();

        viewer.on_touch_start(&[(100.0, 300.0), (200.0, 300.0)]);

        // Spread: span 100 -> 120, scale 1.2, step 0.2 applied.
        assert!(viewer.on_touch_move(&[(90.0, 300.0), (210.0, 300.0)], 800.0, 600.0));
        assert!((viewer.state().zoom - 0.6).abs() < 1e-12);

        // Recognizer glitch: span jumps to 200 (scale 2.0, step 0.8),
        // ignored without perturbing the zoom.
        assert!(!viewer.on_touch_move(&[(0.0, 300.0), (200.0, 300.0)], 800.0, 600.0));
        assert!((viewer.state().zoom - 0.6).abs() < 1e-12);

        // But the baseline advanced: a small step from the jump's
        // scale is accepted again.
        assert!(viewer.on_touch_move(&[(0.0, 300.0), (210.0, 300.0)], 800.0, 600.0));

        assert_eq!(
            calls.borrow().as_slice(),
            ["set_zoom", "refresh_zoom", "set_zoom", "refresh_zoom"]
        );
    }

    #[test]
    fn degenerate_pinch_span_never_zooms() {
        let (mut viewer, calls) = viewer();

        viewer.on_touch_start(&[(100.0, 100.0), (102.0, 100.0)]);
        assert!(!viewer.on_touch_move(&[(90.0, 100.0), (112.0, 100.0)], 800.0, 600.0));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn pinch_collapse_respects_the_zoom_floor() {
        let (mut viewer, _calls) = viewer();

        viewer.on_touch_start(&[(0.0, 0.0), (400.0, 0.0)]);
        for span in [360.0, 300.0, 240.0, 180.0, 120.0, 60.0] {
            viewer.on_touch_move(&[(0.0, 0.0), (span, 0.0)], 800.0, 600.0);
            assert!(viewer.state().zoom >= MIN_ZOOM);
        }
    }

    #[test]
    fn lifting_to_one_finger_ends_pinch_and_rebases_pan() {
        let (mut viewer, _calls) = viewer();

        viewer.on_touch_start(&[(100.0, 100.0), (200.0, 100.0)]);
        viewer.on_touch_end(&[(150.0, 100.0)]);

        // Two fingers again would need a fresh session; meanwhile the
        // leftover finger pans from where it actually is.
        let before = viewer.state().x_pos;
        assert!(viewer.on_touch_move(&[(160.0, 100.0)], 800.0, 600.0));
        assert!(viewer.state().x_pos > before);
    }

    #[test]
    fn second_gesture_starts_from_a_fresh_baseline() {
        let (mut viewer, _calls) = viewer();

        viewer.on_touch_start(&[(100.0, 0.0), (200.0, 0.0)]);
        viewer.on_touch_move(&[(80.0, 0.0), (220.0, 0.0)], 800.0, 600.0);
        let after_first = viewer.state().zoom;
        viewer.on_touch_end(&[]);

        // New gesture: the first small spread applies relative to a
        // baseline of 1.0, not wherever the last gesture ended.
        viewer.on_touch_start(&[(100.0, 0.0), (300.0, 0.0)]);
        assert!(viewer.on_touch_move(&[(95.0, 0.0), (305.0, 0.0)], 800.0, 600.0));
        assert!(viewer.state().zoom > after_first);
    }

    #[test]
    fn iters_input_clamps_and_refreshes() {
        let (mut viewer, calls) = viewer();

        assert_eq!(viewer.on_iters_input("2000"), ITER_MAX);
        assert_eq!(viewer.on_iters_input(""), 1);
        assert_eq!(viewer.state().iters, 1);
        assert_eq!(
            calls.borrow().as_slice(),
            ["set_iters", "refresh_iters", "set_iters", "refresh_iters"]
        );
    }

    #[test]
    fn resize_asks_the_engine_to_rebuild_its_projection() {
        let (mut viewer, calls) = viewer();

        viewer.on_resize(1024, 768);

        assert_eq!(calls.borrow().as_slice(), ["resize_viewport"]);
    }
}
