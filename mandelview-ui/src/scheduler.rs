//! Throttled draw scheduling against the browser's display sync.

use std::cell::RefCell;
use std::rc::Rc;

use mandelview_core::DrawGate;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Coalesces redraw requests onto animation frames: any number of
/// `request_draw` calls between two repaints produce exactly one draw.
///
/// Input handlers mutate state synchronously and the frame callback is
/// deferred, so the draw always sees the state as of the moment the
/// frame actually fires, not the moment it was requested.
pub struct FrameScheduler {
    gate: Rc<RefCell<DrawGate>>,
    draw: Rc<dyn Fn()>,
}

impl FrameScheduler {
    pub fn new(draw: impl Fn() + 'static) -> Self {
        Self {
            gate: Rc::new(RefCell::new(DrawGate::new())),
            draw: Rc::new(draw),
        }
    }

    /// Callable from any handler, any number of times. The first call
    /// per frame schedules the callback; the rest are no-ops until the
    /// frame has run. Once scheduled, the callback runs exactly once;
    /// there is no cancellation.
    pub fn request_draw(&self) {
        if !self.gate.borrow_mut().request() {
            return;
        }

        let gate = Rc::clone(&self.gate);
        let draw = Rc::clone(&self.draw);
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let holder_in_callback = Rc::clone(&holder);
        let callback = Closure::wrap(Box::new(move |_timestamp: f64| {
            draw();
            gate.borrow_mut().complete();
            // One-shot: release the closure after its run.
            holder_in_callback.borrow_mut().take();
        }) as Box<dyn FnMut(f64)>);

        let window = web_sys::window().expect("should have window");
        if window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .is_ok()
        {
            *holder.borrow_mut() = Some(callback);
        } else {
            // Could not schedule a frame; draw now so the request is
            // not silently dropped.
            (self.draw)();
            self.gate.borrow_mut().complete();
        }
    }

    pub fn is_draw_pending(&self) -> bool {
        self.gate.borrow().is_pending()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::renderer::mock::RecordingBackend;
    use crate::viewer::Viewer;
    use mandelview_core::{ViewConfig, ViewState};
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// Resolve after the next repaint. Our scheduler registers its
    /// callback first, so awaiting this twice guarantees a pending
    /// draw has run.
    async fn next_frame() {
        let (sender, receiver) = futures::channel::oneshot::channel::<()>();

        let closure = Closure::once(move || {
            let _ = sender.send(());
        });

        web_sys::window()
            .expect("should have window")
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("should register rAF");

        closure.forget();
        let _ = receiver.await;
    }

    #[wasm_bindgen_test]
    async fn burst_of_requests_draws_once() {
        let draws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&draws);
        let scheduler = FrameScheduler::new(move || counter.set(counter.get() + 1));

        for _ in 0..20 {
            scheduler.request_draw();
        }
        assert!(scheduler.is_draw_pending());

        next_frame().await;
        next_frame().await;

        assert_eq!(draws.get(), 1);
        assert!(!scheduler.is_draw_pending());
    }

    #[wasm_bindgen_test]
    async fn gate_rearms_after_each_frame() {
        let draws = Rc::new(Cell::new(0));
        let counter = Rc::clone(&draws);
        let scheduler = FrameScheduler::new(move || counter.set(counter.get() + 1));

        scheduler.request_draw();
        next_frame().await;
        next_frame().await;

        scheduler.request_draw();
        next_frame().await;
        next_frame().await;

        assert_eq!(draws.get(), 2);
    }

    #[wasm_bindgen_test]
    async fn draw_sees_state_from_frame_time_not_request_time() {
        let value = Rc::new(Cell::new(0));
        let seen = Rc::new(Cell::new(-1));

        let value_in_draw = Rc::clone(&value);
        let seen_in_draw = Rc::clone(&seen);
        let scheduler =
            FrameScheduler::new(move || seen_in_draw.set(value_in_draw.get()));

        scheduler.request_draw();
        // Mutations after the request but before the repaint are what
        // the coalesced draw must render.
        value.set(42);

        next_frame().await;
        next_frame().await;

        assert_eq!(seen.get(), 42);
    }

    #[wasm_bindgen_test]
    async fn resize_is_pushed_before_the_coalesced_draw() {
        let (backend, calls) = RecordingBackend::new();
        let viewer = Rc::new(RefCell::new(Viewer::new(
            backend,
            ViewState::new(&ViewConfig::default()),
        )));

        let viewer_in_draw = Rc::clone(&viewer);
        let scheduler = FrameScheduler::new(move || viewer_in_draw.borrow().draw());

        viewer.borrow_mut().on_resize(640, 480);
        scheduler.request_draw();

        next_frame().await;
        next_frame().await;

        let calls = calls.borrow();
        let resize_at = calls
            .iter()
            .position(|c| *c == "resize_viewport")
            .expect("resize_viewport was called");
        let draw_at = calls.iter().position(|c| *c == "draw").expect("draw ran");
        assert!(resize_at < draw_at);
    }
}
