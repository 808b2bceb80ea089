//! DOM event listener wiring: raw browser events in, viewer method
//! calls and coalesced draw requests out.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, TouchEvent};

use crate::renderer::RenderBackend;
use crate::scheduler::FrameScheduler;
use crate::viewer::Viewer;

/// Attach all input listeners. Called once at startup; the listeners
/// live for the page lifetime.
pub fn wire_input_events<B: RenderBackend + 'static>(
    canvas: &HtmlCanvasElement,
    viewer: &Rc<RefCell<Viewer<B>>>,
    scheduler: &Rc<FrameScheduler>,
) -> Result<(), JsValue> {
    let window = gloo_utils::window();

    // Wheel zoom, non-passive so the page never scrolls under the view.
    {
        let viewer = Rc::clone(viewer);
        let scheduler = Rc::clone(scheduler);
        let handler = Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
            e.prevent_default();
            viewer.borrow_mut().on_wheel(e.delta_y());
            scheduler.request_draw();
        }) as Box<dyn Fn(web_sys::WheelEvent)>);

        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(false);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            handler.as_ref().unchecked_ref(),
            &options,
        )?;
        handler.forget();
    }

    // Mouse drag pan. Press/release are tracked window-wide so a drag
    // that leaves the canvas still ends when the button goes up.
    {
        let viewer = Rc::clone(viewer);
        let handler = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            viewer
                .borrow_mut()
                .on_pointer_press(e.client_x() as f64, e.client_y() as f64);
        }) as Box<dyn Fn(web_sys::MouseEvent)>);
        window.add_event_listener_with_callback("mousedown", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    {
        let viewer = Rc::clone(viewer);
        let handler = Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
            viewer.borrow_mut().on_pointer_release();
        }) as Box<dyn Fn(web_sys::MouseEvent)>);
        window.add_event_listener_with_callback("mouseup", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    {
        let canvas = canvas.clone();
        let viewer = Rc::clone(viewer);
        let scheduler = Rc::clone(scheduler);
        let handler = Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
            let moved = viewer.borrow_mut().on_pointer_move(
                e.client_x() as f64,
                e.client_y() as f64,
                canvas.width() as f64,
                canvas.height() as f64,
            );
            if moved {
                scheduler.request_draw();
            }
        }) as Box<dyn Fn(web_sys::MouseEvent)>);
        window.add_event_listener_with_callback("mousemove", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    // Window resize: the canvas pixel dimensions follow the window,
    // then the engine rebuilds its projection before the next draw.
    {
        let canvas = canvas.clone();
        let viewer = Rc::clone(viewer);
        let scheduler = Rc::clone(scheduler);
        let handler = Closure::wrap(Box::new(move || {
            let window = gloo_utils::window();
            let new_width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or_default() as u32;
            let new_height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or_default() as u32;

            if canvas.width() != new_width || canvas.height() != new_height {
                canvas.set_width(new_width);
                canvas.set_height(new_height);
                viewer.borrow_mut().on_resize(new_width, new_height);
                scheduler.request_draw();
            }
        }) as Box<dyn Fn()>);
        window.add_event_listener_with_callback("resize", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    // Touch pan/pinch on the canvas, non-passive so gestures never
    // scroll or zoom the page itself.
    let touch_options = web_sys::AddEventListenerOptions::new();
    touch_options.set_passive(false);

    {
        let viewer = Rc::clone(viewer);
        let handler = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            viewer.borrow_mut().on_touch_start(&touch_points(&e));
        }) as Box<dyn Fn(TouchEvent)>);
        canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            handler.as_ref().unchecked_ref(),
            &touch_options,
        )?;
        handler.forget();
    }

    {
        let canvas_for_dims = canvas.clone();
        let viewer = Rc::clone(viewer);
        let scheduler = Rc::clone(scheduler);
        let handler = Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            let changed = viewer.borrow_mut().on_touch_move(
                &touch_points(&e),
                canvas_for_dims.width() as f64,
                canvas_for_dims.height() as f64,
            );
            if changed {
                scheduler.request_draw();
            }
        }) as Box<dyn Fn(TouchEvent)>);
        canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            handler.as_ref().unchecked_ref(),
            &touch_options,
        )?;
        handler.forget();
    }

    {
        let viewer = Rc::clone(viewer);
        let handler = Closure::wrap(Box::new(move |e: TouchEvent| {
            // `touches` holds what is still on the surface.
            viewer.borrow_mut().on_touch_end(&touch_points(&e));
        }) as Box<dyn Fn(TouchEvent)>);
        for event_name in ["touchend", "touchcancel"] {
            canvas
                .add_event_listener_with_callback(event_name, handler.as_ref().unchecked_ref())?;
        }
        handler.forget();
    }

    Ok(())
}

fn touch_points(event: &TouchEvent) -> Vec<(f64, f64)> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
        .collect()
}
