//! Startup: find the surface, construct the engine, wire the inputs.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use mandelview_core::config::CANVAS_ELEMENT_ID;
use mandelview_core::{ViewConfig, ViewState};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use crate::renderer::FractalEngine;
use crate::scheduler::FrameScheduler;
use crate::viewer::Viewer;
use crate::{events, widgets};

const VERT_SHADER: &str = include_str!("../shaders/fullscreen.vert");
const FRAG_SHADER: &str = include_str!("../shaders/mandelbrot.frag");

pub fn boot(config: ViewConfig) -> Result<(), JsValue> {
    let window = gloo_utils::window();
    let document = gloo_utils::document();

    // The surface must exist before anything else is touched.
    let canvas = document
        .get_element_by_id(CANVAS_ELEMENT_ID)
        .ok_or_else(|| {
            JsValue::from(js_sys::Error::new(&format!(
                "failed to get canvas element #{CANVAS_ELEMENT_ID}"
            )))
        })?
        .dyn_into::<HtmlCanvasElement>()?;

    let width = window.inner_width()?.as_f64().unwrap_or_default() as u32;
    let height = window.inner_height()?.as_f64().unwrap_or_default() as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let engine = FractalEngine::new(
        &canvas,
        VERT_SHADER,
        FRAG_SHADER,
        Some(config.zoom),
        Some(config.x_pos),
        Some(config.y_pos),
        Some(config.iters),
    );

    let viewer = Rc::new(RefCell::new(Viewer::new(engine, ViewState::new(&config))));

    let viewer_in_draw = Rc::clone(&viewer);
    let scheduler = Rc::new(FrameScheduler::new(move || viewer_in_draw.borrow().draw()));

    events::wire_input_events(&canvas, &viewer, &scheduler)?;
    widgets::wire_iteration_widgets(&document, &viewer, &scheduler)?;

    scheduler.request_draw();
    info!("mandelview started on a {width}x{height} surface");
    Ok(())
}
