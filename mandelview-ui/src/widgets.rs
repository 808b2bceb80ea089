//! Iteration-count widgets: a range slider and a numeric text box,
//! both optional, kept in sync with each other and the view state.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use mandelview_core::config::{ITER_SLIDER_ID, ITER_TEXT_ID};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlInputElement};

use crate::renderer::RenderBackend;
use crate::scheduler::FrameScheduler;
use crate::viewer::Viewer;

pub fn wire_iteration_widgets<B: RenderBackend + 'static>(
    document: &Document,
    viewer: &Rc<RefCell<Viewer<B>>>,
    scheduler: &Rc<FrameScheduler>,
) -> Result<(), JsValue> {
    let slider = input_by_id(document, ITER_SLIDER_ID);
    let text = input_by_id(document, ITER_TEXT_ID);

    if slider.is_none() && text.is_none() {
        debug!("no iteration widgets on this page");
        return Ok(());
    }

    // Both widgets show the startup value.
    let initial = viewer.borrow().state().iters.to_string();
    if let Some(slider) = &slider {
        slider.set_value(&initial);
    }
    if let Some(text) = &text {
        text.set_value(&initial);
    }

    if let Some(slider_el) = &slider {
        let viewer = Rc::clone(viewer);
        let scheduler = Rc::clone(scheduler);
        let source = slider_el.clone();
        let mirror = text.clone();
        let handler = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            let applied = viewer.borrow_mut().on_iters_input(&source.value());
            if let Some(mirror) = &mirror {
                mirror.set_value(&applied.to_string());
            }
            scheduler.request_draw();
        }) as Box<dyn Fn(web_sys::Event)>);
        slider_el.add_event_listener_with_callback("input", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    if let Some(text_el) = &text {
        let viewer = Rc::clone(viewer);
        let scheduler = Rc::clone(scheduler);
        let source = text_el.clone();
        let mirror = slider.clone();
        let handler = Closure::wrap(Box::new(move |_e: web_sys::Event| {
            let applied = viewer.borrow_mut().on_iters_input(&source.value());
            // Echo the clamped value so "2000" visibly becomes "1000".
            source.set_value(&applied.to_string());
            if let Some(mirror) = &mirror {
                mirror.set_value(&applied.to_string());
            }
            scheduler.request_draw();
        }) as Box<dyn Fn(web_sys::Event)>);
        text_el.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    Ok(())
}

fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<HtmlInputElement>()
        .ok()
}
