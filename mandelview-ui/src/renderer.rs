//! Binding to the external rendering module.
//!
//! The module does all fractal computation and drawing; this crate only
//! pushes camera parameters into it and asks it to draw. The host page
//! loads the module and exposes its `FractalEngine` class on the global
//! scope before calling [`crate::start`].

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// The rendering module surface consumed by the input glue.
///
/// Mirrors the engine's JS contract one-to-one: property writes push
/// the mutated camera fields, `refresh_*` fold them into the engine's
/// internal representation, `draw` renders the current state. Receivers
/// are shared because the concrete backend is a JS handle; native
/// implementations use interior mutability.
pub trait RenderBackend {
    fn set_zoom(&self, zoom: f64);
    fn set_position(&self, x_pos: f64, y_pos: f64);
    fn set_iters(&self, iters: u32);
    fn refresh_zoom(&self);
    fn refresh_position(&self);
    fn refresh_iters(&self);
    fn resize_viewport(&self);
    fn draw(&self);
}

#[wasm_bindgen]
extern "C" {
    /// Opaque handle to the rendering engine. Failures inside the
    /// engine are its own concern; nothing here inspects them.
    pub type FractalEngine;

    /// Construct the engine against the drawable surface. Shader
    /// sources are passed through verbatim; omitted camera values fall
    /// back to the engine's defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: &HtmlCanvasElement,
        vert_src: &str,
        frag_src: &str,
        zoom: Option<f64>,
        x_pos: Option<f64>,
        y_pos: Option<f64>,
        iters: Option<u32>,
    ) -> FractalEngine;

    #[wasm_bindgen(method, setter)]
    fn set_zoom(this: &FractalEngine, value: f64);

    #[wasm_bindgen(method, setter)]
    fn set_x_pos(this: &FractalEngine, value: f64);

    #[wasm_bindgen(method, setter)]
    fn set_y_pos(this: &FractalEngine, value: f64);

    #[wasm_bindgen(method, setter)]
    fn set_iters(this: &FractalEngine, value: u32);

    #[wasm_bindgen(method)]
    fn draw(this: &FractalEngine);

    #[wasm_bindgen(method)]
    fn resize_viewport(this: &FractalEngine);

    #[wasm_bindgen(method)]
    fn refresh_zoom(this: &FractalEngine);

    #[wasm_bindgen(method)]
    fn refresh_position(this: &FractalEngine);

    #[wasm_bindgen(method)]
    fn refresh_iters(this: &FractalEngine);
}

impl RenderBackend for FractalEngine {
    fn set_zoom(&self, zoom: f64) {
        FractalEngine::set_zoom(self, zoom);
    }

    fn set_position(&self, x_pos: f64, y_pos: f64) {
        FractalEngine::set_x_pos(self, x_pos);
        FractalEngine::set_y_pos(self, y_pos);
    }

    fn set_iters(&self, iters: u32) {
        FractalEngine::set_iters(self, iters);
    }

    fn refresh_zoom(&self) {
        FractalEngine::refresh_zoom(self);
    }

    fn refresh_position(&self) {
        FractalEngine::refresh_position(self);
    }

    fn refresh_iters(&self) {
        FractalEngine::refresh_iters(self);
    }

    fn resize_viewport(&self) {
        FractalEngine::resize_viewport(self);
    }

    fn draw(&self) {
        FractalEngine::draw(self);
    }
}
