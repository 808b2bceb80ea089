mod app;
mod events;
mod renderer;
mod scheduler;
mod viewer;
mod widgets;

pub use renderer::{FractalEngine, RenderBackend};
pub use scheduler::FrameScheduler;
pub use viewer::Viewer;

use log::Level;
use mandelview_core::ViewConfig;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn initialize() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let _ = console_log::init_with_level(if cfg!(debug_assertions) {
        Level::Debug
    } else {
        Level::Error
    });
}

/// Entry point called by the host page once the rendering module is
/// loaded. Fails loudly when the drawable surface is missing.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    app::boot(ViewConfig::default())
}
