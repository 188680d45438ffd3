//! Web UI for url-peek
//!
//! A Yew-based page that pastes a URL from the clipboard and shows its
//! components.

mod app;
pub mod browser;
mod components;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}
