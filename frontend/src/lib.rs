#![recursion_limit = "256"]

//! WebAssembly entry point for the report form.
//!
//! Hydrates the server-rendered page so the location field's autocomplete
//! and "use my location" button become live, and routes `log` output to the
//! browser console.

#[wasm_bindgen::prelude::wasm_bindgen]
/// Hydrates the application on the client-side.
///
/// Initializes `console_log` and `console_error_panic_hook`, then mounts
/// `app::component` over the server-rendered DOM.
pub fn hydrate() {
    use app::component;
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::hydrate_body(component);
}
