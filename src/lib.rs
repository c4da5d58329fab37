//! # storefront
//!
//! Leptos + WASM storefront client. Renders product listings, product
//! detail/edit views, auth forms and a profile manager on top of a remote
//! REST backend.
//!
//! The crate is split so the session lifecycle can be exercised natively:
//! `session` owns token persistence and the auth operations, `net` owns the
//! request wrapper and product endpoints, `state` owns the reducer-driven
//! store. `app`, `pages` and `components` are thin browser glue on top.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

/// WASM entry point: installs console logging and mounts the root component.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
