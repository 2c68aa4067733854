//! Legal Assistant Web
//!
//! Chat front end for the legal provision search service, built with Leptos
//! (WASM).
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It posts questions to the search service over HTTP and
//! renders the returned citations with the formatter shared with the
//! terminal client.
//!
//! # Configuration
//!
//! - `localStorage["legal_assistant_api_url"]`: service base URL
//!   (default `http://127.0.0.1:8000`)
//! - `localStorage["legal_assistant_api_key"]`, or `LEGAL_ASSISTANT_API_KEY`
//!   at build time: access key
//! - `localStorage["theme"]`: `light` or `dark`

use leptos::*;

mod api;
mod app;
mod components;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
