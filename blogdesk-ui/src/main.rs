//! Blogdesk Console
//!
//! Browser admin console for the categories and blogs of the apikeeda
//! service, built with Leptos (WASM).
//!
//! # Features
//!
//! - Sign in with email and password
//! - Category list with debounced search and in-place delete
//! - Category create and rename forms
//! - Read-only blog card grid
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It talks to the apikeeda REST API directly over HTTP and
//! keeps the session in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
