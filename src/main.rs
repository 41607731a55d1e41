//! PDF Chat - web entry point
//!
//! Run with: dx serve --platform web
//! The backend location is baked in at build time through PDF_CHAT_API_URL.

use pdf_chat::app::App;

// WASM entry point (browser)
#[cfg(target_arch = "wasm32")]
fn main() {
    dioxus::launch(App);
}

// Native build of the same UI (renderer picked by the enabled dioxus feature)
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    dioxus::launch(App);
}
