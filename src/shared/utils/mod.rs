// Utility functions
// Composer sizing, markdown, browser helpers

pub mod input;
pub mod markdown;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use input::{key_action, textarea_size, KeyAction, TextareaSize, MAX_TEXTAREA_HEIGHT_PX};
pub use markdown::render_markdown;
