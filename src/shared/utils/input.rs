//! Pure helpers behind the message composer

/// Height cap of the auto-growing textarea, in CSS pixels
pub const MAX_TEXTAREA_HEIGHT_PX: f64 = 120.0;

/// Rendered size of the composer for a given content height
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextareaSize {
    pub height: f64,
    /// Content is taller than the cap and scrolls inside the textarea
    pub overflows: bool,
}

pub fn textarea_size(scroll_height: f64) -> TextareaSize {
    let scroll_height = scroll_height.max(0.0);
    TextareaSize {
        height: scroll_height.min(MAX_TEXTAREA_HEIGHT_PX),
        overflows: scroll_height > MAX_TEXTAREA_HEIGHT_PX,
    }
}

/// What a key press in the composer should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Let the textarea handle it
    Default,
    /// Prevent the newline and send
    Send,
    /// Prevent the newline, do nothing else
    Swallow,
}

/// Enter never inserts a newline, with or without modifiers: it sends when
/// a document is loaded and is swallowed otherwise. An Enter that commits an
/// IME composition is left to the input method.
pub fn key_action(is_enter: bool, composing: bool, has_document: bool) -> KeyAction {
    if !is_enter || composing {
        KeyAction::Default
    } else if has_document {
        KeyAction::Send
    } else {
        KeyAction::Swallow
    }
}
