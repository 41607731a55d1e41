use dioxus::prelude::*;

use super::common::EmptyState;
use super::message_item::{MessageItem, PendingAnswer};
use crate::shared::hooks::use_chat;

/// Scroll container id
pub const CHAT_WINDOW_ID: &str = "chat-window";

#[component]
pub fn ChatMessages() -> Element {
    let chat = use_chat();
    let state = *chat.state();

    // Follow the tail whenever the list grows or shrinks
    let message_count = use_memo(move || state.read().messages().len());
    use_effect(move || {
        let _count = message_count();
        #[cfg(target_arch = "wasm32")]
        crate::shared::utils::dom::scroll_to_bottom(CHAT_WINDOW_ID);
    });

    let current = state.read();
    let pending = current.pending_answers();

    rsx! {
        div { id: CHAT_WINDOW_ID, class: "chat-messages",
            if current.messages().is_empty() {
                EmptyState {
                    icon: "📄".to_string(),
                    title: "Ask your document".to_string(),
                    description: "Upload a PDF, then ask questions about its content.".to_string(),
                }
            } else {
                ul { class: "chat-messages__list",
                    for (index, message) in current.messages().iter().enumerate() {
                        MessageItem { key: "{index}", message: message.clone() }
                    }
                    if pending > 0 {
                        PendingAnswer { count: pending }
                    }
                }
            }
        }
    }
}
