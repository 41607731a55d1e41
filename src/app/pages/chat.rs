use dioxus::prelude::*;

use crate::app::components::{ChatInput, ChatMessages, DocumentPanel, ResetButton};
use crate::config::ClientConfig;
use crate::shared::hooks::use_pdf_chat;

/// Two-panel page: document on the left, conversation on the right.
/// Owns the session for as long as it is mounted.
#[component]
pub fn ChatPage(config: ClientConfig) -> Element {
    use_pdf_chat(config);

    rsx! {
        div { class: "c-layout",
            header { class: "c-layout__header",
                h1 { class: "c-layout__title", "📄 Chat with PDF" }
                ResetButton {}
            }
            div { class: "c-layout__body",
                DocumentPanel {}
                section { class: "chat-panel",
                    ChatMessages {}
                    ChatInput {}
                }
            }
        }
    }
}
