//! Message rendering component
//!
//! Displays individual turns in the conversation view

use dioxus::prelude::*;

use crate::domain::models::{Message, Role};
use crate::shared::utils::render_markdown;

/// Renders a single turn; user text stays verbatim, answers go through markdown
#[component]
pub fn MessageItem(message: Message) -> Element {
    let time_str = message.timestamp.format("%H:%M").to_string();

    match message.role {
        Role::User => rsx! {
            li { class: "c-chat-message c-chat-message--user animate-fade-in",
                div { class: "c-chat-bubble c-chat-bubble--user",
                    div { class: "c-chat-bubble__content",
                        div { class: "u-whitespace-pre-wrap", {message.text.clone()} }
                    }
                    span { class: "c-chat-bubble__timestamp", "{time_str}" }
                }
            }
        },
        Role::Assistant => {
            let html_content = render_markdown(&message.text);
            rsx! {
                li { class: "c-chat-message c-chat-message--assistant animate-fade-in",
                    div { class: "c-chat-bubble c-chat-bubble--assistant",
                        div { class: "c-chat-bubble__content",
                            div {
                                class: "c-prose c-prose--sm",
                                dangerous_inner_html: "{html_content}"
                            }
                        }
                        span { class: "c-chat-bubble__timestamp", "{time_str}" }
                    }
                }
            }
        }
    }
}

/// Typing indicator shown while answers are outstanding
#[component]
pub fn PendingAnswer(count: u64) -> Element {
    let label = if count > 1 {
        format!("Waiting for {} answers", count)
    } else {
        "Waiting for answer".to_string()
    };

    rsx! {
        li { class: "c-chat-message c-chat-message--assistant c-chat-message--pending",
            div { class: "c-chat-bubble c-chat-bubble--assistant", title: "{label}",
                span { class: "c-typing-dot" }
                span { class: "c-typing-dot" }
                span { class: "c-typing-dot" }
            }
        }
    }
}
