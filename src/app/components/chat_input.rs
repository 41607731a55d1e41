//! Composer: auto-growing textarea, Enter to send

use dioxus::prelude::*;

use crate::shared::hooks::use_chat;
use crate::shared::utils::{key_action, KeyAction};

pub const CHAT_INPUT_ID: &str = "chat-input";

#[component]
pub fn ChatInput() -> Element {
    let chat = use_chat();
    let mut state = *chat.state();
    let mut is_composing = use_signal(|| false);

    // Re-fit the textarea whenever its content changes
    let input_text = use_memo(move || state.read().input().to_string());
    use_effect(move || {
        let _text = input_text();
        #[cfg(target_arch = "wasm32")]
        crate::shared::utils::dom::resize_textarea(CHAT_INPUT_ID);
    });

    let send_chat = chat.clone();
    let submit = move || {
        let chat = send_chat.clone();
        spawn(async move {
            chat.send().await;
        });
    };

    let submit_on_enter = submit.clone();
    let handle_keypress = move |evt: Event<KeyboardData>| {
        let action = key_action(
            evt.key() == Key::Enter,
            *is_composing.read(),
            state.read().has_document(),
        );
        match action {
            KeyAction::Default => {}
            KeyAction::Send => {
                evt.prevent_default();
                submit_on_enter();
            }
            KeyAction::Swallow => evt.prevent_default(),
        }
    };

    let current = state.read();
    let can_send = current.can_send();
    let input_value = current.input().to_string();
    let placeholder = if current.has_document() {
        "Ask a question about the PDF... (Enter to send)"
    } else {
        "Upload a PDF to start asking questions"
    };
    let send_class = if can_send {
        "btn btn--send btn--icon-only"
    } else {
        "btn btn--send btn--icon-only btn--muted"
    };
    drop(current);

    let submit_on_click = submit;

    rsx! {
        div { id: "chat-input-container", class: "chat-input",
            textarea {
                id: CHAT_INPUT_ID,
                class: "chat-input__textarea",
                value: "{input_value}",
                placeholder: "{placeholder}",
                rows: "1",
                oninput: move |evt| {
                    state.write().set_input(evt.value());
                },
                onkeypress: handle_keypress,
                oncompositionstart: move |_| is_composing.set(true),
                oncompositionend: move |_| is_composing.set(false),
            }

            div { class: "chat-input__actions-row",
                div { class: "chat-input__right-actions",
                    button {
                        class: "{send_class}",
                        disabled: !can_send,
                        title: "Send",
                        onclick: move |_| {
                            if can_send {
                                submit_on_click();
                            }
                        },
                        span { class: "btn__icon", "➤" }
                    }
                }
            }
        }
    }
}
