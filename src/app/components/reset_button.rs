use dioxus::prelude::*;

use crate::shared::hooks::use_chat;

/// Clears the document and the conversation, releasing the backend session.
/// Uses CSS classes: c-reset-btn, c-reset-btn--busy
#[component]
pub fn ResetButton() -> Element {
    let chat = use_chat();
    let state = *chat.state();
    let mut is_resetting = use_signal(|| false);

    let enabled = state.read().can_reset() && !*is_resetting.read();
    let btn_class = if *is_resetting.read() {
        "c-reset-btn c-reset-btn--busy"
    } else {
        "c-reset-btn"
    };

    rsx! {
        button {
            class: "{btn_class}",
            disabled: !enabled,
            title: "Clear document and conversation",
            onclick: move |_| {
                if !enabled {
                    return;
                }
                let chat = chat.clone();
                is_resetting.set(true);
                spawn(async move {
                    chat.reset().await;
                    is_resetting.set(false);
                });
            },
            span { class: "c-reset-btn__icon", "🗑️" }
            span { class: "c-reset-btn__label", "Reset" }
        }
    }
}
