use dioxus::prelude::*;

use crate::config::ClientConfig;
use crate::domain::services::{ChatController, ChatState, StateHandle};
use crate::shared::services::ApiService;

/// Controller type the UI components share through context
pub type PdfChat = ChatController<ApiService, Signal<ChatState>>;

// `try_*` so late async completions become no-ops once the owning
// component is gone.
impl StateHandle for Signal<ChatState> {
    fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> Option<R> {
        self.try_read().ok().map(|state| f(&state))
    }

    fn with_state_mut<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R> {
        let mut signal = *self;
        signal.try_write().ok().map(|mut state| f(&mut state))
    }
}

/// Session hook: one controller per mounted chat.
///
/// Wires page unload to best-effort cleanup and unmount to graceful
/// cleanup, then provides the controller to descendants.
pub fn use_pdf_chat(config: ClientConfig) -> PdfChat {
    let state = use_signal(ChatState::new);
    let chat = use_hook(move || ChatController::new(ApiService::new(config), state));

    #[cfg(target_arch = "wasm32")]
    {
        let beacon_chat = chat.clone();
        use_hook(move || {
            std::rc::Rc::new(crate::shared::utils::dom::BeforeUnloadGuard::register(
                move || beacon_chat.end_session_best_effort(),
            ))
        });

        let unmount_chat = chat.clone();
        use_drop(move || {
            wasm_bindgen_futures::spawn_local(async move {
                unmount_chat.end_session_graceful().await;
            });
        });
    }

    use_context_provider(|| chat.clone())
}

/// Controller provided by the nearest `use_pdf_chat`
pub fn use_chat() -> PdfChat {
    use_context::<PdfChat>()
}
