//! Left panel: PDF picker until a document is loaded, then the viewer

use dioxus::prelude::*;

use super::common::LoadingText;
use crate::domain::models::DOCUMENT_ACCEPT;
use crate::shared::hooks::use_chat;

pub const PDF_INPUT_ID: &str = "pdf-upload-input";

#[component]
pub fn DocumentPanel() -> Element {
    let chat = use_chat();
    let state = *chat.state();

    let current = state.read();
    let viewer = current
        .document()
        .map(|document| (document.viewer_src(), document.file_name.clone()));
    let is_uploading = current.is_uploading();
    let picker_available = current.is_picker_available();
    drop(current);

    let on_pick = move |_evt: Event<FormData>| {
        #[cfg(target_arch = "wasm32")]
        {
            let chat = chat.clone();
            spawn(async move {
                use crate::shared::utils::dom;

                match dom::take_selected_file(PDF_INPUT_ID) {
                    Ok(Some(picked)) => match dom::read_file(&picked).await {
                        Ok(file) => {
                            chat.upload(file).await;
                        }
                        Err(e) => {
                            chat.upload_unreadable(&picked.name(), &e);
                        }
                    },
                    Ok(None) => {}
                    Err(e) => {
                        chat.upload_unreadable("", &e);
                    }
                }
            });
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = &chat;
    };

    rsx! {
        section { class: "document-panel",
            {match viewer {
                Some((src, file_name)) => rsx! {
                    iframe {
                        class: "document-panel__viewer",
                        src: "{src}",
                        title: "{file_name}",
                    }
                },
                None if is_uploading => rsx! {
                    LoadingText { message: "Uploading PDF...".to_string() }
                },
                None => rsx! {
                    label { r#for: PDF_INPUT_ID, class: "document-panel__picker",
                        span { class: "document-panel__picker-icon", "📄" }
                        span { class: "document-panel__picker-text", "Click to upload a PDF" }
                    }
                    input {
                        id: PDF_INPUT_ID,
                        class: "document-panel__input",
                        r#type: "file",
                        accept: DOCUMENT_ACCEPT,
                        disabled: !picker_available,
                        onchange: on_pick,
                    }
                },
            }}
        }
    }
}
