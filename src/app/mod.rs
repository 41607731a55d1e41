use dioxus::prelude::*;

use crate::app::components::ErrorMessage;
use crate::app::pages::ChatPage;
use crate::config::ClientConfig;

pub mod components;
pub mod pages;

#[component]
pub fn App() -> Element {
    const BUNDLE_CSS: Asset = asset!("/assets/dist/bundle.css");

    // Resolved once; a bad build-time value replaces the app with an error panel
    let config = use_hook(ClientConfig::from_build_env);

    rsx! {
        document::Link { rel: "stylesheet", href: BUNDLE_CSS }
        {match config {
            Ok(config) => rsx! { ChatPage { config } },
            Err(e) => rsx! {
                ErrorMessage { message: format!("Invalid client configuration: {}", e) }
            },
        }}
    }
}
