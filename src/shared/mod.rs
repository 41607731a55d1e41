pub mod errors;
pub mod logging;
pub mod services;
pub mod utils;

// Dioxus hooks (web app)
pub mod hooks;
