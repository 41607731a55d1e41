// Public API exports
pub mod config;
pub mod domain;
pub mod shared;

// Dioxus UI (web entry point)
pub mod app;
