// Custom Dioxus hooks
pub mod use_pdf_chat;

pub use use_pdf_chat::{use_chat, use_pdf_chat, PdfChat};
