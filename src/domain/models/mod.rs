// Domain models (business entities)
// Pure Rust, no framework dependencies

pub mod api;
pub mod document;
pub mod message;
pub mod session;

pub use api::{AskRequest, AskResponse};
pub use document::{DocumentRef, PdfFile, DOCUMENT_ACCEPT, SUPPORTED_DOCUMENT_TYPES, UPLOAD_FIELD_NAME};
pub use message::{Conversation, Message, Role, ASK_FAILURE_TEXT, UPLOAD_FAILURE_TEXT, UPLOAD_SUCCESS_TEXT};
pub use session::SessionId;
