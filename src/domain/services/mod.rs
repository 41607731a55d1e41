// Business logic services
// Framework-agnostic, 100% testable

pub mod backend;
pub mod chat_controller;
pub mod chat_state;
pub mod state_handle;

pub use backend::ChatBackend;
pub use chat_controller::{ChatController, SendOutcome, UploadOutcome};
pub use chat_state::{ChatState, PendingAsk, UploadRejected, UploadTicket};
pub use state_handle::StateHandle;
