pub mod chat_input;
pub mod chat_messages;
pub mod common;
pub mod document_panel;
pub mod message_item;
pub mod reset_button;

pub use chat_input::ChatInput;
pub use chat_messages::ChatMessages;
pub use common::{EmptyState, ErrorMessage, LoadingText};
pub use document_panel::DocumentPanel;
pub use message_item::{MessageItem, PendingAnswer};
pub use reset_button::ResetButton;
