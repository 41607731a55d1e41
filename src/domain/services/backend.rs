use async_trait::async_trait;

use crate::domain::models::{PdfFile, SessionId};
use crate::shared::errors::Result;

/// The four requests the client makes against the PDF-chat backend.
///
/// Futures are not `Send`: the browser implementation holds JS handles.
#[async_trait(?Send)]
pub trait ChatBackend {
    /// `POST /upload_file` (multipart); response body ignored
    async fn upload_file(&self, file: &PdfFile) -> Result<()>;

    /// `POST /ask_question`; returns the `answer` field
    async fn ask_question(&self, question: &str, session_id: &SessionId) -> Result<String>;

    /// `POST /cleanup`, awaited
    async fn cleanup(&self) -> Result<()>;

    /// `POST /cleanup` dispatched without waiting; must not block teardown
    fn cleanup_beacon(&self);
}
