//! Structured logging for the PDF chat client
//!
//! Provides consistent, contextual logging across the session lifecycle.
//! Every event carries an `operation` field and the session id.

/// Lifecycle operations that emit log events
#[derive(Debug, Clone, Copy)]
pub enum LogOperation {
    Session,
    Upload,
    Ask,
    Cleanup,
    Beacon,
}

impl LogOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOperation::Session => "session",
            LogOperation::Upload => "upload",
            LogOperation::Ask => "ask",
            LogOperation::Cleanup => "cleanup",
            LogOperation::Beacon => "beacon",
        }
    }
}

/// Install the stderr subscriber (native client only).
/// `RUST_LOG` overrides the default `info` level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log session creation
pub fn log_session_start(session_id: &str) {
    tracing::info!(
        operation = LogOperation::Session.as_str(),
        session_id = session_id,
        "Session started"
    );
}

/// Log a file refused before upload
pub fn log_upload_rejected(session_id: &str, file_name: &str, error: &str) {
    tracing::warn!(
        operation = LogOperation::Upload.as_str(),
        session_id = session_id,
        file_name = file_name,
        error = error,
        "Rejected file before upload"
    );
}

/// Log upload start
pub fn log_upload_start(session_id: &str, file_name: &str, size_bytes: usize) {
    tracing::info!(
        operation = LogOperation::Upload.as_str(),
        session_id = session_id,
        file_name = file_name,
        size_bytes = size_bytes,
        "Uploading document"
    );
}

/// Log upload success
pub fn log_upload_success(session_id: &str, file_name: &str) {
    tracing::info!(
        operation = LogOperation::Upload.as_str(),
        session_id = session_id,
        file_name = file_name,
        "Document uploaded"
    );
}

/// Log upload failure
pub fn log_upload_error(session_id: &str, file_name: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::Upload.as_str(),
        session_id = session_id,
        file_name = file_name,
        error = error,
        "Error uploading file"
    );
}

/// Log question dispatch
pub fn log_ask_start(session_id: &str, ticket: u64, question_len: usize) {
    tracing::debug!(
        operation = LogOperation::Ask.as_str(),
        session_id = session_id,
        ticket = ticket,
        question_len = question_len,
        "Sending question"
    );
}

/// Log answer received
pub fn log_ask_success(session_id: &str, ticket: u64, answer_len: usize) {
    tracing::debug!(
        operation = LogOperation::Ask.as_str(),
        session_id = session_id,
        ticket = ticket,
        answer_len = answer_len,
        "Answer received"
    );
}

/// Log failed question
pub fn log_ask_error(session_id: &str, ticket: u64, error: &str) {
    tracing::error!(
        operation = LogOperation::Ask.as_str(),
        session_id = session_id,
        ticket = ticket,
        error = error,
        "Error sending message"
    );
}

/// Log a result that arrived after the session was reset
pub fn log_stale_result(session_id: &str, kind: &str) {
    tracing::debug!(
        session_id = session_id,
        result_kind = kind,
        "Dropped result from before reset"
    );
}

/// Log cleanup start
pub fn log_cleanup_start(session_id: &str) {
    tracing::info!(
        operation = LogOperation::Cleanup.as_str(),
        session_id = session_id,
        "Cleaning up session"
    );
}

/// Log cleanup success
pub fn log_cleanup_success(session_id: &str) {
    tracing::debug!(
        operation = LogOperation::Cleanup.as_str(),
        session_id = session_id,
        "Backend cleanup completed"
    );
}

/// Log cleanup failure (never shown to the user)
pub fn log_cleanup_error(session_id: &str, error: &str) {
    tracing::error!(
        operation = LogOperation::Cleanup.as_str(),
        session_id = session_id,
        error = error,
        "Error during cleanup"
    );
}

/// Log best-effort cleanup dispatch
pub fn log_beacon(session_id: &str) {
    tracing::info!(
        operation = LogOperation::Beacon.as_str(),
        session_id = session_id,
        "Dispatching best-effort cleanup"
    );
}
