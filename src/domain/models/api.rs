use serde::{Deserialize, Serialize};

use super::session::SessionId;

/// Body of `POST /ask_question`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub session_id: SessionId,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, session_id: SessionId) -> Self {
        Self {
            question: question.into(),
            session_id,
        }
    }
}

/// Successful answer from `POST /ask_question`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}
