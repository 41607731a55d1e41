//! Client-side session state
//!
//! Every transition of the chat page lives here as a plain method so the
//! lifecycle can be tested without a browser. Async plumbing (HTTP, spawning)
//! sits in `ChatController`, which only ever calls into these methods.

use std::collections::BTreeMap;

use crate::domain::models::{
    Conversation, DocumentRef, Message, PdfFile, ASK_FAILURE_TEXT, UPLOAD_FAILURE_TEXT,
    UPLOAD_SUCCESS_TEXT,
};
use crate::shared::errors::ApiError;

/// Question taken from the input, waiting for its answer
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAsk {
    pub ticket: u64,
    pub generation: u64,
    pub question: String,
}

/// Upload accepted by `begin_upload`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadTicket {
    pub generation: u64,
}

/// Why a file selection did not start an upload
#[derive(Debug, Clone, PartialEq)]
pub enum UploadRejected {
    /// Upload already running or document already loaded
    Busy,
    /// File failed client-side validation; a failure notice was appended
    Invalid(ApiError),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    messages: Conversation,
    document: Option<DocumentRef>,
    input: String,
    is_uploading: bool,
    // Bumped on every reset; results carrying an older value are dropped
    generation: u64,
    next_ticket: u64,
    next_flush: u64,
    parked: BTreeMap<u64, Message>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &Conversation {
        &self.messages
    }

    pub fn document(&self) -> Option<&DocumentRef> {
        self.document.as_ref()
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    /// Questions sent whose answers are not in the list yet
    pub fn pending_answers(&self) -> u64 {
        self.next_ticket - self.next_flush
    }

    pub fn has_input(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Send control is live only with text and a loaded document
    pub fn can_send(&self) -> bool {
        self.has_input() && self.has_document()
    }

    /// Reset control is live only when there is something to clear
    pub fn can_reset(&self) -> bool {
        self.has_document() || self.messages.len() > 1
    }

    /// File picker is offered until a document is loaded
    pub fn is_picker_available(&self) -> bool {
        !self.has_document() && !self.is_uploading
    }

    /// Take the input as a question: append the user turn, clear the input.
    /// Returns `None` (and changes nothing) when sending is not allowed.
    pub fn begin_send(&mut self) -> Option<PendingAsk> {
        if !self.can_send() {
            return None;
        }

        let question = std::mem::take(&mut self.input);
        self.messages.push(Message::user(question.clone()));

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        Some(PendingAsk {
            ticket,
            generation: self.generation,
            question,
        })
    }

    /// Record the outcome of an ask. Answers are appended at the tail in
    /// ticket order; one that resolves early waits for its predecessors.
    /// Returns false when the ask belongs to a session that was reset.
    pub fn finish_ask(&mut self, pending: &PendingAsk, answer: Result<String, ApiError>) -> bool {
        if pending.generation != self.generation || pending.ticket < self.next_flush {
            return false;
        }

        let message = match answer {
            Ok(text) => Message::assistant(text),
            Err(_) => Message::assistant(ASK_FAILURE_TEXT),
        };
        self.parked.insert(pending.ticket, message);

        while let Some(message) = self.parked.remove(&self.next_flush) {
            self.messages.push(message);
            self.next_flush += 1;
        }

        true
    }

    /// Validate a picked file and raise the uploading flag
    pub fn begin_upload(&mut self, file: &PdfFile) -> Result<UploadTicket, UploadRejected> {
        if !self.is_picker_available() {
            return Err(UploadRejected::Busy);
        }

        if let Err(e) = file.validate() {
            self.messages.push(Message::assistant(UPLOAD_FAILURE_TEXT));
            return Err(UploadRejected::Invalid(e));
        }

        self.is_uploading = true;
        Ok(UploadTicket {
            generation: self.generation,
        })
    }

    /// A pick that could not even be read. Reported like a failed upload,
    /// unless the picker was not available to begin with.
    pub fn reject_selection(&mut self) -> bool {
        if !self.is_picker_available() {
            return false;
        }

        self.messages.push(Message::assistant(UPLOAD_FAILURE_TEXT));
        true
    }

    /// Lower the uploading flag and apply the outcome.
    /// A document that cannot be kept (session reset meanwhile) is handed back
    /// so the caller can release it.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<DocumentRef, ApiError>,
    ) -> Option<DocumentRef> {
        self.is_uploading = false;

        if ticket.generation != self.generation {
            return result.ok();
        }

        match result {
            Ok(document) => {
                self.document = Some(document);
                self.messages.push(Message::assistant(UPLOAD_SUCCESS_TEXT));
            }
            Err(_) => {
                self.messages.push(Message::assistant(UPLOAD_FAILURE_TEXT));
            }
        }

        None
    }

    /// Clear conversation and document together. Answers still in flight
    /// are discarded when they land. Returns the document to release.
    pub fn reset(&mut self) -> Option<DocumentRef> {
        self.messages.clear();
        self.parked.clear();
        self.generation += 1;
        self.next_flush = self.next_ticket;
        self.document.take()
    }
}
