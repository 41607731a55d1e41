//! Session lifecycle: upload, ask, and the two ways a session ends.

use std::rc::Rc;

use super::backend::ChatBackend;
use super::chat_state::{ChatState, UploadRejected};
use super::state_handle::StateHandle;
use crate::domain::models::{DocumentRef, PdfFile, SessionId};
use crate::shared::errors::ApiError;
use crate::shared::logging;

/// What happened to a send request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing to send or no document loaded; state untouched
    Ignored,
    Answered,
    /// Backend failed; the fixed error turn was appended
    Failed,
    /// Session was reset before the answer arrived
    Discarded,
}

/// What happened to a file selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Upload already running or a document is loaded
    Ignored,
    /// File refused before reaching the network
    Rejected,
    Uploaded,
    Failed,
    Discarded,
}

/// Drives one session: owns the session id and the backend, mutates the
/// shared state through a `StateHandle`.
pub struct ChatController<B, S> {
    backend: Rc<B>,
    state: S,
    session_id: SessionId,
}

impl<B, S: Clone> Clone for ChatController<B, S> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
            state: self.state.clone(),
            session_id: self.session_id.clone(),
        }
    }
}

impl<B, S> PartialEq for ChatController<B, S> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backend, &other.backend) && self.session_id == other.session_id
    }
}

impl<B: ChatBackend, S: StateHandle> ChatController<B, S> {
    /// Start a session with a fresh id
    pub fn new(backend: B, state: S) -> Self {
        Self::with_session(backend, state, SessionId::generate())
    }

    pub fn with_session(backend: B, state: S, session_id: SessionId) -> Self {
        logging::log_session_start(session_id.as_str());
        Self {
            backend: Rc::new(backend),
            state,
            session_id,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Send the current input as a question.
    ///
    /// The user turn is appended and the input cleared before the request
    /// goes out; the answer (or the fixed error turn) is appended when the
    /// request resolves.
    pub async fn send(&self) -> SendOutcome {
        let Some(pending) = self.state.with_state_mut(ChatState::begin_send).flatten() else {
            return SendOutcome::Ignored;
        };

        logging::log_ask_start(self.session_id.as_str(), pending.ticket, pending.question.len());

        let answer = self
            .backend
            .ask_question(&pending.question, &self.session_id)
            .await;

        match &answer {
            Ok(text) => logging::log_ask_success(self.session_id.as_str(), pending.ticket, text.len()),
            Err(e) => logging::log_ask_error(self.session_id.as_str(), pending.ticket, &e.to_string()),
        }

        let answered = answer.is_ok();
        match self.state.with_state_mut(|state| state.finish_ask(&pending, answer)) {
            Some(true) if answered => SendOutcome::Answered,
            Some(true) => SendOutcome::Failed,
            _ => {
                logging::log_stale_result(self.session_id.as_str(), "ask");
                SendOutcome::Discarded
            }
        }
    }

    /// Replace the input with `text` and send it
    pub async fn ask(&self, text: &str) -> SendOutcome {
        self.state.with_state_mut(|state| state.set_input(text));
        self.send().await
    }

    /// Upload a picked PDF; on success the document slot is filled
    pub async fn upload(&self, file: PdfFile) -> UploadOutcome {
        let ticket = match self.state.with_state_mut(|state| state.begin_upload(&file)) {
            Some(Ok(ticket)) => ticket,
            Some(Err(UploadRejected::Invalid(e))) => {
                logging::log_upload_rejected(self.session_id.as_str(), &file.name, &e.to_string());
                return UploadOutcome::Rejected;
            }
            Some(Err(UploadRejected::Busy)) | None => return UploadOutcome::Ignored,
        };

        logging::log_upload_start(self.session_id.as_str(), &file.name, file.size());

        let result = match self.backend.upload_file(&file).await {
            Ok(()) => DocumentRef::from_file(&file),
            Err(e) => Err(e),
        };

        match &result {
            Ok(_) => logging::log_upload_success(self.session_id.as_str(), &file.name),
            Err(e) => logging::log_upload_error(self.session_id.as_str(), &file.name, &e.to_string()),
        }

        let uploaded = result.is_ok();
        match self.state.with_state_mut(|state| state.finish_upload(ticket, result)) {
            Some(None) if uploaded => UploadOutcome::Uploaded,
            Some(None) => UploadOutcome::Failed,
            Some(Some(stale)) => {
                logging::log_stale_result(self.session_id.as_str(), "upload");
                stale.release();
                UploadOutcome::Discarded
            }
            None => UploadOutcome::Discarded,
        }
    }

    /// Report a picked file that could not be read into memory
    pub fn upload_unreadable(&self, file_name: &str, error: &ApiError) -> UploadOutcome {
        logging::log_upload_rejected(self.session_id.as_str(), file_name, &error.to_string());

        match self.state.with_state_mut(ChatState::reject_selection) {
            Some(true) => UploadOutcome::Rejected,
            _ => UploadOutcome::Ignored,
        }
    }

    /// Explicit reset control: inert unless there is something to clear
    pub async fn reset(&self) -> bool {
        if !self.state.with_state(ChatState::can_reset).unwrap_or(false) {
            return false;
        }

        self.end_session_graceful().await;
        true
    }

    /// Clear local state, then release backend resources.
    /// The local reset happens before the request goes out, so anything the
    /// user does while cleanup is pending survives it. Backend failure is
    /// only logged.
    pub async fn end_session_graceful(&self) {
        logging::log_cleanup_start(self.session_id.as_str());

        if let Some(Some(document)) = self.state.with_state_mut(ChatState::reset) {
            document.release();
        }

        match self.backend.cleanup().await {
            Ok(()) => logging::log_cleanup_success(self.session_id.as_str()),
            Err(e) => logging::log_cleanup_error(self.session_id.as_str(), &e.to_string()),
        }
    }

    /// Fire-and-forget cleanup for teardown; local state is left alone
    pub fn end_session_best_effort(&self) {
        logging::log_beacon(self.session_id.as_str());
        self.backend.cleanup_beacon();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{Role, ASK_FAILURE_TEXT, UPLOAD_FAILURE_TEXT, UPLOAD_SUCCESS_TEXT};
    use crate::shared::errors::Result;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Backend whose answers are fed by the test through oneshot channels
    #[derive(Default)]
    struct ScriptedBackend {
        uploads: RefCell<VecDeque<oneshot::Receiver<Result<()>>>>,
        answers: RefCell<VecDeque<oneshot::Receiver<Result<String>>>>,
        cleanups: RefCell<VecDeque<oneshot::Receiver<Result<()>>>>,
        cleanup_fails: RefCell<bool>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedBackend {
        fn upload_returns(&self, result: Result<()>) {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(result);
            self.uploads.borrow_mut().push_back(rx);
        }

        fn upload_later(&self) -> oneshot::Sender<Result<()>> {
            let (tx, rx) = oneshot::channel();
            self.uploads.borrow_mut().push_back(rx);
            tx
        }

        fn answer_returns(&self, result: Result<String>) {
            let (tx, rx) = oneshot::channel();
            let _ = tx.send(result);
            self.answers.borrow_mut().push_back(rx);
        }

        fn answer_later(&self) -> oneshot::Sender<Result<String>> {
            let (tx, rx) = oneshot::channel();
            self.answers.borrow_mut().push_back(rx);
            tx
        }

        fn cleanup_later(&self) -> oneshot::Sender<Result<()>> {
            let (tx, rx) = oneshot::channel();
            self.cleanups.borrow_mut().push_back(rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl ChatBackend for ScriptedBackend {
        async fn upload_file(&self, file: &PdfFile) -> Result<()> {
            self.calls.borrow_mut().push(format!("upload:{}", file.name));
            let rx = self.uploads.borrow_mut().pop_front().expect("unscripted upload");
            rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".to_string())))
        }

        async fn ask_question(&self, question: &str, session_id: &SessionId) -> Result<String> {
            self.calls.borrow_mut().push(format!("ask:{}:{}", session_id, question));
            let rx = self.answers.borrow_mut().pop_front().expect("unscripted ask");
            rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".to_string())))
        }

        async fn cleanup(&self) -> Result<()> {
            self.calls.borrow_mut().push("cleanup".to_string());
            let pending = self.cleanups.borrow_mut().pop_front();
            if let Some(rx) = pending {
                rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".to_string())))
            } else if *self.cleanup_fails.borrow() {
                Err(ApiError::Network("connection refused".to_string()))
            } else {
                Ok(())
            }
        }

        fn cleanup_beacon(&self) {
            self.calls.borrow_mut().push("beacon".to_string());
        }
    }

    type TestController = ChatController<ScriptedBackend, Rc<RefCell<ChatState>>>;

    fn controller() -> TestController {
        ChatController::with_session(
            ScriptedBackend::default(),
            Rc::new(RefCell::new(ChatState::new())),
            SessionId::from("session-1"),
        )
    }

    fn pdf(name: &str) -> PdfFile {
        PdfFile::new(name, "application/pdf", b"%PDF-1.4\n%%EOF".to_vec())
    }

    fn texts(controller: &TestController) -> Vec<String> {
        controller
            .state()
            .with_state(|s| s.messages().iter().map(|m| m.text.clone()).collect())
            .unwrap()
    }

    async fn loaded_controller() -> TestController {
        let controller = controller();
        controller.backend().upload_returns(Ok(()));
        assert_eq!(controller.upload(pdf("doc.pdf")).await, UploadOutcome::Uploaded);
        controller
    }

    #[tokio::test]
    async fn test_upload_then_ask_scenario() {
        let controller = loaded_controller().await;
        assert!(controller.state().with_state(|s| s.has_document()).unwrap());
        assert_eq!(texts(&controller), vec![UPLOAD_SUCCESS_TEXT]);

        controller.backend().answer_returns(Ok("It is a summary.".to_string()));
        let outcome = controller.ask("What is this about?").await;

        assert_eq!(outcome, SendOutcome::Answered);
        assert_eq!(
            texts(&controller),
            vec![UPLOAD_SUCCESS_TEXT, "What is this about?", "It is a summary."]
        );
        let roles: Vec<Role> = controller
            .state()
            .with_state(|s| s.messages().iter().map(|m| m.role).collect())
            .unwrap();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(
            controller.backend().calls(),
            vec!["upload:doc.pdf", "ask:session-1:What is this about?"]
        );
    }

    #[tokio::test]
    async fn test_blank_input_makes_no_call() {
        let controller = loaded_controller().await;

        for input in ["", "   ", "\n\t"] {
            assert_eq!(controller.ask(input).await, SendOutcome::Ignored);
        }

        assert_eq!(texts(&controller), vec![UPLOAD_SUCCESS_TEXT]);
        assert_eq!(controller.backend().calls(), vec!["upload:doc.pdf"]);
    }

    #[tokio::test]
    async fn test_send_without_document_is_inert() {
        let controller = controller();
        assert_eq!(controller.ask("Anyone there?").await, SendOutcome::Ignored);

        assert!(texts(&controller).is_empty());
        assert!(controller.backend().calls().is_empty());
        assert_eq!(controller.state().with_state(|s| s.input().to_string()).unwrap(), "Anyone there?");
    }

    #[tokio::test]
    async fn test_network_failure_appends_error_turn() {
        let controller = loaded_controller().await;
        let tx = controller.backend().answer_later();

        let send = controller.ask("Will this fail?");
        let check = async {
            // Input is cleared before the failure is known
            assert_eq!(controller.state().with_state(|s| s.input().to_string()).unwrap(), "");
            let _ = tx.send(Err(ApiError::Network("connection reset".to_string())));
        };
        let (outcome, ()) = futures::join!(send, check);

        assert_eq!(outcome, SendOutcome::Failed);
        assert_eq!(
            texts(&controller),
            vec![UPLOAD_SUCCESS_TEXT, "Will this fail?", ASK_FAILURE_TEXT]
        );
    }

    #[tokio::test]
    async fn test_each_question_precedes_its_answer_under_concurrency() {
        let controller = loaded_controller().await;
        let first_tx = controller.backend().answer_later();
        let second_tx = controller.backend().answer_later();

        let first = controller.ask("one");
        let second = controller.ask("two");
        let resolve = async {
            // Second answer lands first; it must wait for the first
            let _ = second_tx.send(Ok("answer two".to_string()));
            tokio::task::yield_now().await;
            let _ = first_tx.send(Ok("answer one".to_string()));
        };
        let (a, b, ()) = futures::join!(first, second, resolve);

        assert_eq!(a, SendOutcome::Answered);
        assert_eq!(b, SendOutcome::Answered);

        let messages = texts(&controller);
        let users = controller
            .state()
            .with_state(|s| s.messages().iter().filter(|m| m.is_user()).count())
            .unwrap();
        assert_eq!(users, 2);
        assert_eq!(messages.len(), 5);

        let pos = |text: &str| messages.iter().position(|m| m == text).unwrap();
        assert!(pos("one") < pos("answer one"));
        assert!(pos("two") < pos("answer two"));
        assert!(pos("answer one") < pos("answer two"));
    }

    #[tokio::test]
    async fn test_uploading_flag_tracks_in_flight_upload() {
        let controller = controller();
        assert!(!controller.state().with_state(|s| s.is_uploading()).unwrap());

        let tx = controller.backend().upload_later();
        let upload = controller.upload(pdf("doc.pdf"));
        let check = async {
            assert!(controller.state().with_state(|s| s.is_uploading()).unwrap());
            let _ = tx.send(Err(ApiError::Status {
                status: 500,
                body: "boom".to_string(),
            }));
        };
        let (outcome, ()) = futures::join!(upload, check);

        assert_eq!(outcome, UploadOutcome::Failed);
        controller
            .state()
            .with_state(|s| {
                assert!(!s.is_uploading());
                assert!(!s.has_document());
                assert!(s.is_picker_available());
            })
            .unwrap();
        assert_eq!(texts(&controller), vec![UPLOAD_FAILURE_TEXT]);
    }

    #[tokio::test]
    async fn test_retry_after_failed_upload() {
        let controller = controller();
        controller.backend().upload_returns(Err(ApiError::Timeout(1000)));
        assert_eq!(controller.upload(pdf("doc.pdf")).await, UploadOutcome::Failed);

        controller.backend().upload_returns(Ok(()));
        assert_eq!(controller.upload(pdf("doc.pdf")).await, UploadOutcome::Uploaded);
        assert_eq!(texts(&controller), vec![UPLOAD_FAILURE_TEXT, UPLOAD_SUCCESS_TEXT]);
    }

    #[tokio::test]
    async fn test_picker_unreachable_after_upload() {
        let controller = loaded_controller().await;
        assert_eq!(controller.upload(pdf("other.pdf")).await, UploadOutcome::Ignored);
        assert_eq!(controller.backend().calls(), vec!["upload:doc.pdf"]);
    }

    #[tokio::test]
    async fn test_invalid_file_never_reaches_backend() {
        let controller = controller();
        let file = PdfFile::new("notes.txt", "text/plain", b"hello".to_vec());
        assert_eq!(controller.upload(file).await, UploadOutcome::Rejected);
        assert!(controller.backend().calls().is_empty());
        assert_eq!(texts(&controller), vec![UPLOAD_FAILURE_TEXT]);
    }

    #[tokio::test]
    async fn test_unreadable_pick_reports_upload_failure() {
        let controller = controller();
        let error = ApiError::Browser("NotReadableError".to_string());

        assert_eq!(controller.upload_unreadable("doc.pdf", &error), UploadOutcome::Rejected);
        assert_eq!(texts(&controller), vec![UPLOAD_FAILURE_TEXT]);
        assert!(controller.backend().calls().is_empty());

        // The picker stays usable for a retry
        controller.backend().upload_returns(Ok(()));
        assert_eq!(controller.upload(pdf("doc.pdf")).await, UploadOutcome::Uploaded);

        assert_eq!(controller.upload_unreadable("other.pdf", &error), UploadOutcome::Ignored);
        assert_eq!(texts(&controller), vec![UPLOAD_FAILURE_TEXT, UPLOAD_SUCCESS_TEXT]);
    }

    #[tokio::test]
    async fn test_cleanup_resets_even_when_backend_fails() {
        let controller = loaded_controller().await;
        controller.backend().answer_returns(Ok("a".to_string()));
        controller.ask("q").await;
        *controller.backend().cleanup_fails.borrow_mut() = true;

        controller.end_session_graceful().await;

        controller
            .state()
            .with_state(|s| {
                assert!(s.messages().is_empty());
                assert!(!s.has_document());
            })
            .unwrap();
        assert_eq!(controller.backend().calls().last().unwrap(), "cleanup");
    }

    #[tokio::test]
    async fn test_cleanup_twice_is_idempotent() {
        let controller = loaded_controller().await;

        controller.end_session_graceful().await;
        let after_first = controller.state().with_state(|s| s.clone()).unwrap();
        controller.end_session_graceful().await;
        let after_second = controller.state().with_state(|s| s.clone()).unwrap();

        assert_eq!(after_first.messages(), after_second.messages());
        assert_eq!(after_first.document(), after_second.document());
        assert!(after_second.messages().is_empty());
        assert!(after_second.document().is_none());
    }

    #[tokio::test]
    async fn test_reset_control_is_inert_when_nothing_to_clear() {
        let controller = controller();
        assert!(!controller.reset().await);
        assert!(controller.backend().calls().is_empty());

        let controller = loaded_controller().await;
        assert!(controller.reset().await);
        assert_eq!(controller.backend().calls(), vec!["upload:doc.pdf", "cleanup"]);
    }

    #[tokio::test]
    async fn test_upload_while_cleanup_pending_is_kept() {
        let controller = controller();
        for _ in 0..2 {
            controller.backend().upload_returns(Err(ApiError::Timeout(1000)));
            assert_eq!(controller.upload(pdf("bad.pdf")).await, UploadOutcome::Failed);
        }
        let release = controller.backend().cleanup_later();
        controller.backend().upload_returns(Ok(()));

        let reset = controller.reset();
        let upload = async {
            // Local state is already clear while the backend call hangs
            assert!(texts(&controller).is_empty());
            let outcome = controller.upload(pdf("doc.pdf")).await;
            let _ = release.send(Ok(()));
            outcome
        };
        let (reset_ran, outcome) = futures::join!(reset, upload);

        assert!(reset_ran);
        assert_eq!(outcome, UploadOutcome::Uploaded);
        assert!(controller.state().with_state(|s| s.has_document()).unwrap());
        assert_eq!(texts(&controller), vec![UPLOAD_SUCCESS_TEXT]);
        assert_eq!(
            controller.backend().calls(),
            vec!["upload:bad.pdf", "upload:bad.pdf", "cleanup", "upload:doc.pdf"]
        );
    }

    #[tokio::test]
    async fn test_answer_arriving_after_cleanup_is_dropped() {
        let controller = loaded_controller().await;
        let tx = controller.backend().answer_later();

        let send = controller.ask("slow question");
        let cleanup = async {
            controller.end_session_graceful().await;
            let _ = tx.send(Ok("late answer".to_string()));
        };
        let (outcome, ()) = futures::join!(send, cleanup);

        assert_eq!(outcome, SendOutcome::Discarded);
        assert!(texts(&controller).is_empty());
    }

    #[tokio::test]
    async fn test_best_effort_leaves_state_alone() {
        let controller = loaded_controller().await;
        controller.end_session_best_effort();

        assert_eq!(controller.backend().calls(), vec!["upload:doc.pdf", "beacon"]);
        assert!(controller.state().with_state(|s| s.has_document()).unwrap());
        assert_eq!(texts(&controller), vec![UPLOAD_SUCCESS_TEXT]);
    }
}
