use std::cell::RefCell;
use std::rc::Rc;

use super::chat_state::ChatState;

/// Shared, single-threaded access to the chat state.
///
/// The web app backs it with a Dioxus `Signal` so writes re-render; the
/// terminal client and tests use `Rc<RefCell<_>>`. Both return `None` once
/// the backing state is gone (component unmounted).
pub trait StateHandle: Clone + 'static {
    fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> Option<R>;

    fn with_state_mut<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R>;
}

impl StateHandle for Rc<RefCell<ChatState>> {
    fn with_state<R>(&self, f: impl FnOnce(&ChatState) -> R) -> Option<R> {
        self.try_borrow().ok().map(|state| f(&state))
    }

    fn with_state_mut<R>(&self, f: impl FnOnce(&mut ChatState) -> R) -> Option<R> {
        self.try_borrow_mut().ok().map(|mut state| f(&mut state))
    }
}
