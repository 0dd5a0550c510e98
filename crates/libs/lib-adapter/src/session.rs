//! # Session State
//!
//! The single connection state of a page session. Impossible combinations
//! (an account without a connection, a connection without a provider) cannot
//! be represented.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::error::AdapterError;

/// Coarse connection status, as the rendering layer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Disconnected => "disconnected",
            SessionStatus::Connecting => "connecting",
            SessionStatus::Connected => "connected",
            SessionStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Connection state with provider information
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting {
        provider: String,
    },
    /// `account` is `None` in degraded mode.
    Connected {
        provider: String,
        account: Option<String>,
    },
    Error {
        error: AdapterError,
    },
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionState::Disconnected => SessionStatus::Disconnected,
            SessionState::Connecting { .. } => SessionStatus::Connecting,
            SessionState::Connected { .. } => SessionStatus::Connected,
            SessionState::Error { .. } => SessionStatus::Error,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected { .. })
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, SessionState::Connecting { .. })
    }

    pub fn active_provider_id(&self) -> Option<&str> {
        match self {
            SessionState::Connecting { provider } | SessionState::Connected { provider, .. } => {
                Some(provider)
            }
            _ => None,
        }
    }

    pub fn account(&self) -> Option<&str> {
        match self {
            SessionState::Connected { account, .. } => account.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AdapterError> {
        match self {
            SessionState::Error { error } => Some(error),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(|e| e.to_string())
    }
}

/// Handle returned by [`Session::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Rc<dyn Fn(&SessionState)>;

/// Owner of the one mutable [`SessionState`] per page.
///
/// Only the negotiator replaces the state; everyone else reads snapshots or
/// registers an observer.
#[derive(Default)]
pub struct Session {
    state: RefCell<SessionState>,
    observers: RefCell<Vec<(ObserverId, Observer)>>,
    next_observer: Cell<u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self, observer: impl Fn(&SessionState) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer.get());
        self.next_observer.set(id.0 + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    /// Atomically swap in `next` and notify observers if it differs.
    pub(crate) fn replace(&self, next: SessionState) {
        let previous = self.state.replace(next.clone());
        if previous == next {
            tracing::trace!(status = %next.status(), "Session state unchanged");
            return;
        }

        tracing::info!(
            old_status = %previous.status(),
            new_status = %next.status(),
            provider = ?next.active_provider_id(),
            account = ?next.account(),
            error = ?next.error_message(),
            "Session state transition"
        );

        // Observers may read the session again; no borrow is held while they run.
        let observers: Vec<Observer> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer(&next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_disconnected() {
        let session = Session::new();
        let state = session.snapshot();
        assert_eq!(state.status(), SessionStatus::Disconnected);
        assert_eq!(state.active_provider_id(), None);
        assert_eq!(state.account(), None);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_state_accessors() {
        let connecting = SessionState::Connecting { provider: "leo".into() };
        assert_eq!(connecting.active_provider_id(), Some("leo"));
        assert_eq!(connecting.account(), None);

        let connected = SessionState::Connected {
            provider: "leo".into(),
            account: Some("aleo1xyz".into()),
        };
        assert!(connected.is_connected());
        assert_eq!(connected.account(), Some("aleo1xyz"));

        let failed = SessionState::Error {
            error: AdapterError::ProviderRejected("user rejected".into()),
        };
        assert_eq!(failed.active_provider_id(), None);
        assert_eq!(failed.error_message().as_deref(), Some("user rejected"));
    }

    #[test]
    fn test_observers_notified_on_change_only() {
        let session = Session::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |state| sink.borrow_mut().push(state.status()));

        session.replace(SessionState::Connecting { provider: "leo".into() });
        session.replace(SessionState::Connecting { provider: "leo".into() });
        session.replace(SessionState::Disconnected);

        assert_eq!(
            *seen.borrow(),
            vec![SessionStatus::Connecting, SessionStatus::Disconnected]
        );
    }

    #[test]
    fn test_observer_can_read_snapshot() {
        let session = Rc::new(Session::new());
        let reader = Rc::clone(&session);
        let seen = Rc::new(Cell::new(None));
        let sink = Rc::clone(&seen);
        session.subscribe(move |_| sink.set(Some(reader.snapshot().status())));

        session.replace(SessionState::Connected { provider: "puzzle".into(), account: None });
        assert_eq!(seen.get(), Some(SessionStatus::Connected));
    }

    #[test]
    fn test_unsubscribe() {
        let session = Session::new();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let id = session.subscribe(move |_| sink.set(sink.get() + 1));

        session.replace(SessionState::Connecting { provider: "leo".into() });
        assert!(session.unsubscribe(id));
        assert!(!session.unsubscribe(id));
        session.replace(SessionState::Disconnected);

        assert_eq!(count.get(), 1);
    }
}
