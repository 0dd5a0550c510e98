//! # Connection Negotiator
//!
//! The only writer of [`SessionState`]. Each transition (`connect`,
//! `disconnect`, `reconcile`) takes a turn on a single async lock, so a
//! transition started while another is pending queues behind it instead of
//! interleaving at `await` points.
//!
//! ## Method Negotiation
//!
//! | Action     | Candidates (priority order)                               |
//! |------------|-----------------------------------------------------------|
//! | connect    | `connect`, `requestAccounts`, `enable`                    |
//! | account    | `getAccount`, `getAddress`, first entry of `accounts`     |
//! | disconnect | `disconnect`, `logout` (absence is not an error)          |
//!
//! ## Failure Policy
//!
//! Connect failures end in [`SessionState::Error`]; nothing propagates to the
//! caller. Disconnect always resets the local session, whatever the provider
//! does. There is no timeout: a provider call that never settles keeps the
//! session in `Connecting` and holds the turn.

use std::rc::Rc;

use futures::lock::Mutex;

use crate::capability::{first_available, CONNECT_METHODS, DISCONNECT_METHODS};
use crate::error::{AdapterError, Result};
use crate::prober::{lookup_account, CapabilityProber};
use crate::session::{Session, SessionState};

pub struct ConnectionNegotiator {
    prober: CapabilityProber,
    session: Rc<Session>,
    turn: Mutex<()>,
}

impl ConnectionNegotiator {
    pub fn new(prober: CapabilityProber, session: Rc<Session>) -> Self {
        Self {
            prober,
            session,
            turn: Mutex::new(()),
        }
    }

    pub fn prober(&self) -> &CapabilityProber {
        &self.prober
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Connect to `provider_id`, returning the resulting snapshot.
    ///
    /// The session passes through `Connecting` and always leaves it, either
    /// to `Connected` (possibly without an account) or to `Error`.
    pub async fn connect(&self, provider_id: &str) -> SessionState {
        let _turn = self.turn.lock().await;

        tracing::info!(provider = %provider_id, "Attempting to connect to {} wallet", provider_id);
        self.session.replace(SessionState::Connecting {
            provider: provider_id.to_string(),
        });
        let guard = ConnectingGuard::new(&self.session, provider_id);

        let next = match self.negotiate_connect(provider_id).await {
            Ok(account) => SessionState::Connected {
                provider: provider_id.to_string(),
                account,
            },
            Err(error) => {
                tracing::error!(provider = %provider_id, kind = ?error.kind(), error = %error, "Failed to connect wallet");
                SessionState::Error { error }
            }
        };

        guard.disarm();
        self.session.replace(next);
        self.session.snapshot()
    }

    async fn negotiate_connect(&self, provider_id: &str) -> Result<Option<String>> {
        let capability = self.prober.capability(provider_id)?;

        let method = first_available(capability.as_ref(), CONNECT_METHODS).ok_or_else(|| {
            AdapterError::CapabilityMissing {
                provider: provider_id.to_string(),
            }
        })?;

        tracing::debug!(provider = %provider_id, method = method.js_name(), "Invoking connect method");
        capability
            .call(method)
            .await
            .map_err(|fault| AdapterError::rejected(provider_id, fault))?;

        // a rejecting lookup fails the connect; a missing one only degrades it
        let account = lookup_account(provider_id, capability.as_ref())
            .await
            .map_err(|fault| AdapterError::rejected(provider_id, fault))?;
        if account.is_none() {
            tracing::warn!(provider = %provider_id, "Connected without an account address (degraded mode)");
        }
        Ok(account)
    }

    /// Disconnect the active provider and reset the session.
    ///
    /// No-op without an active provider. The reset happens even when the
    /// provider has no disconnect method, has vanished, or rejects.
    pub async fn disconnect(&self) -> SessionState {
        let _turn = self.turn.lock().await;

        let snapshot = self.session.snapshot();
        let provider_id = match snapshot.active_provider_id() {
            Some(id) => id.to_string(),
            None => {
                tracing::debug!("Disconnect requested with no active wallet");
                return snapshot;
            }
        };

        match self.prober.capability(&provider_id) {
            Ok(capability) => match first_available(capability.as_ref(), DISCONNECT_METHODS) {
                Some(method) => {
                    tracing::debug!(provider = %provider_id, method = method.js_name(), "Invoking disconnect method");
                    if let Err(fault) = capability.call(method).await {
                        tracing::warn!(provider = %provider_id, error = %fault, "Error disconnecting wallet");
                    }
                }
                None => {
                    tracing::debug!(provider = %provider_id, "No disconnect method, resetting local session only");
                }
            },
            Err(error) => {
                tracing::debug!(provider = %provider_id, error = %error, "Active wallet no longer available");
            }
        }

        self.session.replace(SessionState::Disconnected);
        self.session.snapshot()
    }

    /// Adopt the first present provider that reports an existing session.
    ///
    /// Registry order breaks ties. When no provider is connected the session
    /// is left as it is: reconcile never disconnects.
    pub async fn reconcile(&self) -> SessionState {
        let _turn = self.turn.lock().await;

        for provider_id in self.prober.detect_present() {
            if self.prober.is_connected(&provider_id).await {
                let account = self.prober.fetch_account(&provider_id).await;
                tracing::debug!(provider = %provider_id, "Adopting connected wallet");
                self.session.replace(SessionState::Connected {
                    provider: provider_id,
                    account,
                });
                return self.session.snapshot();
            }
        }

        tracing::debug!("No connected wallet found, session unchanged");
        self.session.snapshot()
    }
}

/// Moves the session out of `Connecting` if a connect future is dropped
/// before it settles.
struct ConnectingGuard<'a> {
    session: &'a Session,
    provider: &'a str,
    armed: bool,
}

impl<'a> ConnectingGuard<'a> {
    fn new(session: &'a Session, provider: &'a str) -> Self {
        Self {
            session,
            provider,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.session.snapshot().is_connecting() {
            tracing::warn!(provider = %self.provider, "Connect attempt dropped before completion");
            self.session.replace(SessionState::Error {
                error: AdapterError::Interrupted(self.provider.to_string()),
            });
        }
    }
}
