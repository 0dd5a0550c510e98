//! # Change Listener
//!
//! Turns ambient page signals into adapter work:
//!
//! - **Ready** (one-shot, after initial load) → detect providers, then reconcile
//! - **ProviderChanged** (any number of times) → reconcile
//!
//! Signal handlers only enqueue; a single [`ListenerTask`] drains the queue
//! and runs one transition at a time. Hosts spawn `ListenerTask::run` on
//! their executor and call [`ChangeListener::teardown`] when the page goes away.

use async_channel::{Receiver, Sender};

use crate::adapter::WalletAdapter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Ready,
    ProviderChanged,
}

/// Something that can deliver [`Signal`]s, e.g. DOM events on `window`.
pub trait SignalSource {
    /// Register `handler` for `signal`. Dropping the returned
    /// [`Subscription`] must unregister it.
    fn subscribe(&self, signal: Signal, handler: Box<dyn Fn()>) -> Subscription;
}

/// Registration with a [`SignalSource`]; unsubscribes on drop.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Subscription with nothing to undo (signal already delivered, or no source).
    pub fn noop() -> Self {
        Self { cancel: None }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// Owns the signal subscriptions. Dropping it is the same as [`teardown`](Self::teardown).
pub struct ChangeListener {
    _subscriptions: Vec<Subscription>,
    sender: Sender<Signal>,
}

impl ChangeListener {
    pub fn attach(source: &dyn SignalSource, adapter: WalletAdapter) -> (Self, ListenerTask) {
        let (sender, receiver) = async_channel::unbounded();

        let subscriptions: Vec<Subscription> = [Signal::Ready, Signal::ProviderChanged]
            .into_iter()
            .map(|signal| {
                let tx = sender.clone();
                source.subscribe(
                    signal,
                    Box::new(move || {
                        if tx.try_send(signal).is_err() {
                            tracing::trace!(?signal, "Change listener closed, signal dropped");
                        }
                    }),
                )
            })
            .collect();

        tracing::debug!("Change listener attached");
        (
            Self {
                _subscriptions: subscriptions,
                sender,
            },
            ListenerTask { receiver, adapter },
        )
    }

    /// Unsubscribe from both signals and stop the [`ListenerTask`] once it
    /// has drained what was already queued.
    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for ChangeListener {
    fn drop(&mut self) {
        self.sender.close();
        tracing::debug!("Change listener torn down");
    }
}

/// Serial consumer of queued signals.
pub struct ListenerTask {
    receiver: Receiver<Signal>,
    adapter: WalletAdapter,
}

impl ListenerTask {
    pub async fn run(self) {
        let mut ready_seen = false;

        while let Ok(signal) = self.receiver.recv().await {
            match signal {
                Signal::Ready if ready_seen => {
                    tracing::debug!("Ready signal already handled, ignoring");
                }
                Signal::Ready => {
                    ready_seen = true;
                    tracing::debug!("Environment ready, checking for wallets");
                    self.adapter.detect_present();
                    self.adapter.reconcile().await;
                }
                Signal::ProviderChanged => {
                    tracing::debug!("Wallet change event detected");
                    self.adapter.reconcile().await;
                }
            }
        }

        tracing::debug!("Change listener task finished");
    }
}
