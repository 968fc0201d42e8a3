//! Caller-facing handle to the connection actor.
//!
//! [`BridgeClient`] is cheap to clone; every clone talks to the same actor
//! and therefore the same single connection. Callers suspend on a oneshot
//! per call — the "fire request, await result" contract — while the actor
//! does all the work.

use serde_json::Value;
use spyglass_core::{BridgeError, RequestId};
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

use crate::actor::{Command, ConnectionActor};
use crate::config::BridgeConfig;

/// Depth of the command channel between handles and the actor.
const COMMAND_BUFFER: usize = 64;

/// Handle to the single bridge connection.
#[derive(Clone)]
pub struct BridgeClient {
    cmd_tx: mpsc::Sender<Command>,
}

impl BridgeClient {
    /// Spawn the connection actor and return a handle to it.
    ///
    /// The actor runs until every handle has been dropped, then tears down,
    /// rejecting anything still pending. Must be called from within a tokio
    /// runtime.
    #[must_use]
    pub fn spawn(config: BridgeConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
        let _ = tokio::spawn(ConnectionActor::new(config, cmd_rx).run());
        Self { cmd_tx }
    }

    /// Ensure a live connection to the peer.
    ///
    /// No-op when already connected. The label, if given, is remembered and
    /// attached to this and every later (re)connect so the peer can identify
    /// the caller.
    pub async fn connect(&self, label: Option<&str>) -> Result<(), BridgeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Connect {
                label: label.map(str::to_owned),
                reply: tx,
            })
            .await
            .map_err(|_| actor_gone())?;
        rx.await.map_err(|_| actor_gone())?
    }

    /// Tear down the connection, rejecting every pending request with a
    /// `Connection` error. Idempotent; safe to call when not connected.
    pub async fn disconnect(&self) {
        let (tx, rx) = oneshot::channel();
        if self
            .cmd_tx
            .send(Command::Disconnect { reply: tx })
            .await
            .is_ok()
        {
            let _ = rx.await;
        }
    }

    /// Disconnect followed by a best-effort connect. Never fails from the
    /// caller's point of view.
    pub async fn reconnect(&self) {
        let (tx, rx) = oneshot::channel();
        if self
            .cmd_tx
            .send(Command::Reconnect { reply: tx })
            .await
            .is_ok()
        {
            let _ = rx.await;
        }
    }

    /// Whether the connection is currently open. A point-in-time query, not
    /// a guarantee that a subsequent send will succeed.
    pub async fn is_connected(&self) -> bool {
        let (tx, rx) = oneshot::channel();
        if self
            .cmd_tx
            .send(Command::IsConnected { reply: tx })
            .await
            .is_err()
        {
            return false;
        }
        rx.await.unwrap_or(false)
    }

    /// Send one correlated request and await its outcome.
    ///
    /// Connects first if not connected (the only automatic connect). The
    /// returned future resolves exactly once: the peer's `result` payload,
    /// a [`BridgeError::ToolExecution`] if the peer answered with an error,
    /// a [`BridgeError::Timeout`] if it never answered in time, or a
    /// [`BridgeError::Connection`] if the socket failed underneath it.
    pub async fn send_request(
        &self,
        method: &str,
        params: Value,
        id: Option<RequestId>,
    ) -> Result<Value, BridgeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SendRequest {
                method: method.to_owned(),
                params,
                id,
                reply: tx,
            })
            .await
            .map_err(|_| actor_gone())?;
        rx.await.map_err(|_| actor_gone())?
    }

    /// Boot-time connect: best-effort. On failure the bridge stays
    /// disconnected and logs why; the first request will retry lazily.
    pub async fn start(&self, label: Option<&str>) {
        match self.connect(label).await {
            Ok(()) => info!("bridge connected to extension peer"),
            Err(e) => {
                warn!(error = %e, "initial connect failed; will retry on first request");
            }
        }
    }

    /// Shutdown: disconnect and log.
    pub async fn stop(&self) {
        self.disconnect().await;
        info!("bridge stopped");
    }
}

fn actor_gone() -> BridgeError {
    BridgeError::connection("connection manager unavailable")
}
