//! The connection actor — single owner of the socket and the pending table.
//!
//! One task runs [`ConnectionActor::run`] for the life of the bridge. It is
//! the only code that ever touches the socket handle, the correlated-request
//! table, or the timeout queue, so none of them need a lock: commands from
//! [`BridgeClient`](crate::BridgeClient) handles, inbound frames, and timer
//! expirations are serialized through one `select!` loop.
//!
//! Teardown is the single funnel for every way a connection can die
//! (explicit disconnect, transport error, peer close, reconnect): it drops
//! the socket and rejects every entry still in the table, so no caller is
//! ever left waiting across a disconnect.

use std::collections::HashMap;

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use spyglass_core::wire::{ReplyEnvelope, RequestEnvelope};
use spyglass_core::{BridgeError, RequestId};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::time::{DelayQueue, delay_queue};
use tracing::{debug, info, warn};

use crate::config::BridgeConfig;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Header carrying the caller-supplied client label at connect time.
const CLIENT_LABEL_HEADER: &str = "x-spyglass-client";

/// Reply slot for one caller suspended in `send_request`.
type ReplyTx = oneshot::Sender<Result<Value, BridgeError>>;

/// Commands from `BridgeClient` handles to the actor.
pub(crate) enum Command {
    /// Ensure a live connection, optionally (re)setting the client label.
    Connect {
        label: Option<String>,
        reply: oneshot::Sender<Result<(), BridgeError>>,
    },
    /// Tear down the connection and drain the pending table.
    Disconnect { reply: oneshot::Sender<()> },
    /// Teardown followed by a best-effort connect.
    Reconnect { reply: oneshot::Sender<()> },
    /// Whether a socket is currently open.
    IsConnected { reply: oneshot::Sender<bool> },
    /// Dispatch one correlated request.
    SendRequest {
        method: String,
        params: Value,
        id: Option<RequestId>,
        reply: ReplyTx,
    },
}

/// One entry in the correlated-request table.
///
/// The `timeout` key and the table entry are created and removed together,
/// always — an orphaned timer firing against a reused id must be impossible.
struct PendingEntry {
    reply: ReplyTx,
    timeout: delay_queue::Key,
    method: String,
}

pub(crate) struct ConnectionActor {
    config: BridgeConfig,
    rx: mpsc::Receiver<Command>,
    /// At most one live socket. `Some` implies the handshake completed.
    socket: Option<WsStream>,
    /// Label attached to every (re)connect once a caller supplies one.
    client_label: Option<String>,
    pending: HashMap<RequestId, PendingEntry>,
    timeouts: DelayQueue<RequestId>,
}

impl ConnectionActor {
    pub(crate) fn new(config: BridgeConfig, rx: mpsc::Receiver<Command>) -> Self {
        Self {
            config,
            rx,
            socket: None,
            client_label: None,
            pending: HashMap::new(),
            timeouts: DelayQueue::new(),
        }
    }

    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                cmd = self.rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    self.handle_command(cmd).await;
                }
                frame = recv_frame(&mut self.socket), if self.socket.is_some() => {
                    match frame {
                        Some(Ok(Message::Close(_))) | None => {
                            debug!("peer closed the connection");
                            self.teardown().await;
                        }
                        Some(Ok(msg)) => self.route_frame(&msg),
                        Some(Err(e)) => {
                            warn!(error = %e, "transport error");
                            self.teardown().await;
                        }
                    }
                }
                Some(expired) = self.timeouts.next(), if !self.timeouts.is_empty() => {
                    self.handle_timeout(expired.into_inner()).await;
                }
            }
        }
        // All handles dropped: reject anyone still waiting before exiting.
        self.teardown().await;
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Connect { label, reply } => {
                let _ = reply.send(self.connect(label).await);
            }
            Command::Disconnect { reply } => {
                self.teardown().await;
                let _ = reply.send(());
            }
            Command::Reconnect { reply } => {
                self.reconnect().await;
                let _ = reply.send(());
            }
            Command::IsConnected { reply } => {
                let _ = reply.send(self.socket.is_some());
            }
            Command::SendRequest {
                method,
                params,
                id,
                reply,
            } => self.dispatch(method, params, id, reply).await,
        }
    }

    // ─── Connection lifecycle ────────────────────────────────────────────

    /// Establish the connection. No-op when already open.
    async fn connect(&mut self, label: Option<String>) -> Result<(), BridgeError> {
        if let Some(label) = label {
            self.client_label = Some(label);
        }
        if self.socket.is_some() {
            return Ok(());
        }

        let url = self.config.url();
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| BridgeError::connection(format!("invalid target {url}: {e}")))?;
        if let Some(label) = &self.client_label {
            match HeaderValue::from_str(label) {
                Ok(value) => {
                    let _ = request.headers_mut().insert(CLIENT_LABEL_HEADER, value);
                }
                Err(e) => warn!(label = %label, error = %e, "client label not header-safe, omitting"),
            }
        }

        let timeout = self.config.connect_timeout();
        let (socket, _response) = tokio::time::timeout(timeout, connect_async(request))
            .await
            .map_err(|_| {
                BridgeError::connection(format!(
                    "connect to {url} timed out after {}ms",
                    self.config.connect_timeout_ms
                ))
            })?
            .map_err(|e| BridgeError::connection(format!("WebSocket connect to {url}: {e}")))?;

        info!(url = %url, "connected to extension peer");
        self.socket = Some(socket);
        Ok(())
    }

    /// Teardown followed by a best-effort connect. Connect failure is logged,
    /// never propagated — callers find out via their own request path.
    async fn reconnect(&mut self) {
        self.teardown().await;
        if let Err(e) = self.connect(None).await {
            warn!(error = %e, "reconnect attempt failed");
        }
    }

    /// Drop the socket and reject everything still pending.
    ///
    /// Taking the socket out of `self` first means no further frames or
    /// errors from it can be observed, which is the "detach handlers before
    /// closing" ordering. Idempotent: with no socket and an empty table this
    /// does nothing.
    async fn teardown(&mut self) {
        if let Some(mut socket) = self.socket.take() {
            if let Err(e) = socket.close(None).await {
                debug!(error = %e, "close handshake failed");
            }
        }
        if !self.pending.is_empty() {
            warn!(
                count = self.pending.len(),
                "rejecting requests pending at teardown"
            );
        }
        for (_, entry) in self.pending.drain() {
            let _ = self.timeouts.try_remove(&entry.timeout);
            let _ = entry.reply.send(Err(BridgeError::connection("connection closed")));
        }
    }

    // ─── Request dispatch ────────────────────────────────────────────────

    async fn dispatch(
        &mut self,
        method: String,
        params: Value,
        id: Option<RequestId>,
        reply: ReplyTx,
    ) {
        // The sole automatic-connect trigger.
        if self.socket.is_none() {
            if let Err(e) = self.connect(None).await {
                let _ = reply.send(Err(e));
                return;
            }
        }

        let id = id.unwrap_or_default();
        if self.pending.contains_key(&id) {
            let _ = reply.send(Err(BridgeError::connection(format!(
                "request id {id} is already in flight"
            ))));
            return;
        }

        let envelope = RequestEnvelope {
            id: id.clone(),
            method: method.clone(),
            params,
        };
        let text = match serde_json::to_string(&envelope) {
            Ok(text) => text,
            Err(e) => {
                let _ = reply.send(Err(BridgeError::connection(format!(
                    "serialize request: {e}"
                ))));
                return;
            }
        };

        // Register before transmitting: a reply must never outrace its entry.
        debug!(id = %id, method = %method, "request dispatched");
        let timeout = self.timeouts.insert(id.clone(), self.config.request_timeout());
        let _ = self.pending.insert(
            id.clone(),
            PendingEntry {
                reply,
                timeout,
                method,
            },
        );

        let Some(socket) = self.socket.as_mut() else {
            // connect() just succeeded, so this cannot happen; fail safe.
            self.fail_entry(&id, BridgeError::connection("connection closed"));
            return;
        };
        if let Err(e) = socket.send(Message::Text(text.into())).await {
            // No reply will ever arrive for an unsent message: remove the
            // entry and its timer before surfacing the error, then tear the
            // dead socket down.
            self.fail_entry(&id, BridgeError::connection(format!("send failed: {e}")));
            self.teardown().await;
        }
    }

    /// Remove one entry (with its timer) and reject its caller.
    fn fail_entry(&mut self, id: &RequestId, error: BridgeError) {
        if let Some(entry) = self.pending.remove(id) {
            let _ = self.timeouts.try_remove(&entry.timeout);
            let _ = entry.reply.send(Err(error));
        }
    }

    // ─── Reply routing ───────────────────────────────────────────────────

    fn route_frame(&mut self, msg: &Message) {
        let Message::Text(text) = msg else {
            // Binary and ping/pong frames are not part of the protocol.
            return;
        };
        let reply: ReplyEnvelope = match serde_json::from_str(text) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "malformed message from peer, dropping");
                return;
            }
        };
        let Some(entry) = self.pending.remove(&reply.id) else {
            // Late reply for a timed-out or drained request. Dropping it here
            // is what keeps a dead waiter from being resurrected.
            debug!(id = %reply.id, "reply for unknown request, dropping");
            return;
        };
        let _ = self.timeouts.try_remove(&entry.timeout);
        let outcome = match reply.error {
            Some(err) => Err(BridgeError::ToolExecution {
                message: err.message,
                details: err.details,
            }),
            None => Ok(reply.result.unwrap_or(Value::Null)),
        };
        let _ = entry.reply.send(outcome);
    }

    // ─── Timeouts ────────────────────────────────────────────────────────

    async fn handle_timeout(&mut self, id: RequestId) {
        let Some(entry) = self.pending.remove(&id) else {
            return;
        };
        warn!(id = %id, method = %entry.method, "request timed out");
        let _ = entry.reply.send(Err(BridgeError::Timeout {
            method: entry.method,
            timeout_ms: self.config.request_timeout_ms,
        }));
        // A silent peer usually means a dead or hung socket. Refresh the
        // connection for subsequent calls; the timed-out request itself is
        // not retried.
        self.reconnect().await;
    }
}

/// Read the next frame, or park forever when there is no socket (the
/// `select!` guard keeps this branch disabled in that case).
async fn recv_frame(
    socket: &mut Option<WsStream>,
) -> Option<Result<Message, tokio_tungstenite::tungstenite::Error>> {
    match socket.as_mut() {
        Some(ws) => ws.next().await,
        None => std::future::pending().await,
    }
}
