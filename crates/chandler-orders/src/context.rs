//! Host context: which board (and user) the app is running against.
//!
//! The host announces its context asynchronously. Board-scoped work waits
//! for the first announcement; a context without a board is valid and
//! selects the local fallback path.

use chandler_core::BoardId;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    pub board_id: Option<BoardId>,
    pub user_id: Option<String>,
}

impl HostContext {
    pub fn new(board_id: Option<BoardId>, user_id: Option<String>) -> Self {
        Self { board_id, user_id }
    }

    /// Read the host's context payload. The board comes from `boardId`,
    /// falling back to `board.id`; the user from `user.id`. Ids may be
    /// strings or numbers.
    pub fn from_host_payload(payload: &Value) -> Self {
        let board_id = id_text(&payload["boardId"])
            .or_else(|| id_text(&payload["board"]["id"]))
            .and_then(|raw| BoardId::parse(&raw));
        let user_id = id_text(&payload["user"]["id"]).filter(|u| !u.trim().is_empty());
        Self { board_id, user_id }
    }

    pub fn has_board(&self) -> bool {
        self.board_id.is_some()
    }
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Host side of the context channel.
pub struct ContextPublisher {
    tx: watch::Sender<Option<HostContext>>,
}

/// App side of the context channel.
#[derive(Clone)]
pub struct ContextListener {
    rx: watch::Receiver<Option<HostContext>>,
}

/// A fresh context channel with nothing announced yet.
pub fn context_channel() -> (ContextPublisher, ContextListener) {
    let (tx, rx) = watch::channel(None);
    (ContextPublisher { tx }, ContextListener { rx })
}

impl ContextPublisher {
    /// Announce a new context. Later announcements replace earlier ones.
    pub fn publish(&self, context: HostContext) {
        debug!(board = ?context.board_id, "host context announced");
        self.tx.send_replace(Some(context));
    }
}

impl ContextListener {
    /// The latest announced context, if any.
    pub fn current(&self) -> Option<HostContext> {
        self.rx.borrow().clone()
    }

    /// Wait for the first announcement. If the host goes away without
    /// announcing anything, an empty (boardless) context is returned.
    pub async fn wait(&mut self) -> HostContext {
        match self.rx.wait_for(Option::is_some).await {
            Ok(ctx) => ctx.clone().unwrap_or_default(),
            Err(_) => {
                warn!("host closed before announcing a context");
                HostContext::default()
            }
        }
    }

    /// Wait for the next announcement after the one already seen.
    pub async fn changed(&mut self) -> Option<HostContext> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }
}
