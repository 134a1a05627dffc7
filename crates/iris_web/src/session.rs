use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};
use uuid::Uuid;

use iris_core::wire::{ClientEvent, ServerEvent};
use iris_core::{Error, InferenceResult, QueryRequest, Result};

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Processing,
    Disconnected,
}

/// Server-side state for one client connection. Created on connect, dropped
/// on disconnect. Queries arriving while one is already in flight are not
/// rejected here; they queue behind the gate's global serialization.
pub struct Session {
    id: Uuid,
    connected_at: DateTime<Utc>,
    disconnected: AtomicBool,
    pending: AtomicUsize,
    app: Arc<AppState>,
    outbound: UnboundedSender<ServerEvent>,
}

impl Session {
    pub fn new(app: Arc<AppState>, outbound: UnboundedSender<ServerEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            connected_at: Utc::now(),
            disconnected: AtomicBool::new(false),
            pending: AtomicUsize::new(0),
            app,
            outbound,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }

    pub fn state(&self) -> SessionState {
        if self.disconnected.load(Ordering::SeqCst) {
            SessionState::Disconnected
        } else if self.pending.load(Ordering::SeqCst) > 0 {
            SessionState::Processing
        } else {
            SessionState::Connected
        }
    }

    /// Drives one inbound `query` event through the codec and the gate.
    /// Every failure path converges to a single `response` event carrying a
    /// readable error string; the connection is never torn down over a
    /// failed query.
    pub async fn handle_query(&self, raw: &str) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let answer = match self.run_query(raw).await {
            Ok(result) => result.answer,
            Err(e) => {
                warn!("query on session {} failed: {}", self.id, e);
                format!("Sorry, an error occurred: {}", e)
            }
        };
        self.pending.fetch_sub(1, Ordering::SeqCst);
        self.emit(ServerEvent::Response(InferenceResult { answer }));
    }

    async fn run_query(&self, raw: &str) -> Result<InferenceResult> {
        let request = parse_query(raw)?;
        info!("session {} query: '{}'", self.id, request.question);
        let image = iris_codec::decode_data_uri(&request.image)?;
        debug!("image decoded: {}x{}", image.width, image.height);
        self.app.gate.ask(&image, &request.question).await
    }

    fn emit(&self, event: ServerEvent) {
        if self.outbound.send(event).is_err() {
            // Client is gone; the computed result has nowhere to go.
            debug!("session {} discarded a response after disconnect", self.id);
        }
    }

    pub fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
        info!("session {} disconnected", self.id);
    }
}

fn parse_query(raw: &str) -> Result<QueryRequest> {
    let event: ClientEvent = serde_json::from_str(raw)
        .map_err(|e| Error::Protocol(format!("bad query event: {}", e)))?;
    let ClientEvent::Query(request) = event;
    if request.question.trim().is_empty() {
        return Err(Error::Protocol("question must not be empty".to_string()));
    }
    Ok(request)
}
