use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Html, IntoResponse},
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::session::Session;
use crate::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// The webcam + chat client page. Opaque artifact as far as the gateway is
/// concerned.
pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let session = Arc::new(Session::new(state, tx));

    info!("client {} connected", session.id());

    // Writer half. When this task ends the channel receiver is dropped,
    // which is what discards results that complete after a disconnect.
    let writer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    debug!("unserializable response event: {}", e);
                    continue;
                }
            };
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let session = session.clone();
                tokio::spawn(async move {
                    session.handle_query(&text).await;
                });
            }
            Ok(Message::Close(_)) | Err(_) => break,
            // Pings and pongs are answered by axum; binary frames carry no
            // events in this protocol.
            Ok(_) => {}
        }
    }

    session.disconnect();
    writer.abort();
}
