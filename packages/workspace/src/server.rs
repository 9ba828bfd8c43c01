//! HTTP/WebSocket surface for a running session.
//!
//! Three routes:
//!
//! - `GET /preview`: the last promoted preview snapshot, delivered behind
//!   the script-only sandbox policy. User script runs in an opaque origin
//!   and can never reach the editor's own execution context.
//! - `GET /archive`: the current buffers packaged as a project ZIP.
//! - `GET /ws`: editor clients. Session outputs stream out as tagged
//!   JSON, editor events come back in on the same socket.

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast;
use warp::http::{header, HeaderValue, Response, StatusCode};
use warp::ws::{Message, WebSocket};
use warp::Filter;

use scratchpad_bundle::{write_archive, SANDBOX_CSP};
use scratchpad_document::Language;

use crate::events::{SessionEvent, SessionOutput};
use crate::session::{SessionHandle, SharedView};

/// Messages accepted from editor clients over the WebSocket
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ClientMessage {
    Edit {
        language: Language,
        text: String,
        cursor: usize,
    },
    Cursor {
        language: Language,
        cursor: usize,
    },
    Select {
        index: usize,
    },
    Dismiss,
    Run,
    Save,
    Download,
}

impl From<ClientMessage> for SessionEvent {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Edit {
                language,
                text,
                cursor,
            } => SessionEvent::Edit {
                language,
                text,
                cursor,
            },
            ClientMessage::Cursor { language, cursor } => {
                SessionEvent::CursorMoved { language, cursor }
            }
            ClientMessage::Select { index } => SessionEvent::SelectSuggestion { index },
            ClientMessage::Dismiss => SessionEvent::DismissSuggestions,
            ClientMessage::Run => SessionEvent::RunPreview,
            ClientMessage::Save => SessionEvent::SaveNow,
            ClientMessage::Download => SessionEvent::DownloadArchive,
        }
    }
}

/// Build the route tree for a session
pub fn routes(
    handle: SessionHandle,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let index = warp::path::end().map(|| warp::reply::html(INDEX_HTML));

    let preview_handle = handle.clone();
    let preview = warp::path("preview").and(warp::get()).map(move || {
        let view = preview_handle.view();
        warp::reply::with_header(
            warp::reply::html(view.preview_document),
            header::CONTENT_SECURITY_POLICY.as_str(),
            SANDBOX_CSP,
        )
    });

    let archive_handle = handle.clone();
    let archive = warp::path("archive")
        .and(warp::get())
        .map(move || archive_response(&archive_handle.view()));

    let ws_handle = handle;
    let ws = warp::path("ws")
        .and(warp::ws())
        .and(warp::any().map(move || ws_handle.clone()))
        .map(|ws: warp::ws::Ws, handle: SessionHandle| {
            ws.on_upgrade(move |socket| handle_client(socket, handle))
        });

    index.or(preview).or(archive).or(ws)
}

fn archive_response(view: &SharedView) -> Response<Vec<u8>> {
    match write_archive(&view.html.text, &view.css.text, &view.js.text) {
        Ok(bytes) => {
            let mut response = Response::new(bytes);
            response.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/zip"),
            );
            response.headers_mut().insert(
                header::CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"scratchpad-project.zip\""),
            );
            response
        }
        Err(e) => {
            tracing::error!("Failed to package project archive: {}", e);
            let mut response = Response::new(b"archive generation failed".to_vec());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        }
    }
}

async fn handle_client(ws: WebSocket, handle: SessionHandle) {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let mut outputs = handle.subscribe();

    // Send the current snapshot so a fresh client can render immediately.
    let view = handle.view();
    let initial = SessionOutput::Preview {
        version: view.preview_version,
        document: view.preview_document,
    };
    if let Ok(json) = serde_json::to_string(&initial) {
        let _ = ws_tx.send(Message::text(json)).await;
    }

    tracing::info!("Editor client connected");

    let push = tokio::spawn(async move {
        loop {
            match outputs.recv().await {
                Ok(output) => {
                    let json = match serde_json::to_string(&output) {
                        Ok(json) => json,
                        Err(_) => continue,
                    };
                    if ws_tx.send(Message::text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("Editor client lagged by {} updates", n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    while let Some(result) = ws_rx.next().await {
        let message = match result {
            Ok(message) => message,
            Err(_) => break,
        };
        // Pings and binary frames are not part of the editor protocol.
        let Ok(text) = message.to_str() else {
            continue;
        };
        match serde_json::from_str::<ClientMessage>(text) {
            Ok(client_message) => handle.send(client_message.into()),
            Err(e) => tracing::warn!("Ignoring malformed editor message: {}", e),
        }
    }

    push.abort();
    tracing::info!("Editor client disconnected");
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Scratchpad</title>
</head>
<body>
    <h1>Scratchpad</h1>
    <p>The playground engine is running.</p>
    <ul>
        <li><a href="/preview">/preview</a> &mdash; sandboxed live preview</li>
        <li><a href="/archive">/archive</a> &mdash; download the project as a ZIP</li>
        <li><code>/ws</code> &mdash; editor client socket</li>
    </ul>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::PlaygroundSession;
    use scratchpad_common::MemoryStore;
    use scratchpad_suggest::StaticSuggestionClient;
    use std::sync::Arc;

    async fn running_session() -> SessionHandle {
        let session = PlaygroundSession::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StaticSuggestionClient::new()),
        );
        let handle = session.handle();
        tokio::spawn(session.run());

        // Let the session load, then promote one snapshot.
        handle.send(SessionEvent::RunPreview);
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
        handle
    }

    #[tokio::test]
    async fn test_preview_is_served_with_sandbox_policy() {
        let routes = routes(running_session().await);

        let response = warp::test::request().path("/preview").reply(&routes).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-security-policy"], SANDBOX_CSP);
        let body = String::from_utf8_lossy(response.body());
        assert!(body.contains("Welcome to Scratchpad"));
    }

    #[tokio::test]
    async fn test_archive_is_served_as_zip() {
        let routes = routes(running_session().await);

        let response = warp::test::request().path("/archive").reply(&routes).await;

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "application/zip");
        // ZIP local file header magic
        assert_eq!(&response.body()[..2], b"PK");
    }

    #[tokio::test]
    async fn test_index_lists_the_surface() {
        let routes = routes(running_session().await);

        let response = warp::test::request().path("/").reply(&routes).await;
        assert_eq!(response.status(), 200);
        let body = String::from_utf8_lossy(response.body());
        assert!(body.contains("/preview"));
    }
}
