//! One-time bootstrap of the live-view socket.
//!
//! Opens the socket with the page's CSRF token and keeps it open for the
//! lifetime of the page: heartbeats go out on a fixed interval and a dropped
//! connection is reopened with backoff. Incoming messages are not
//! interpreted here.

use crate::config::{
    LIVE_SOCKET_HEARTBEAT_MS, LIVE_SOCKET_MAX_RECONNECT_MS, LIVE_SOCKET_PATH,
    LIVE_SOCKET_RECONNECT_MS, LIVE_SOCKET_VSN,
};
use futures_util::future::{select, Either};
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use gloo_net::websocket::futures::WebSocket;
use gloo_net::websocket::Message;
use gloo_timers::future::TimeoutFuture;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiveSocketError {
    #[error("window or document is not available")]
    NoWindow,
    #[error("csrf-token meta tag not found")]
    MissingCsrfToken,
    #[error("failed to open live socket: {0}")]
    Connect(String),
}

/// Socket URL for a page served over `protocol` ("http:" or "https:") from `host`.
pub fn live_socket_url(protocol: &str, host: &str, csrf_token: &str) -> String {
    let scheme = if protocol == "https:" { "wss" } else { "ws" };
    format!(
        "{}://{}{}?_csrf_token={}&vsn={}",
        scheme,
        host,
        LIVE_SOCKET_PATH,
        urlencoding::encode(csrf_token),
        LIVE_SOCKET_VSN
    )
}

/// Heartbeat frame in the v2 array encoding: `[join_ref, ref, topic, event, payload]`.
pub fn heartbeat_frame(heartbeat_ref: u64) -> String {
    serde_json::json!([
        null,
        heartbeat_ref.to_string(),
        "phoenix",
        "heartbeat",
        {}
    ])
    .to_string()
}

/// Delay before reconnect attempt number `tries` (1-based).
pub fn reconnect_delay_ms(tries: u32) -> u32 {
    let index = tries.saturating_sub(1) as usize;
    LIVE_SOCKET_RECONNECT_MS
        .get(index)
        .copied()
        .unwrap_or(LIVE_SOCKET_MAX_RECONNECT_MS)
}

fn csrf_token(document: &web_sys::Document) -> Result<String, LiveSocketError> {
    document
        .query_selector("meta[name='csrf-token']")
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"))
        .filter(|token| !token.is_empty())
        .ok_or(LiveSocketError::MissingCsrfToken)
}

/// Reads until the connection drops. Returns whether any frame arrived.
async fn read_frames(mut read: SplitStream<WebSocket>) -> bool {
    let mut received = false;
    while let Some(frame) = read.next().await {
        match frame {
            Ok(_) => received = true,
            Err(e) => {
                log::warn!("Live socket error: {}", e);
                break;
            }
        }
    }
    received
}

async fn send_heartbeats(mut write: SplitSink<WebSocket, Message>) {
    let mut heartbeat_ref: u64 = 0;
    loop {
        TimeoutFuture::new(LIVE_SOCKET_HEARTBEAT_MS).await;
        heartbeat_ref += 1;
        if let Err(e) = write.send(Message::Text(heartbeat_frame(heartbeat_ref))).await {
            log::warn!("Live socket heartbeat failed: {}", e);
            return;
        }
    }
}

async fn run(url: String) {
    let mut tries: u32 = 0;
    loop {
        match WebSocket::open(&url) {
            Ok(socket) => {
                let (write, read) = socket.split();
                let reader = Box::pin(read_frames(read));
                let heartbeats = Box::pin(send_heartbeats(write));
                let received = match select(reader, heartbeats).await {
                    Either::Left((received, _)) => received,
                    Either::Right(_) => false,
                };
                tries = if received { 1 } else { tries + 1 };
                log::info!("Live socket closed");
            }
            Err(e) => {
                tries += 1;
                log::warn!("Failed to open live socket: {}", e);
            }
        }

        let delay = reconnect_delay_ms(tries);
        log::debug!("Live socket reconnect attempt {} in {} ms", tries, delay);
        TimeoutFuture::new(delay).await;
    }
}

/// Starts the socket. Call once, before mounting the app.
pub fn connect() -> Result<(), LiveSocketError> {
    let window = web_sys::window().ok_or(LiveSocketError::NoWindow)?;
    let document = window.document().ok_or(LiveSocketError::NoWindow)?;
    let token = csrf_token(&document)?;

    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let host = location
        .host()
        .map_err(|e| LiveSocketError::Connect(format!("{:?}", e)))?;

    log::info!("Live socket connecting to {}{}", host, LIVE_SOCKET_PATH);
    wasm_bindgen_futures::spawn_local(run(live_socket_url(&protocol, &host, &token)));

    Ok(())
}
