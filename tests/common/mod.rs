//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use account_client::http::{ReqwestTransport, RequestExecutor};
use account_client::resilience::RetryOptions;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// What the mock backend saw for one request.
#[derive(Debug, Clone)]
pub struct Captured {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Start a programmable mock backend on an ephemeral port.
///
/// The handler decides the status and body for every request.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(Captured) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(captured) = read_request(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(captured).await;
                        let _ = socket.write_all(render(status, &body).as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend that answers every request with `status` and counts hits.
pub async fn start_fixed_backend(status: u16, body: &'static str) -> (SocketAddr, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();
    let addr = start_programmable_backend(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { (status, body.to_string()) }
    })
    .await;
    (addr, hits)
}

/// In-memory accounts resource: POST stores, GET reads, DELETE removes.
pub async fn start_account_store(prefix: &'static str) -> (SocketAddr, Arc<AtomicU32>) {
    let store: Arc<Mutex<HashMap<String, String>>> = Arc::default();
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    let addr = start_programmable_backend(move |req| {
        counter.fetch_add(1, Ordering::SeqCst);
        let reply = store_reply(&store, prefix, req);
        async move { reply }
    })
    .await;
    (addr, hits)
}

fn store_reply(
    store: &Mutex<HashMap<String, String>>,
    prefix: &str,
    req: Captured,
) -> (u16, String) {
    let path = req.path.split('?').next().unwrap_or_default();
    let Some(rest) = path.strip_prefix(prefix) else {
        return (404, String::new());
    };
    let id = rest.trim_start_matches('/');
    let mut store = store.lock().unwrap();

    match (req.method.as_str(), id.is_empty()) {
        ("POST", true) => {
            let body = String::from_utf8_lossy(&req.body).into_owned();
            let value: serde_json::Value = match serde_json::from_str(&body) {
                Ok(value) => value,
                Err(_) => return (400, String::new()),
            };
            let Some(id) = value["data"]["id"].as_str() else {
                return (400, String::new());
            };
            store.insert(id.to_string(), body.clone());
            (201, body)
        }
        ("GET", false) => match store.get(id) {
            Some(body) => (200, body.clone()),
            None => (404, String::new()),
        },
        ("DELETE", false) => match store.remove(id) {
            Some(_) => (204, String::new()),
            None => (404, String::new()),
        },
        _ => (405, String::new()),
    }
}

/// Port with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Executor over a real `reqwest` client that ignores proxy settings.
pub fn executor(options: RetryOptions) -> RequestExecutor {
    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    RequestExecutor::with_transport(ReqwestTransport::from_client(client), options)
}

async fn read_request(socket: &mut TcpStream) -> Option<Captured> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = tokio::time::timeout(Duration::from_secs(5), socket.read(&mut chunk))
            .await
            .ok()?
            .ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Some(Captured {
        method,
        path,
        headers,
        body,
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn render(status: u16, body: &str) -> String {
    let reason = match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    if status == 204 {
        return format!("HTTP/1.1 204 {reason}\r\nConnection: close\r\n\r\n");
    }
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    )
}
