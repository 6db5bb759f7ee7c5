//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        400 => "400 Bad Request",
        401 => "401 Unauthorized",
        404 => "404 Not Found",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        502 => "502 Bad Gateway",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// Read a full request (head plus Content-Length body) off the socket.
async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let mut body_start = None;
    let mut content_length = 0usize;
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if body_start.is_none() {
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        body_start = Some(pos + 4);
                        let head = String::from_utf8_lossy(&buf[..pos]);
                        content_length = head
                            .lines()
                            .find_map(|l| {
                                let (name, value) = l.split_once(':')?;
                                name.eq_ignore_ascii_case("content-length")
                                    .then(|| value.trim().parse().ok())?
                            })
                            .unwrap_or(0);
                    }
                }
                if let Some(start) = body_start {
                    if buf.len() >= start + content_length {
                        break;
                    }
                }
            }
            Err(_) => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Start a mock upstream that returns a fixed status and JSON body.
#[allow(dead_code)]
pub async fn start_mock_upstream(addr: SocketAddr, status: u16, body: &'static str) {
    start_programmable_upstream(addr, move |_head| async move { (status, body.to_string()) })
        .await;
}

/// Start a programmable mock upstream. The handler receives the raw
/// request text (request line, headers, and body) and returns
/// (status, body).
pub async fn start_programmable_upstream<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (status, body) = f(request).await;
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock JSON-RPC upstream. The handler receives each request's
/// method and params and returns the `result` value; methods are recorded
/// in call order so tests can assert on sequencing.
#[allow(dead_code)]
pub async fn start_json_rpc_upstream<F>(addr: SocketAddr, f: F) -> Arc<Mutex<Vec<String>>>
where
    F: Fn(&str, &serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    let f = Arc::new(f);
    start_programmable_upstream(addr, move |request| {
        let record = record.clone();
        let f = f.clone();
        async move {
            let body = request.split("\r\n\r\n").nth(1).unwrap_or("");
            let req: serde_json::Value =
                serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
            let method = req["method"].as_str().unwrap_or("").to_string();
            record.lock().unwrap().push(method.clone());
            let result = f(&method, &req["params"]);
            let response = serde_json::json!({
                "jsonrpc": "2.0",
                "id": req["id"],
                "result": result,
            });
            (200, response.to_string())
        }
    })
    .await;
    seen
}

/// Start a mock upstream that records every request head it sees.
#[allow(dead_code)]
pub async fn start_recording_upstream(
    addr: SocketAddr,
    status: u16,
    body: &'static str,
) -> Arc<Mutex<Vec<String>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    start_programmable_upstream(addr, move |head| {
        let record = record.clone();
        async move {
            record.lock().unwrap().push(head);
            (status, body.to_string())
        }
    })
    .await;
    seen
}
