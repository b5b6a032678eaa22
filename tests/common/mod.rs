//! Minimal HTTP/1.1 stub server for integration tests
//!
//! Serves one canned response per connection, optionally as a chunked body
//! with pauses between chunks to imitate a server flushing as it generates.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

#[derive(Debug, Clone)]
pub enum StubResponse {
    /// Body sent with a Content-Length header
    Fixed { status: u16, body: String },

    /// Chunked body; each chunk is written after its delay
    Chunked { status: u16, chunks: Vec<(Duration, String)> },
}

impl StubResponse {
    pub fn text(body: &str) -> Self {
        StubResponse::Fixed { status: 200, body: body.to_string() }
    }

    pub fn lines(lines: &[&str]) -> Self {
        StubResponse::Chunked {
            status: 200,
            chunks: lines
                .iter()
                .map(|line| (Duration::from_millis(5), format!("{}\n", line)))
                .collect(),
        }
    }
}

pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    pub async fn spawn<H>(handler: H) -> Self
    where
        H: Fn(&RecordedRequest) -> StubResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let handler = Arc::new(handler);

        let recorded = requests.clone();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    return;
                };
                let handler = handler.clone();
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let _ = serve(socket, handler.as_ref(), recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Base URL of a port nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn serve<H>(
    mut socket: TcpStream,
    handler: &H,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
) -> std::io::Result<()>
where
    H: Fn(&RecordedRequest) -> StubResponse,
{
    let request = read_request(&mut socket).await?;
    let response = handler(&request);
    recorded.lock().unwrap().push(request);

    match response {
        StubResponse::Fixed { status, body } => {
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                reason(status),
                body.len()
            );
            socket.write_all(head.as_bytes()).await?;
            socket.write_all(body.as_bytes()).await?;
        }
        StubResponse::Chunked { status, chunks } => {
            let head = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                status,
                reason(status)
            );
            socket.write_all(head.as_bytes()).await?;
            socket.flush().await?;

            for (delay, chunk) in chunks {
                tokio::time::sleep(delay).await;
                if chunk.is_empty() {
                    continue;
                }
                socket
                    .write_all(format!("{:x}\r\n{}\r\n", chunk.len(), chunk).as_bytes())
                    .await?;
                socket.flush().await?;
            }
            socket.write_all(b"0\r\n\r\n").await?;
        }
    }

    socket.flush().await?;
    socket.shutdown().await
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();

    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body_end = (header_end + content_length).min(buf.len());
    let body = String::from_utf8_lossy(&buf[header_end..body_end]).to_string();

    Ok(RecordedRequest { method, path, body })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}
