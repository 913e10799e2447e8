// src/probe/mock.rs
// =============================================================================
// A tiny HTTP target for tests.
//
// It listens on 127.0.0.1 with a random port, answers each request with the
// status/body configured for its path (404 for unknown paths) and closes the
// connection. It also records what it saw so tests can check how many
// requests arrived and how many were in flight at the same time.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

#[derive(Default)]
struct Stats {
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    methods: Mutex<Vec<String>>,
}

pub struct MockTarget {
    origin: String,
    stats: Arc<Stats>,
    server: tokio::task::JoinHandle<()>,
}

#[derive(Default)]
pub struct MockTargetBuilder {
    routes: HashMap<String, (u16, String)>,
    delay: Duration,
}

impl MockTargetBuilder {
    pub fn route(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(path.to_string(), (status, body.to_string()));
        self
    }

    /// Every response is held back this long
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn start(self) -> MockTarget {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stats = Arc::new(Stats::default());
        let routes = Arc::new(self.routes);
        let delay = self.delay;

        let server_stats = Arc::clone(&stats);
        let server = tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let stats = Arc::clone(&server_stats);
                let routes = Arc::clone(&routes);
                tokio::spawn(async move {
                    let _ = serve(socket, &routes, delay, &stats).await;
                });
            }
        });

        MockTarget {
            origin: format!("http://{}", addr),
            stats,
            server,
        }
    }
}

impl MockTarget {
    pub fn builder() -> MockTargetBuilder {
        MockTargetBuilder::default()
    }

    pub fn origin(&self) -> String {
        self.origin.clone()
    }

    pub fn requests(&self) -> usize {
        self.stats.requests.load(Ordering::SeqCst)
    }

    /// Highest number of requests being handled at once
    pub fn peak_in_flight(&self) -> usize {
        self.stats.peak.load(Ordering::SeqCst)
    }

    pub fn seen_methods(&self) -> Vec<String> {
        self.stats.methods.lock().unwrap().clone()
    }
}

impl Drop for MockTarget {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn serve(
    socket: TcpStream,
    routes: &HashMap<String, (u16, String)>,
    delay: Duration,
    stats: &Stats,
) -> std::io::Result<()> {
    let mut reader = BufReader::new(socket);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    loop {
        let mut header = String::new();
        let read = reader.read_line(&mut header).await?;
        if read == 0 || header == "\r\n" || header == "\n" {
            break;
        }
    }

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or("/").to_string();

    stats.requests.fetch_add(1, Ordering::SeqCst);
    stats.methods.lock().unwrap().push(method);
    let now = stats.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak.fetch_max(now, Ordering::SeqCst);

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let (status, body) = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| (404, "not found".to_string()));

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );

    stats.in_flight.fetch_sub(1, Ordering::SeqCst);

    let mut socket = reader.into_inner();
    socket.write_all(response.as_bytes()).await?;
    socket.shutdown().await
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// An origin on a port nobody listens on, so every connection is refused
pub async fn refused_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
