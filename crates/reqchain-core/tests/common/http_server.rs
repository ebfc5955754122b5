//! Minimal HTTP/1.1 server for integration tests.
//!
//! Records every request it receives (request line target, headers, body)
//! and answers with a canned response. One request per connection; the
//! connection is closed after the response. Also usable as an HTTP proxy
//! endpoint, since it records the absolute-form target as sent.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub method: String,
    /// Request-line target: `/path?query` for origin requests,
    /// `http://host/path` when the client talks to us as a proxy.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn header_count(&self, name: &str) -> usize {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .count()
    }

    pub fn query(&self) -> &str {
        self.target.split_once('?').map(|(_, q)| q).unwrap_or("")
    }
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub reason: &'static str,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl CannedResponse {
    pub fn ok(content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            content_type,
            body: body.into(),
        }
    }

    pub fn json(body: &str) -> Self {
        Self::ok("application/json", body.as_bytes().to_vec())
    }

    pub fn text(body: &str) -> Self {
        Self::ok("text/plain", body.as_bytes().to_vec())
    }

    pub fn status(status: u16, reason: &'static str) -> Self {
        Self {
            status,
            reason,
            content_type: "text/plain",
            body: reason.as_bytes().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    /// Close the first N connections without answering (client sees an empty reply).
    pub drop_first: usize,
    /// Read the request but never answer (client times out).
    pub stall: bool,
}

/// Handle to a running server. The server runs until the process exits.
#[derive(Clone)]
pub struct TestServer {
    pub base_url: String,
    pub port: u16,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    connections: Arc<AtomicUsize>,
}

impl TestServer {
    /// URL for `path_and_query`, which must start with `/`.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("server received no request")
    }

    /// Accepted connections, including dropped ones.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

/// Starts a server answering every request with `response`.
pub fn start(response: CannedResponse) -> TestServer {
    start_with_options(response, ServerOptions::default())
}

pub fn start_with_options(response: CannedResponse, opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let connections = Arc::new(AtomicUsize::new(0));

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        port,
        requests: Arc::clone(&requests),
        connections: Arc::clone(&connections),
    };

    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let seq = connections.fetch_add(1, Ordering::SeqCst);
            if seq < opts.drop_first {
                drop(stream);
                continue;
            }
            let requests = Arc::clone(&requests);
            let response = response.clone();
            thread::spawn(move || handle(stream, &requests, &response, opts));
        }
    });
    server
}

/// Returns a local URL nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(
    mut stream: TcpStream,
    requests: &Mutex<Vec<RecordedRequest>>,
    response: &CannedResponse,
    opts: ServerOptions,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let Some(request) = read_request(&mut stream) else {
        return;
    };
    let method = request.method.clone();
    requests.lock().unwrap().push(request);
    if opts.stall {
        thread::sleep(Duration::from_secs(5));
        return;
    }
    write_response(&mut stream, &method, response);
}

/// Reads one request (head plus `Content-Length` body) from `stream`.
pub fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    if reader.read_line(&mut line).ok()? == 0 {
        return None;
    }
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let mut headers = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            headers.push((name.trim().to_string(), value.trim().to_string()));
        }
    }

    let length = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0u8; length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        target,
        headers,
        body,
    })
}

/// Writes `response`; HEAD responses carry headers only.
pub fn write_response(stream: &mut TcpStream, method: &str, response: &CannedResponse) {
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nX-Test-Server: reqchain\r\nConnection: close\r\n\r\n",
        response.status,
        response.reason,
        response.content_type,
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&response.body);
    }
    let _ = stream.flush();
}
