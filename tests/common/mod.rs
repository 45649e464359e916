//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use wirsa_update::config::UpdateConfig;
use wirsa_update::{HttpServer, Shutdown};

/// A canned upstream response.
#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl MockResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    #[allow(dead_code)]
    pub fn redirect(location: String) -> Self {
        Self {
            status: 302,
            headers: vec![("Location".into(), location)],
            body: Vec::new(),
        }
    }
}

/// What the mock saw for one request.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub path: String,
    pub user_agent: Option<String>,
}

/// Raw-TCP HTTP/1.1 upstream serving fixed responses by path.
pub struct MockUpstream {
    listener: Option<TcpListener>,
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockUpstream {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        Self {
            listener: Some(listener),
            addr,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Start answering; unknown paths get 404.
    pub fn serve(&mut self, routes: Vec<(&str, MockResponse)>) {
        let listener = self.listener.take().expect("mock upstream already serving");
        let routes: Arc<HashMap<String, MockResponse>> = Arc::new(
            routes
                .into_iter()
                .map(|(path, response)| (path.to_string(), response))
                .collect(),
        );
        let requests = self.requests.clone();

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((socket, _)) => {
                        let routes = routes.clone();
                        let requests = requests.clone();
                        tokio::spawn(async move {
                            handle_connection(socket, routes, requests).await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

async fn handle_connection(
    mut socket: TcpStream,
    routes: Arc<HashMap<String, MockResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf).to_string();
    let mut lines = head.lines();
    let path = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let user_agent = lines.find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("user-agent")
            .then(|| value.trim().to_string())
    });
    requests.lock().unwrap().push(RecordedRequest {
        path: path.clone(),
        user_agent,
    });

    let response = routes
        .get(&path)
        .cloned()
        .unwrap_or_else(|| MockResponse::status(404, r#"{"message": "Not Found"}"#));

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n",
        response.status,
        reason(response.status),
        response.body.len()
    );
    for (name, value) in &response.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    head.push_str("\r\n");

    let _ = socket.write_all(head.as_bytes()).await;
    let _ = socket.write_all(&response.body).await;
    let _ = socket.shutdown().await;
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Upstream that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Config pointing at `api_base_url` with system proxies ignored.
pub fn test_config(api_base_url: String) -> UpdateConfig {
    let mut config = UpdateConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.api_base_url = api_base_url;
    config.upstream.use_system_proxy = false;
    config
}

/// Start the service on an ephemeral port.
pub async fn start_service(config: UpdateConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub const LATEST_PATH: &str = "/repos/nullvalue0/WiRSa/releases/latest";
