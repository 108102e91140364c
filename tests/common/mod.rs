//! Shared utilities for session integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use csr_bootstrap::config::FilesConfig;
use csr_bootstrap::{BootstrapConfig, BootstrapError, Session, SessionReport};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// A session running in the background, rooted in its own temp directory.
pub struct Harness {
    pub dir: TempDir,
    pub files: FilesConfig,
    pub addr: SocketAddr,
    pub handle: JoinHandle<Result<SessionReport, BootstrapError>>,
}

impl Harness {
    /// Wait for the session to finish.
    pub async fn finish(self) -> (TempDir, FilesConfig, Result<SessionReport, BootstrapError>) {
        let result = tokio::time::timeout(Duration::from_secs(10), self.handle)
            .await
            .expect("session did not finish")
            .expect("session task panicked");
        (self.dir, self.files, result)
    }
}

/// Start a session on an ephemeral loopback port.
///
/// `csr` is written to the CSR file when given; otherwise the file is absent.
pub async fn start_session(csr: Option<&str>) -> Harness {
    start_session_with(csr, |_| {}).await
}

pub async fn start_session_with<F>(csr: Option<&str>, configure: F) -> Harness
where
    F: FnOnce(&mut BootstrapConfig),
{
    let dir = tempfile::tempdir().unwrap();
    let mut config = BootstrapConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.files = FilesConfig {
        csr_path: dir.path().join("csr.txt"),
        cert_path: dir.path().join("fullchain.pem"),
        reference_path: dir.path().join("reference.json"),
    };
    configure(&mut config);

    if let Some(csr) = csr {
        std::fs::write(&config.files.csr_path, csr).unwrap();
    }

    let session = Session::bind(&config).await.unwrap();
    let addr = session.local_addr();
    let handle = tokio::spawn(session.run());

    Harness {
        dir,
        files: config.files,
        addr,
        handle,
    }
}

/// Send raw bytes and read until the server closes.
pub async fn raw_exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();
    read_to_close(&mut stream).await
}

pub async fn read_to_close(stream: &mut TcpStream) -> String {
    let mut response = Vec::new();
    // A reset after the response is fine; keep what arrived.
    let _ = stream.read_to_end(&mut response).await;
    String::from_utf8_lossy(&response).into_owned()
}

pub fn get_request() -> &'static [u8] {
    b"GET / HTTP/1.1\r\nHost: bootstrap\r\n\r\n"
}

pub fn post_request(body: &str) -> Vec<u8> {
    format!(
        "POST / HTTP/1.1\r\nHost: bootstrap\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    )
    .into_bytes()
}

/// Body of an HTTP response, after the blank line.
pub fn response_body(response: &str) -> &str {
    response
        .split_once("\r\n\r\n")
        .map(|(_, body)| body)
        .unwrap_or("")
}

/// HTTP client that keeps `Content-Length` capitalized.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .http1_title_case_headers()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
