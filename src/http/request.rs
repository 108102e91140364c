//! Request reading.
//!
//! # Responsibilities
//! - Accumulate the request head until the blank line terminator
//! - Extract the method token and `Content-Length`
//! - Read a fixed-length body, reusing bytes pipelined with the head
//!
//! # Design Decisions
//! - Reads stop quietly on EOF, I/O error, or timeout; callers get what arrived
//! - Header name matching is case-sensitive (`Content-Length:` only)
//! - Only the head section is searched, never body bytes that came along with it

use std::borrow::Cow;
use std::fmt;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::LimitsConfig;
use crate::error::BootstrapError;

/// Size of the scratch buffer used for every socket read.
pub const READ_BUFFER_SIZE: usize = 4096;

/// Blank line separating the head from the body.
pub const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

const CONTENT_LENGTH: &[u8] = b"Content-Length:";
const CRLF: &[u8] = b"\r\n";

/// The two methods a session accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bounds applied while reading from a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadLimits {
    /// Per-read timeout.
    pub timeout: Option<Duration>,
    /// Head accumulation cap.
    pub max_header_bytes: Option<usize>,
}

impl From<&LimitsConfig> for ReadLimits {
    fn from(config: &LimitsConfig) -> Self {
        Self {
            timeout: config.read_timeout_secs.map(Duration::from_secs),
            max_header_bytes: config.max_header_bytes,
        }
    }
}

/// Raw bytes of a request head, possibly followed by early body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    raw: Vec<u8>,
}

impl RequestHead {
    pub fn from_bytes(raw: impl Into<Vec<u8>>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Head as text, for logging.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.head_section())
    }

    /// Whether the blank line terminator was received.
    pub fn is_complete(&self) -> bool {
        self.terminator_position().is_some()
    }

    /// Compares the leading bytes against the method name.
    ///
    /// Only the prefix is checked, so `GETX` passes as `GET`.
    pub fn starts_with_method(&self, method: Method) -> bool {
        self.raw.starts_with(method.as_str().as_bytes())
    }

    /// First word of the request line, for error reporting.
    pub fn method_token(&self) -> String {
        let end = self
            .raw
            .iter()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(self.raw.len())
            .min(16);
        String::from_utf8_lossy(&self.raw[..end]).into_owned()
    }

    /// Declared body length.
    ///
    /// `Ok(None)` when the header is absent or its line is unterminated.
    pub fn content_length(&self) -> Result<Option<usize>, BootstrapError> {
        let head = self.head_section();
        let Some(name_pos) = find(head, CONTENT_LENGTH, 0) else {
            return Ok(None);
        };
        let value_start = name_pos + CONTENT_LENGTH.len();
        let Some(value_end) = find(head, CRLF, value_start) else {
            return Ok(None);
        };

        let value: String = String::from_utf8_lossy(&head[value_start..value_end])
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| BootstrapError::InvalidContentLength(value))
    }

    /// Bytes received after the terminator in the same reads as the head.
    pub fn body_prefix(&self) -> &[u8] {
        match self.terminator_position() {
            Some(pos) => &self.raw[pos + HEAD_TERMINATOR.len()..],
            None => &[],
        }
    }

    fn terminator_position(&self) -> Option<usize> {
        find(&self.raw, HEAD_TERMINATOR, 0)
    }

    /// Header lines including the CRLF of the last one.
    fn head_section(&self) -> &[u8] {
        match self.terminator_position() {
            Some(pos) => &self.raw[..pos + CRLF.len()],
            None => &self.raw,
        }
    }
}

/// Read until the head terminator arrives or the peer stops sending.
pub async fn read_head<R>(reader: &mut R, limits: ReadLimits) -> RequestHead
where
    R: AsyncRead + Unpin,
{
    let mut raw = Vec::new();
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let n = read_chunk(reader, &mut buf, limits.timeout).await;
        if n == 0 {
            break;
        }

        let scan_from = raw.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
        raw.extend_from_slice(&buf[..n]);
        if find(&raw, HEAD_TERMINATOR, scan_from).is_some() {
            break;
        }

        if let Some(max) = limits.max_header_bytes {
            if raw.len() >= max {
                tracing::warn!(
                    received = raw.len(),
                    limit = max,
                    "Request head exceeds limit, stopping read"
                );
                break;
            }
        }
    }

    RequestHead { raw }
}

/// Read up to `length` bytes, returning early if the peer stops sending.
pub async fn read_body<R>(reader: &mut R, length: usize, limits: ReadLimits) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let mut body = Vec::with_capacity(length.min(16 * READ_BUFFER_SIZE));
    let mut buf = [0u8; READ_BUFFER_SIZE];

    while body.len() < length {
        let want = (length - body.len()).min(READ_BUFFER_SIZE);
        let n = read_chunk(reader, &mut buf[..want], limits.timeout).await;
        if n == 0 {
            tracing::debug!(
                received = body.len(),
                expected = length,
                "Peer stopped sending before body was complete"
            );
            break;
        }
        body.extend_from_slice(&buf[..n]);
    }

    body
}

/// Assemble the declared body from the head's early bytes plus the remainder.
pub async fn read_request_body<R>(
    reader: &mut R,
    head: &RequestHead,
    length: usize,
    limits: ReadLimits,
) -> Vec<u8>
where
    R: AsyncRead + Unpin,
{
    let prefix = head.body_prefix();
    let mut body = prefix[..prefix.len().min(length)].to_vec();
    if body.len() < length {
        let rest = read_body(reader, length - body.len(), limits).await;
        body.extend_from_slice(&rest);
    }
    body
}

/// One read; EOF, errors, and timeouts all yield zero.
async fn read_chunk<R>(reader: &mut R, buf: &mut [u8], timeout: Option<Duration>) -> usize
where
    R: AsyncRead + Unpin,
{
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, reader.read(buf)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?limit, "Read timed out");
                return 0;
            }
        },
        None => reader.read(buf).await,
    };

    match result {
        Ok(n) => n,
        Err(e) => {
            tracing::warn!(error = %e, "Read failed");
            0
        }
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}
