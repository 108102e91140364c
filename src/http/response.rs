//! Response assembly and transmission.
//!
//! # Responsibilities
//! - Build the few fixed responses a session sends (200, 204, 400, 413)
//! - Serialize status line, headers, and body into wire bytes
//! - Write the whole response, failing on the first send error
//!
//! # Design Decisions
//! - Every response is framed with `Content-Length` and `Connection: close`
//! - No retry: a failed send is reported to the caller once

use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Status codes a session can answer with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    NoContent,
    BadRequest,
    PayloadTooLarge,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NoContent => 204,
            StatusCode::BadRequest => 400,
            StatusCode::PayloadTooLarge => 413,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NoContent => "No Content",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::PayloadTooLarge => "Payload Too Large",
        }
    }
}

/// A complete HTTP/1.1 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
    body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// `200 OK` with a JSON body.
    pub fn json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok)
            .header("Content-Type", "application/json")
            .body(body)
    }

    pub fn no_content() -> Self {
        Self::new(StatusCode::NoContent)
    }

    pub fn bad_request() -> Self {
        Self::new(StatusCode::BadRequest)
    }

    pub fn payload_too_large() -> Self {
        Self::new(StatusCode::PayloadTooLarge)
    }

    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Serialize to wire format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.reason()
        );
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
        // 204 must not carry a Content-Length.
        if self.status != StatusCode::NoContent {
            out.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        }
        out.push_str("Connection: close\r\n\r\n");

        let mut bytes = out.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

/// Send the full response.
pub async fn write_response<W>(writer: &mut W, response: &Response) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = response.to_bytes();
    writer.write_all(&bytes).await?;
    writer.flush().await?;

    tracing::debug!(
        status = response.status().as_u16(),
        bytes = bytes.len(),
        "Response sent"
    );
    Ok(())
}
