//! Minimal HTTP/1.1 handling.
//!
//! # Data Flow
//! ```text
//! accepted TcpStream
//!     → request.rs (read head, check method, Content-Length, read body)
//!     → [bootstrap session decides what to answer]
//!     → response.rs (assemble and write response)
//!     → connection closed by drop
//! ```

pub mod request;
pub mod response;

pub use request::{
    read_body, read_head, read_request_body, Method, ReadLimits, RequestHead, READ_BUFFER_SIZE,
};
pub use response::{write_response, Response, StatusCode};
