//! TCP listener setup.
//!
//! # Responsibilities
//! - Bind to the configured address with address reuse enabled
//! - Listen with the configured backlog
//! - Accept one connection at a time on demand (no accept loop)

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpSocket, TcpStream};

use crate::config::ListenerConfig;
use crate::error::BootstrapError;

/// A bound listener that hands out connections one by one.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind and start listening.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, BootstrapError> {
        let addr: SocketAddr = config
            .bind_address
            .parse()
            .map_err(|_| BootstrapError::InvalidAddress(config.bind_address.clone()))?;
        let bind_err = |source| BootstrapError::Bind { addr, source };

        let socket = match addr {
            SocketAddr::V4(_) => TcpSocket::new_v4(),
            SocketAddr::V6(_) => TcpSocket::new_v6(),
        }
        .map_err(bind_err)?;
        socket.set_reuseaddr(true).map_err(bind_err)?;
        socket.bind(addr).map_err(bind_err)?;

        let inner = socket.listen(config.backlog).map_err(bind_err)?;
        let local_addr = inner.local_addr().map_err(bind_err)?;

        tracing::info!(
            address = %local_addr,
            backlog = config.backlog,
            "Listener bound"
        );

        Ok(Self { inner, local_addr })
    }

    /// Wait for the next connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), BootstrapError> {
        let (stream, peer) = self.inner.accept().await.map_err(BootstrapError::Accept)?;
        tracing::debug!(peer_addr = %peer, "Connection accepted");
        Ok((stream, peer))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}
