//! Module `connection`
//!
//! Opens the TCP streams used for both the control channel and each
//! passive-mode data channel. Only IPv4 addresses are considered.

use log::{debug, info};
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpStream, lookup_host};

use crate::error::ConnectError;

/// Resolves `host` and connects to the first IPv4 address found.
///
/// # Arguments
///
/// * `host` - Hostname or dotted-quad address
/// * `port` - TCP port
/// * `timeout` - Optional bound on the connect attempt; `None` waits for the OS
///
/// # Returns
///
/// * `Ok(TcpStream)` - A connected stream owned by the caller
/// * `Err(ConnectError)` - Resolution failed, or the connect was refused or timed out
pub async fn open_connection(
    host: &str,
    port: u16,
    timeout: Option<Duration>,
) -> Result<TcpStream, ConnectError> {
    let addr = resolve_ipv4(host, port).await?;
    debug!("Connecting to {} ({}:{})", addr, host, port);

    let connect = TcpStream::connect(addr);
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, connect)
            .await
            .map_err(|_| ConnectError::Timeout(addr))?,
        None => connect.await,
    };

    let stream = result.map_err(|e| match e.kind() {
        ErrorKind::ConnectionRefused => ConnectError::Refused(addr),
        ErrorKind::TimedOut => ConnectError::Timeout(addr),
        _ => ConnectError::Failed(addr, e),
    })?;

    info!("Connected to {}", addr);
    Ok(stream)
}

async fn resolve_ipv4(host: &str, port: u16) -> Result<SocketAddr, ConnectError> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|source| ConnectError::Resolve {
            host: host.to_string(),
            source,
        })?;

    addrs
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| ConnectError::NoIpv4Address(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connects_to_listening_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let stream = open_connection("127.0.0.1", port, None).await.unwrap();
        let (_accepted, peer) = listener.accept().await.unwrap();
        assert_eq!(stream.local_addr().unwrap(), peer);
    }

    #[tokio::test]
    async fn test_refused_connection_is_reported() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = open_connection("127.0.0.1", port, Some(Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectError::Refused(addr) if addr.port() == port));
    }
}
