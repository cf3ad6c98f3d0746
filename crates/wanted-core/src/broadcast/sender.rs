//! Directed UDP broadcast over every eligible interface.

use std::net::{SocketAddr, SocketAddrV4};
use std::sync::Arc;

use bytes::Bytes;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

use super::interfaces::{addr_to_broadcast, InterfaceSource, SystemInterfaces};
use crate::error::BroadcastError;
use crate::report::{deadline_pending, error_channel, ErrorSink, ErrorStream};

/// Create a broadcast-enabled UDP socket bound to `local`.
pub fn create_broadcast_socket(local: SocketAddrV4) -> Result<std::net::UdpSocket, std::io::Error> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;

    socket.set_broadcast(true)?;

    let addr = SocketAddr::V4(local);
    socket.bind(&addr.into())?;

    socket.set_nonblocking(true)?;

    Ok(socket.into())
}

/// Sends one payload to the broadcast address of every eligible interface.
pub struct BroadcastSender<S = SystemInterfaces> {
    interfaces: Arc<S>,
}

impl BroadcastSender<SystemInterfaces> {
    /// Sender over the host's own interfaces.
    pub fn system() -> Self {
        Self::new(SystemInterfaces)
    }
}

impl<S: InterfaceSource + 'static> BroadcastSender<S> {
    pub fn new(interfaces: S) -> Self {
        Self {
            interfaces: Arc::new(interfaces),
        }
    }

    pub fn interfaces(&self) -> &S {
        &self.interfaces
    }

    /// Broadcast `payload` on the port of `address`.
    ///
    /// With `conn` unset a socket is created on the address family of
    /// `address` and closed when the operation ends; a supplied socket stays
    /// with the caller. No send starts once `deadline` has passed.
    ///
    /// Must be called within a Tokio runtime.
    pub fn send(
        &self,
        conn: Option<Arc<UdpSocket>>,
        address: &str,
        payload: Bytes,
        deadline: Instant,
    ) -> ErrorStream<BroadcastError> {
        let (sink, stream) = error_channel();
        let interfaces = Arc::clone(&self.interfaces);
        let address = address.to_string();

        tokio::spawn(async move {
            let result =
                broadcast(interfaces.as_ref(), conn, &address, &payload, deadline, &sink).await;
            if let Err(e) = result {
                sink.report(e);
            }
        });

        stream
    }
}

/// Broadcast over the host's interfaces. See [`BroadcastSender::send`].
pub fn send_broadcast(
    conn: Option<Arc<UdpSocket>>,
    address: &str,
    payload: Bytes,
    deadline: Instant,
) -> ErrorStream<BroadcastError> {
    BroadcastSender::system().send(conn, address, payload, deadline)
}

async fn broadcast<S: InterfaceSource + ?Sized>(
    interfaces: &S,
    conn: Option<Arc<UdpSocket>>,
    address: &str,
    payload: &[u8],
    deadline: Instant,
    sink: &ErrorSink<BroadcastError>,
) -> Result<(), BroadcastError> {
    if !deadline_pending(deadline) {
        return Err(BroadcastError::DeadlineExceeded);
    }

    let source = resolve_source(address).await?;
    let port = source.port();

    let owned;
    let socket: &UdpSocket = match conn.as_deref() {
        Some(socket) => {
            socket.set_broadcast(true).map_err(BroadcastError::Socket)?;
            socket
        }
        None => {
            let local = SocketAddrV4::new(*source.ip(), 0);
            let std_socket = create_broadcast_socket(local).map_err(BroadcastError::Socket)?;
            owned = UdpSocket::from_std(std_socket).map_err(BroadcastError::Socket)?;
            &owned
        }
    };

    let interfaces = interfaces
        .interfaces()
        .map_err(BroadcastError::Interfaces)?;

    let mut sent = 0usize;
    for iface in interfaces {
        if !iface.can_broadcast() {
            continue;
        }
        let addrs = match iface.addrs {
            Ok(addrs) => addrs,
            Err(source) => {
                sink.report(BroadcastError::Addresses {
                    interface: iface.name,
                    source,
                });
                continue;
            }
        };

        for addr in addrs {
            let Some(ip) = addr_to_broadcast(&addr) else {
                continue;
            };
            let target = SocketAddr::V4(SocketAddrV4::new(ip, port));

            // A ready send would win the race inside `timeout_at`.
            if !deadline_pending(deadline) {
                return Err(BroadcastError::Timeout { target });
            }
            match timeout_at(deadline, socket.send_to(payload, target)).await {
                Ok(Ok(_)) => {
                    debug!("Broadcast {} bytes to {} via {}", payload.len(), target, iface.name);
                    sent += 1;
                }
                Ok(Err(source)) => {
                    sink.report(BroadcastError::Send { target, source });
                }
                Err(_) => return Err(BroadcastError::Timeout { target }),
            }
        }
    }

    info!("Broadcast to {} target(s) on port {}", sent, port);
    Ok(())
}

/// Resolve `address` to an IPv4 socket address; `:port` means any address.
async fn resolve_source(address: &str) -> Result<SocketAddrV4, BroadcastError> {
    let invalid = |message: String| BroadcastError::InvalidAddress {
        address: address.to_string(),
        message,
    };

    let host_port = if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    };

    let mut resolved = lookup_host(host_port.as_str())
        .await
        .map_err(|e| invalid(e.to_string()))?;

    resolved
        .find_map(|addr| match addr {
            SocketAddr::V4(v4) => Some(v4),
            SocketAddr::V6(_) => None,
        })
        .ok_or_else(|| invalid("no IPv4 address".to_string()))
}
