//! LAN announce via directed UDP broadcast.
//!
//! Enumerates interfaces that are up and broadcast-capable and sends a fixed
//! payload to each IPv4 subnet's broadcast address.

pub mod interfaces;
pub mod sender;

pub use interfaces::{addr_to_broadcast, InterfaceAddr, InterfaceSource, NetInterface, SystemInterfaces};
pub use sender::{create_broadcast_socket, send_broadcast, BroadcastSender};
