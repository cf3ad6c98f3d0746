//! Network interface snapshots and directed broadcast addresses.

use std::net::{Ipv4Addr, Ipv6Addr};

/// One address assigned to an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceAddr {
    V4 {
        ip: Ipv4Addr,
        netmask: Option<Ipv4Addr>,
    },
    V6 {
        ip: Ipv6Addr,
        prefix_len: u8,
    },
}

/// A network interface as seen at enumeration time.
#[derive(Debug)]
pub struct NetInterface {
    pub name: String,
    pub is_up: bool,
    pub is_broadcast: bool,
    /// Addresses assigned to the interface, or why they could not be listed.
    pub addrs: std::io::Result<Vec<InterfaceAddr>>,
}

impl NetInterface {
    /// Up and broadcast-capable.
    pub fn can_broadcast(&self) -> bool {
        self.is_up && self.is_broadcast
    }
}

/// Source of interface snapshots.
pub trait InterfaceSource: Send + Sync {
    fn interfaces(&self) -> std::io::Result<Vec<NetInterface>>;
}

/// Interfaces of the running host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn interfaces(&self) -> std::io::Result<Vec<NetInterface>> {
        let interfaces = netdev::get_interfaces()
            .into_iter()
            .map(|iface| {
                let v4 = iface.ipv4.iter().map(|net| InterfaceAddr::V4 {
                    ip: net.addr(),
                    netmask: Some(net.netmask()),
                });
                let v6 = iface.ipv6.iter().map(|net| InterfaceAddr::V6 {
                    ip: net.addr(),
                    prefix_len: net.prefix_len(),
                });
                NetInterface {
                    is_up: iface.is_up(),
                    is_broadcast: iface.is_broadcast(),
                    addrs: Ok(v4.chain(v6).collect()),
                    name: iface.name,
                }
            })
            .collect();
        Ok(interfaces)
    }
}

/// Directed broadcast address of an IPv4 address and its netmask.
///
/// `None` for IPv6 addresses and IPv4 addresses without a mask.
pub fn addr_to_broadcast(addr: &InterfaceAddr) -> Option<Ipv4Addr> {
    match *addr {
        InterfaceAddr::V4 {
            ip,
            netmask: Some(mask),
        } => Some(Ipv4Addr::from(u32::from(ip) | !u32::from(mask))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(ip: [u8; 4], mask: [u8; 4]) -> InterfaceAddr {
        InterfaceAddr::V4 {
            ip: Ipv4Addr::from(ip),
            netmask: Some(Ipv4Addr::from(mask)),
        }
    }

    #[test]
    fn test_class_c_broadcast() {
        let addr = v4([192, 168, 1, 5], [255, 255, 255, 0]);
        assert_eq!(
            addr_to_broadcast(&addr),
            Some(Ipv4Addr::new(192, 168, 1, 255))
        );
    }

    #[test]
    fn test_non_octet_mask() {
        let addr = v4([10, 1, 2, 3], [255, 255, 240, 0]);
        assert_eq!(
            addr_to_broadcast(&addr),
            Some(Ipv4Addr::new(10, 1, 15, 255))
        );
    }

    #[test]
    fn test_host_mask_is_own_address() {
        let addr = v4([127, 0, 0, 1], [255, 255, 255, 255]);
        assert_eq!(addr_to_broadcast(&addr), Some(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_idempotent() {
        let mask = Ipv4Addr::new(255, 255, 0, 0);
        let once = addr_to_broadcast(&InterfaceAddr::V4 {
            ip: Ipv4Addr::new(172, 16, 4, 20),
            netmask: Some(mask),
        })
        .unwrap();
        let twice = addr_to_broadcast(&InterfaceAddr::V4 {
            ip: once,
            netmask: Some(mask),
        })
        .unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, Ipv4Addr::new(172, 16, 255, 255));
    }

    #[test]
    fn test_skipped_addresses() {
        let v6 = InterfaceAddr::V6 {
            ip: Ipv6Addr::LOCALHOST,
            prefix_len: 128,
        };
        assert_eq!(addr_to_broadcast(&v6), None);

        let no_mask = InterfaceAddr::V4 {
            ip: Ipv4Addr::new(192, 168, 1, 5),
            netmask: None,
        };
        assert_eq!(addr_to_broadcast(&no_mask), None);
    }

    #[test]
    fn test_can_broadcast_requires_both_flags() {
        let iface = |is_up, is_broadcast| NetInterface {
            name: "eth0".to_string(),
            is_up,
            is_broadcast,
            addrs: Ok(Vec::new()),
        };
        assert!(iface(true, true).can_broadcast());
        assert!(!iface(true, false).can_broadcast());
        assert!(!iface(false, true).can_broadcast());
    }

    #[test]
    fn test_system_interfaces_enumerate() {
        let interfaces = SystemInterfaces.interfaces().unwrap();
        for iface in &interfaces {
            assert!(!iface.name.is_empty());
            assert!(iface.addrs.is_ok());
        }
    }
}
