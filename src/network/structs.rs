//! The structs
//!
use std::net::Ipv4Addr;

/// An IPv4 network range, such as `cidr-services: 172.28.0.0/24`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Network {
    pub network: Ipv4Addr,
    pub prefix: u8,
}
