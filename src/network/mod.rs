//! Module for the IPv4 addresses and networks used in setup.yaml.
//!
//! Addresses are [std::net::Ipv4Addr]. Networks are [Ipv4Network], written in prefix notation (`10.0.0.0/24`).
//! A network without a prefix length is a single address (`/32`).
//! A network with host bits set (`10.0.0.1/24`) is rejected.
//!
mod structs;
mod functions;

pub use structs::*;
pub use functions::*;
