//! The impls and functions
//!
use std::{fmt, net::Ipv4Addr, str::FromStr};
use serde::{Serialize, Serializer};
use crate::error::{Result, SpireError};
use crate::network::Ipv4Network;

impl Ipv4Network {
    pub fn new(
        network: Ipv4Addr,
        prefix: u8,
    ) -> Result<Self>
    {
        if prefix > 32 {
            return Err(SpireError::CidrParse(format!("{}/{}", network, prefix)));
        }
        let candidate = Ipv4Network { network, prefix };
        if u32::from(network) & !candidate.netmask() != 0 {
            return Err(SpireError::CidrParse(format!("{}/{} has host bits set", network, prefix)));
        }
        Ok(candidate)
    }
    fn netmask(&self) -> u32 {
        match self.prefix {
            0 => 0,
            prefix => u32::MAX << (32 - u32::from(prefix)),
        }
    }
    pub fn contains(
        &self,
        address: &Ipv4Addr,
    ) -> bool
    {
        u32::from(*address) & self.netmask() == u32::from(self.network)
    }
}

impl FromStr for Ipv4Network {
    type Err = SpireError;

    fn from_str(cidr: &str) -> Result<Self> {
        let (address, prefix) = match cidr.split_once('/') {
            Some((address, prefix)) => {
                // u8::from_str accepts a leading '+'
                if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(SpireError::CidrParse(cidr.to_string()));
                }
                let prefix = prefix.parse::<u8>()
                    .map_err(|_| SpireError::CidrParse(cidr.to_string()))?;
                (address, prefix)
            },
            None => (cidr, 32),
        };
        let network = Ipv4Addr::from_str(address)
            .map_err(|_| SpireError::CidrParse(cidr.to_string()))?;
        Ipv4Network::new(network, prefix)
    }
}

impl fmt::Display for Ipv4Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl Serialize for Ipv4Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn parse_address(
    address: &str,
) -> Result<Ipv4Addr>
{
    Ipv4Addr::from_str(address)
        .map_err(|_| SpireError::AddressParse(address.to_string()))
}
