// Netmask to prefix-length conversion for IPv4 and IPv6 masks

use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Infer the family from the literal syntax only: a colon means IPv6.
    pub fn of(literal: &str) -> Self {
        if literal.contains(':') {
            AddressFamily::V6
        } else {
            AddressFamily::V4
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetmaskError {
    #[error("unrecognized netmask syntax '{0}'")]
    Unrecognized(String),

    #[error("netmask '{0}' has non-contiguous bits")]
    NonContiguous(String),
}

/// Netmask written for default routes.
pub fn default_netmask(family: AddressFamily) -> &'static str {
    match family {
        AddressFamily::V4 => "0.0.0.0",
        AddressFamily::V6 => "::",
    }
}

/// Number of leading one-bits in a dotted-quad or colon-form mask.
pub fn prefix_len(mask: &str) -> Result<u8, NetmaskError> {
    let (bits, width) = match AddressFamily::of(mask) {
        AddressFamily::V4 => {
            let addr: Ipv4Addr = mask
                .parse()
                .map_err(|_| NetmaskError::Unrecognized(mask.to_string()))?;
            ((u32::from(addr) as u128) << 96, 32)
        }
        AddressFamily::V6 => {
            let addr: Ipv6Addr = mask
                .parse()
                .map_err(|_| NetmaskError::Unrecognized(mask.to_string()))?;
            (u128::from(addr), 128)
        }
    };

    let ones = bits.leading_ones();
    // Everything after the leading ones must be zero
    if ones < 128 && bits << ones != 0 {
        return Err(NetmaskError::NonContiguous(mask.to_string()));
    }

    Ok(ones.min(width) as u8)
}
