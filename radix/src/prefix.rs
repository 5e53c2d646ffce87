// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Type to represent IP-version neutral network prefixes.

use ipnet::{Ipv4Net, Ipv6Net};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display};
pub use std::net::IpAddr;
pub use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PrefixError {
    #[error("Invalid Prefix: {0}")]
    Invalid(String),
    #[error("Mask length {0} is invalid")]
    InvalidLength(u8),
    #[error("Prefix {0} has host bits set")]
    HostBits(String),
}

/// IP version of a prefix or of a whole request. Renders as the keyword
/// routers use to tell the two apart (`ip` / `ipv6`).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    StrumDisplay,
    EnumString,
    EnumIter,
)]
pub enum IpVer {
    #[default]
    #[strum(serialize = "ipv4")]
    #[serde(rename = "ipv4")]
    V4,
    #[strum(serialize = "ipv6")]
    #[serde(rename = "ipv6")]
    V6,
}

impl IpVer {
    /// Command keyword selecting the address family: `ip` or `ipv6`
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            IpVer::V4 => "ip",
            IpVer::V6 => "ipv6",
        }
    }
    /// Longest mask length of the family
    #[must_use]
    pub fn max_len(self) -> u8 {
        match self {
            IpVer::V4 => Prefix::MAX_LEN_IPV4,
            IpVer::V6 => Prefix::MAX_LEN_IPV6,
        }
    }
    /// Prefix matching everything in the family
    #[must_use]
    pub fn root(self) -> Prefix {
        match self {
            IpVer::V4 => Prefix::root_v4(),
            IpVer::V6 => Prefix::root_v6(),
        }
    }
}

/// Type to represent both IPv4 and IPv6 prefixes to expose an IP version-independent API.
/// Prefixes are always in network form: host bits are rejected on construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Prefix {
    IPV4(Ipv4Net),
    IPV6(Ipv6Net),
}

impl Prefix {
    pub const MAX_LEN_IPV4: u8 = 32;
    pub const MAX_LEN_IPV6: u8 = 128;

    /// Build 0.0.0.0/0
    #[must_use]
    pub fn root_v4() -> Prefix {
        Prefix::IPV4(Ipv4Net::default())
    }
    /// Build `::/0`.
    #[must_use]
    pub fn root_v6() -> Prefix {
        Prefix::IPV6(Ipv6Net::default())
    }

    /// Check whether the prefix is IPv4
    #[must_use]
    pub fn is_ipv4(&self) -> bool {
        matches!(self, Prefix::IPV4(_))
    }

    /// Check whether the prefix is IPv6
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        matches!(self, Prefix::IPV6(_))
    }

    #[must_use]
    pub fn ipver(&self) -> IpVer {
        match self {
            Prefix::IPV4(_) => IpVer::V4,
            Prefix::IPV6(_) => IpVer::V6,
        }
    }

    /// Build an `IpAddr` from a prefix
    #[must_use]
    pub fn as_address(&self) -> IpAddr {
        match *self {
            Prefix::IPV4(p) => p.network().into(),
            Prefix::IPV6(p) => p.network().into(),
        }
    }

    /// Get prefix length
    #[must_use]
    pub fn length(&self) -> u8 {
        match *self {
            Prefix::IPV4(p) => p.prefix_len(),
            Prefix::IPV6(p) => p.prefix_len(),
        }
    }

    /// Longest mask length of the prefix family
    #[must_use]
    pub fn max_len(&self) -> u8 {
        self.ipver().max_len()
    }

    /// Network mask, e.g. 255.255.255.0 for a /24
    #[must_use]
    pub fn netmask(&self) -> IpAddr {
        match *self {
            Prefix::IPV4(p) => p.netmask().into(),
            Prefix::IPV6(p) => p.netmask().into(),
        }
    }

    /// Inverse (wildcard) mask, e.g. 0.0.0.255 for a /24
    #[must_use]
    pub fn hostmask(&self) -> IpAddr {
        match *self {
            Prefix::IPV4(p) => p.hostmask().into(),
            Prefix::IPV6(p) => p.hostmask().into(),
        }
    }

    /// Tell if prefix is a host
    #[must_use]
    pub fn is_host(&self) -> bool {
        self.length() == self.max_len()
    }

    /// Build a [`Prefix`] from (&str, u8)
    ///
    /// # Errors
    /// Fails if the address is invalid, the length exceeds the maximum allowed
    /// for the family or the address has bits set beyond the mask.
    pub fn try_from_tuple(tuple: (&str, u8)) -> Result<Self, PrefixError> {
        let a = IpAddr::from_str(tuple.0).map_err(|e| PrefixError::Invalid(e.to_string()))?;
        Prefix::try_from((a, tuple.1))
    }

    #[cfg(any(test, feature = "testing"))]
    #[allow(clippy::missing_panics_doc)]
    pub fn expect_from<T>(val: T) -> Self
    where
        T: TryInto<Prefix>,
        T::Error: Debug,
    {
        val.try_into().expect("Invalid prefix")
    }
}

impl TryFrom<(IpAddr, u8)> for Prefix {
    type Error = PrefixError;

    fn try_from(tuple: (IpAddr, u8)) -> Result<Self, Self::Error> {
        let (addr, len) = tuple;
        let prefix = match addr {
            IpAddr::V4(a) => {
                Prefix::IPV4(Ipv4Net::new(a, len).map_err(|_| PrefixError::InvalidLength(len))?)
            }
            IpAddr::V6(a) => {
                Prefix::IPV6(Ipv6Net::new(a, len).map_err(|_| PrefixError::InvalidLength(len))?)
            }
        };
        if prefix.as_address() != addr {
            return Err(PrefixError::HostBits(format!("{addr}/{len}")));
        }
        Ok(prefix)
    }
}

impl TryFrom<(&str, u8)> for Prefix {
    type Error = PrefixError;

    fn try_from(tuple: (&str, u8)) -> Result<Self, Self::Error> {
        Prefix::try_from_tuple(tuple)
    }
}

impl TryFrom<&str> for Prefix {
    type Error = PrefixError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Prefix::from_str(s)
    }
}

impl FromStr for Prefix {
    type Err = PrefixError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| PrefixError::Invalid(format!("missing mask length in '{s}'")))?;
        let len = u8::from_str(len).map_err(|e| PrefixError::Invalid(format!("{s}: {e}")))?;
        Prefix::try_from_tuple((addr, len))
    }
}

impl From<Ipv4Net> for Prefix {
    fn from(value: Ipv4Net) -> Self {
        Prefix::IPV4(value.trunc())
    }
}

impl From<Ipv6Net> for Prefix {
    fn from(value: Ipv6Net) -> Self {
        Prefix::IPV6(value.trunc())
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Prefix::IPV4(p) => write!(f, "{p}"),
            Prefix::IPV6(p) => write!(f, "{p}"),
        }
    }
}

impl Debug for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Serialize for Prefix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Prefix::from_str(&s).map_err(serde::de::Error::custom)
    }
}
