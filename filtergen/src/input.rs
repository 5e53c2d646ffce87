// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Policy data: AS numbers already expanded and prefixes already
//! aggregated, read from YAML.
//!
//! ```yaml
//! asns: [65001, 65002]
//! prefixes:
//!   - prefix: 10.0.0.0/24
//!   - prefix: 10.1.0.0/16
//!     le: 24
//!   - prefix: 10.2.0.0/16
//!     ge: 20
//!     le: 24
//! ```

use radix::prefix::{IpVer, Prefix};
use radix::trie::{Entry, LenMatch, RadixError, RadixTree};
use render::AsnSet;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to read policy data: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid policy data: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    #[error("Invalid prefix entry: {0}")]
    Radix(#[from] RadixError),
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PrefixData {
    pub prefix: Prefix,
    #[serde(default)]
    pub ge: Option<u8>,
    #[serde(default)]
    pub le: Option<u8>,
}

impl PrefixData {
    /// `ge` alone reaches up to the longest mask of the family, `le` alone
    /// starts at the prefix length
    fn len_match(&self) -> LenMatch {
        let len = self.prefix.length();
        match (self.ge, self.le) {
            (None, None) => LenMatch::Exact,
            (None, Some(high)) => LenMatch::UpTo { high },
            (Some(low), high) => {
                LenMatch::classify(len, low, high.unwrap_or(self.prefix.max_len()))
            }
        }
    }

    fn entry(&self) -> Entry {
        Entry::new(self.prefix, self.len_match())
    }
}

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PolicyData {
    #[serde(default)]
    pub asns: Vec<u32>,
    #[serde(default)]
    pub prefixes: Vec<PrefixData>,
}

impl PolicyData {
    /// Parse policy data.
    ///
    /// # Errors
    /// Fails if the YAML is malformed or does not describe policy data.
    pub fn from_yaml(yaml: &str) -> Result<Self, DataError> {
        if yaml.trim().is_empty() {
            return Ok(PolicyData::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load policy data from a file, or from stdin if there is no path.
    ///
    /// # Errors
    /// Fails if the data cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, DataError> {
        let yaml = match path {
            Some(path) => {
                debug!("Reading policy data from {}", path.display());
                std::fs::read_to_string(path)?
            }
            None => {
                debug!("Reading policy data from stdin");
                let mut yaml = String::new();
                std::io::stdin().lock().read_to_string(&mut yaml)?;
                yaml
            }
        };
        Self::from_yaml(&yaml)
    }

    #[must_use]
    pub fn asns(&self) -> AsnSet {
        self.asns.iter().copied().collect()
    }

    /// The prefixes of one family, in the order given. Prefixes of the other
    /// family are left out.
    ///
    /// # Errors
    /// Fails if a length range does not fit its prefix.
    pub fn tree(&self, family: IpVer) -> Result<RadixTree, DataError> {
        let (kept, skipped): (Vec<_>, Vec<_>) = self
            .prefixes
            .iter()
            .partition(|p| p.prefix.ipver() == family);
        if !skipped.is_empty() {
            debug!("Ignoring {} prefixes not in {family}", skipped.len());
        }
        Ok(RadixTree::from_entries(
            family,
            kept.into_iter().map(PrefixData::entry),
        )?)
    }
}
