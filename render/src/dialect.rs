// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Target dialects and artifact kinds

use crate::errors::RenderError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Configuration syntax of the target router or tool
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    Juniper,
    Cisco,
    CiscoXr,
    #[strum(serialize = "openbgpd")]
    #[serde(rename = "openbgpd")]
    OpenBgpd,
    Bird,
    Json,
    Nokia,
    NokiaMd,
    Huawei,
    Arista,
    Mikrotik,
    Format,
}

impl Dialect {
    /// Look a dialect up by name.
    ///
    /// # Errors
    /// Fails with [`RenderError::UnknownDialect`] if `name` is none of the
    /// known dialects.
    pub fn lookup(name: &str) -> Result<Self, RenderError> {
        Dialect::from_str(name).map_err(|_| RenderError::UnknownDialect(name.to_string()))
    }

    /// Number of AS numbers grouped per clause when a request does not say
    #[must_use]
    pub fn default_aswidth(self) -> usize {
        match self {
            Dialect::Cisco | Dialect::Arista | Dialect::Mikrotik => 4,
            Dialect::CiscoXr => 6,
            Dialect::Bird => 10,
            Dialect::Juniper
            | Dialect::Nokia
            | Dialect::NokiaMd
            | Dialect::OpenBgpd
            | Dialect::Json
            | Dialect::Huawei
            | Dialect::Format => 8,
        }
    }
}

/// What to produce
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    PrefixList,
    /// Filter on the path of routes received from the AS
    AsPath,
    /// Filter on the path of routes announced to the AS
    #[strum(serialize = "oaspath")]
    #[serde(rename = "oaspath")]
    OutputAsPath,
    AsSet,
    #[strum(serialize = "eacl")]
    #[serde(rename = "eacl")]
    ExtendedAcl,
    RouteFilterList,
}
