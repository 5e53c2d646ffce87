// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Render request

use crate::dialect::{ArtifactKind, Dialect};
use crate::errors::RequestError;
use crate::template::Template;
use derive_builder::Builder;
use radix::prefix::IpVer;
use std::fmt::Display;

/// Name used when a request does not carry one
pub const NO_NAME: &str = "NN";

/// What to render. Built once with [`RenderRequestBuilder`] and immutable
/// thereafter.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate", error = "RequestError"))]
pub struct RenderRequest {
    dialect: Dialect,

    kind: ArtifactKind,

    #[builder(setter(into, strip_option), default)]
    name: Option<String>,

    /// AS the path filters are built for
    #[builder(default)]
    asn: u32,

    #[builder(default)]
    family: IpVer,

    /// Alternatives per clause, dialect default if not set
    #[builder(setter(strip_option), default)]
    aswidth: Option<usize>,

    /// First sequence number, 0 for none
    #[builder(default)]
    sequence: u32,

    /// Free text added to Juniper route-filter policies
    #[builder(setter(into, strip_option), default)]
    match_clause: Option<String>,

    /// Per-prefix template of the format dialect
    #[builder(setter(into, strip_option), default)]
    template: Option<String>,
}

impl RenderRequestBuilder {
    fn validate(&self) -> Result<(), RequestError> {
        if let Some(Some(0)) = self.aswidth {
            return Err(RequestError::InvalidWidth);
        }
        match &self.template {
            Some(Some(raw)) => {
                Template::compile(raw)?;
            }
            _ if self.dialect == Some(Dialect::Format)
                && self.kind == Some(ArtifactKind::PrefixList) =>
            {
                return Err(RequestError::MissingTemplate);
            }
            _ => {}
        }
        Ok(())
    }
}

impl RenderRequest {
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }
    #[must_use]
    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }
    /// Object name, `NN` if none was given
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(NO_NAME)
    }
    /// Tell if the request carries a name other than the placeholder
    #[must_use]
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| n != NO_NAME)
    }
    #[must_use]
    pub fn asn(&self) -> u32 {
        self.asn
    }
    #[must_use]
    pub fn family(&self) -> IpVer {
        self.family
    }
    #[must_use]
    pub fn aswidth(&self) -> usize {
        self.aswidth
            .unwrap_or_else(|| self.dialect.default_aswidth())
    }
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }
    #[must_use]
    pub fn match_clause(&self) -> Option<&str> {
        self.match_clause.as_deref()
    }
    #[must_use]
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }
}

impl Display for RenderRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} '{}' ({}, AS{}, width {}, seq {})",
            self.dialect,
            self.kind,
            self.name(),
            self.family,
            self.asn,
            self.aswidth(),
            self.sequence
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let request = RenderRequestBuilder::default()
            .dialect(Dialect::Cisco)
            .kind(ArtifactKind::AsPath)
            .build()
            .unwrap();
        assert_eq!(request.name(), "NN");
        assert!(!request.has_name());
        assert_eq!(request.asn(), 0);
        assert_eq!(request.family(), IpVer::V4);
        assert_eq!(request.aswidth(), 4);
        assert_eq!(request.sequence(), 0);
        assert_eq!(request.match_clause(), None);
        assert_eq!(request.template(), None);
        assert_eq!(
            request.to_string(),
            "cisco as-path 'NN' (ipv4, AS0, width 4, seq 0)"
        );
    }

    #[test]
    fn test_explicit_values() {
        let request = RenderRequestBuilder::default()
            .dialect(Dialect::Juniper)
            .kind(ArtifactKind::ExtendedAcl)
            .name("POLICY/TERM")
            .asn(65000)
            .family(IpVer::V6)
            .aswidth(2)
            .sequence(10)
            .match_clause("protocol bgp")
            .build()
            .unwrap();
        assert_eq!(request.name(), "POLICY/TERM");
        assert!(request.has_name());
        assert_eq!(request.aswidth(), 2);
        assert_eq!(request.match_clause(), Some("protocol bgp"));
    }

    #[test]
    fn test_validation() {
        let missing = RenderRequestBuilder::default()
            .dialect(Dialect::Cisco)
            .build();
        assert_eq!(missing, Err(RequestError::MissingField("kind")));

        let zero = RenderRequestBuilder::default()
            .dialect(Dialect::Cisco)
            .kind(ArtifactKind::AsPath)
            .aswidth(0)
            .build();
        assert_eq!(zero, Err(RequestError::InvalidWidth));

        let no_template = RenderRequestBuilder::default()
            .dialect(Dialect::Format)
            .kind(ArtifactKind::PrefixList)
            .build();
        assert_eq!(no_template, Err(RequestError::MissingTemplate));

        let bad_template = RenderRequestBuilder::default()
            .dialect(Dialect::Format)
            .kind(ArtifactKind::PrefixList)
            .template("%n %z")
            .build();
        assert!(matches!(bad_template, Err(RequestError::Template(_))));
    }
}
