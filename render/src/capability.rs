// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! What can be rendered in which dialect.
//!
//! Every (artifact kind, dialect) pair has exactly one entry in a static
//! table: either the encoder producing it, or the reason it cannot be
//! produced. [`render`] is a lookup in that table.

use crate::context::{RenderContext, RenderInput};
use crate::dialect::{ArtifactKind, Dialect};
use crate::encoders::{acl, aspath, asset, format, prefixlist, routefilter};
use crate::errors::{RenderError, RenderResult};
use crate::request::RenderRequest;
use std::io::Write;
use tracing::{debug, trace};

/// Encoding procedure of one (kind, dialect) pair
pub type Encoder = fn(&mut RenderContext<'_>, &RenderInput<'_>) -> RenderResult;

#[derive(Clone, Copy, Debug)]
pub enum Capability {
    Supported(Encoder),
    /// The dialect has no way to express the artifact. The hint tells what
    /// is possible instead.
    Unsupported(&'static str),
    /// The dialect has no concept of the artifact at all and no caller is
    /// expected to ask for it
    Unreachable,
}

impl Capability {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        matches!(self, Capability::Supported(_))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CapabilityEntry {
    pub kind: ArtifactKind,
    pub dialect: Dialect,
    pub capability: Capability,
}

macro_rules! table {
    ($($kind:ident { $($dialect:ident => $cap:expr),+ $(,)? })+) => {
        &[$($(
            CapabilityEntry {
                kind: ArtifactKind::$kind,
                dialect: Dialect::$dialect,
                capability: $cap,
            },
        )+)+]
    };
}

use Capability::{Supported, Unreachable, Unsupported};

const NO_AS_PATH_MIKROTIK: &str = "AS-path filters are not supported for Mikrotik";
const NO_AS_PATH_FORMAT: &str = "the format dialect renders prefix-lists only";
const NO_OUTPUT_PATH: &str = "only forward AS-path filters are supported, as AS sets";
const AS_SET_DIALECTS: &str = "as-sets supported for JSON, OpenBGPD, and BIRD only";

static CAPABILITIES: &[CapabilityEntry] = table! {
    PrefixList {
        Juniper => Supported(prefixlist::juniper),
        Cisco => Supported(prefixlist::cisco),
        CiscoXr => Supported(prefixlist::cisco_xr),
        OpenBgpd => Supported(prefixlist::openbgpd),
        Bird => Supported(prefixlist::bird),
        Json => Supported(prefixlist::json),
        Nokia => Supported(prefixlist::nokia),
        NokiaMd => Supported(prefixlist::nokia_md),
        Huawei => Supported(prefixlist::huawei),
        Arista => Supported(prefixlist::arista),
        Mikrotik => Supported(prefixlist::mikrotik),
        Format => Supported(format::prefix_list),
    }
    AsPath {
        Juniper => Supported(aspath::juniper),
        Cisco => Supported(aspath::cisco),
        CiscoXr => Supported(aspath::cisco_xr),
        OpenBgpd => Supported(aspath::openbgpd),
        Bird => Supported(asset::bird),
        Json => Supported(asset::json),
        Nokia => Supported(aspath::nokia),
        NokiaMd => Supported(aspath::nokia_md),
        Huawei => Supported(aspath::huawei),
        Arista => Supported(aspath::cisco),
        Mikrotik => Unsupported(NO_AS_PATH_MIKROTIK),
        Format => Unsupported(NO_AS_PATH_FORMAT),
    }
    OutputAsPath {
        Juniper => Supported(aspath::juniper),
        Cisco => Supported(aspath::cisco),
        CiscoXr => Supported(aspath::cisco_xr),
        OpenBgpd => Supported(aspath::openbgpd),
        Bird => Unsupported(NO_OUTPUT_PATH),
        Json => Unsupported(NO_OUTPUT_PATH),
        Nokia => Supported(aspath::nokia),
        NokiaMd => Supported(aspath::nokia_md),
        Huawei => Supported(aspath::huawei),
        Arista => Supported(aspath::cisco),
        Mikrotik => Unsupported(NO_AS_PATH_MIKROTIK),
        Format => Unsupported(NO_AS_PATH_FORMAT),
    }
    AsSet {
        Juniper => Unsupported(AS_SET_DIALECTS),
        Cisco => Unsupported(AS_SET_DIALECTS),
        CiscoXr => Unsupported(AS_SET_DIALECTS),
        OpenBgpd => Supported(asset::openbgpd),
        Bird => Supported(asset::bird),
        Json => Supported(asset::json),
        Nokia => Unsupported(AS_SET_DIALECTS),
        NokiaMd => Unsupported(AS_SET_DIALECTS),
        Huawei => Unsupported(AS_SET_DIALECTS),
        Arista => Unsupported(AS_SET_DIALECTS),
        Mikrotik => Unsupported(AS_SET_DIALECTS),
        Format => Unsupported(AS_SET_DIALECTS),
    }
    ExtendedAcl {
        Juniper => Supported(acl::juniper),
        Cisco => Supported(acl::cisco),
        CiscoXr => Unreachable,
        OpenBgpd => Supported(acl::openbgpd),
        Bird => Unreachable,
        Json => Unreachable,
        Nokia => Supported(acl::nokia),
        NokiaMd => Supported(acl::nokia_md),
        Huawei => Unreachable,
        Arista => Supported(acl::cisco),
        Mikrotik => Unreachable,
        Format => Unreachable,
    }
    RouteFilterList {
        Juniper => Supported(routefilter::juniper),
        Cisco => Unreachable,
        CiscoXr => Unreachable,
        OpenBgpd => Unreachable,
        Bird => Unreachable,
        Json => Unreachable,
        Nokia => Unreachable,
        NokiaMd => Unreachable,
        Huawei => Unreachable,
        Arista => Unreachable,
        Mikrotik => Unreachable,
        Format => Unreachable,
    }
};

/// The whole capability table, kind by kind
#[must_use]
pub fn capabilities() -> &'static [CapabilityEntry] {
    CAPABILITIES
}

/// What the table says about a (kind, dialect) pair
#[must_use]
pub fn lookup(kind: ArtifactKind, dialect: Dialect) -> Capability {
    CAPABILITIES
        .iter()
        .find(|e| e.kind == kind && e.dialect == dialect)
        .map_or(Capability::Unreachable, |e| e.capability)
}

/// Render the artifact described by `request` over `input` into `out`.
///
/// Nothing is written if the pair is not supported. Output of a failed
/// encoder may be partial, callers wanting all or nothing should render into
/// a buffer.
///
/// # Errors
/// Fails with [`RenderError::Unsupported`] or [`RenderError::Unreachable`]
/// if the dialect cannot express the artifact, and with whatever error the
/// encoder or the sink returns.
pub fn render(request: &RenderRequest, input: &RenderInput, out: &mut dyn Write) -> RenderResult {
    let (kind, dialect) = (request.kind(), request.dialect());
    match lookup(kind, dialect) {
        Capability::Supported(encoder) => {
            trace!("Rendering {request}");
            let mut ctx = RenderContext::new(request, out);
            encoder(&mut ctx, input)?;
            ctx.finish()?;
            Ok(())
        }
        Capability::Unsupported(hint) => {
            debug!("Refusing to render {kind} for {dialect}: {hint}");
            Err(RenderError::Unsupported {
                kind,
                dialect,
                hint,
            })
        }
        Capability::Unreachable => Err(RenderError::Unreachable { kind, dialect }),
    }
}
