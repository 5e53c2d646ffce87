// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! AS-path filters, on received (`as-path`) or announced (`oaspath`) routes.
//!
//! Members of the AS set are batched `aswidth` at a time into one regular
//! expression each. If the origin AS is a member of its own set it is left
//! out of the batches and gets a dedicated leading clause instead, matching
//! paths made of the origin alone.

use crate::batch::{batches, has_self};
use crate::context::{RenderContext, RenderInput};
use crate::dialect::ArtifactKind;
use crate::errors::RenderResult;
use crate::request::RenderRequest;
use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Direction {
    /// origin AS anchored at the start of the path
    Received,
    Announced,
}

impl From<ArtifactKind> for Direction {
    fn from(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::OutputAsPath => Direction::Announced,
            _ => Direction::Received,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum RegexStyle {
    /// `_`-separated POSIX regexes: Cisco, Arista, Cisco XR, Huawei
    Posix,
    Juniper,
    /// SR OS expressions
    Nokia,
}

struct Alternatives<'a>(&'a [u32], &'static str);

impl Display for Alternatives<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, asn) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", self.1)?;
            }
            write!(f, "{asn}")?;
        }
        Ok(())
    }
}

impl RegexStyle {
    fn origin_only(self, dir: Direction, asn: u32) -> String {
        match (self, dir) {
            (RegexStyle::Posix, Direction::Received) => format!("^{asn}(_{asn})*$"),
            (RegexStyle::Posix, Direction::Announced) => format!("^(_{asn})*$"),
            (RegexStyle::Juniper, _) => format!("^{asn}({asn})*$"),
            (RegexStyle::Nokia, _) => format!("{asn}+"),
        }
    }

    fn group(self, dir: Direction, asn: u32, group: &[u32]) -> String {
        match (self, dir) {
            (RegexStyle::Posix, Direction::Received) => {
                format!("^{asn}(_[0-9]+)*_({})$", Alternatives(group, "|"))
            }
            (RegexStyle::Posix, Direction::Announced) => {
                format!("^(_[0-9]+)*_({})$", Alternatives(group, "|"))
            }
            (RegexStyle::Juniper, Direction::Received) => {
                format!("^{asn}(.)*({})$", Alternatives(group, "|"))
            }
            (RegexStyle::Juniper, Direction::Announced) => {
                format!("^(.)*({})$", Alternatives(group, "|"))
            }
            (RegexStyle::Nokia, Direction::Received) => {
                format!("{asn}.*[{}]", Alternatives(group, " "))
            }
            (RegexStyle::Nokia, Direction::Announced) => {
                format!(".*[{}]", Alternatives(group, " "))
            }
        }
    }
}

/// The clauses of a path filter in emission order: the origin-only clause
/// if any, then one clause per batch
fn clauses<'a>(
    request: &RenderRequest,
    input: &RenderInput<'a>,
    style: RegexStyle,
) -> impl Iterator<Item = String> + use<'a> {
    let dir = Direction::from(request.kind());
    let asn = request.asn();
    let origin_only = has_self(input.asns, asn).then(|| style.origin_only(dir, asn));
    origin_only.into_iter().chain(
        batches(input.asns, request.aswidth(), Some(asn))
            .map(move |group| style.group(dir, asn, &group)),
    )
}

/// Cisco IOS, also used for Arista EOS
pub fn cisco(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    writeln!(ctx, "no ip as-path access-list {name}")?;
    let mut empty = true;
    for re in clauses(ctx.request(), input, RegexStyle::Posix) {
        writeln!(ctx, "ip as-path access-list {name} permit {re}")?;
        empty = false;
    }
    if empty {
        writeln!(ctx, "ip as-path access-list {name} deny .*")?;
    }
    Ok(())
}

pub fn cisco_xr(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(ctx, "as-path-set {}", ctx.name())?;
    for re in clauses(ctx.request(), input, RegexStyle::Posix) {
        let sep = ctx.separator(",");
        write!(ctx, "{sep}\n  ios-regex '{re}'")?;
    }
    writeln!(ctx, "\nend-set")?;
    Ok(())
}

/// Juniper as-path group. The `aNone` fallback of an empty group has the
/// two-space indent of regular entries in both directions; bgpq4 does not
/// indent it for announced routes.
pub fn juniper(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(
        ctx,
        "policy-options {{\nreplace:\n as-path-group {} {{\n",
        ctx.name()
    )?;
    let mut line = 0;
    for re in clauses(ctx.request(), input, RegexStyle::Juniper) {
        writeln!(ctx, "  as-path a{line} \"{re}\";")?;
        line += 1;
    }
    if line == 0 {
        writeln!(ctx, "  as-path aNone \"!.*\";")?;
    }
    writeln!(ctx, " }}\n}}")?;
    Ok(())
}

/// SR OS classic as-path group. Both directions end with `exit` and
/// `commit`, which bgpq4 only does for received routes.
pub fn nokia(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    write!(
        ctx,
        "configure router policy-options\nbegin\nno as-path-group \"{name}\"\n"
    )?;
    writeln!(ctx, "as-path-group \"{name}\"")?;
    for (i, expr) in clauses(ctx.request(), input, RegexStyle::Nokia).enumerate() {
        writeln!(ctx, "  entry {} expression \"{expr}\"", i + 1)?;
    }
    writeln!(ctx, "exit\ncommit")?;
    Ok(())
}

pub fn nokia_md(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    write!(
        ctx,
        "/configure policy-options\ndelete as-path-group \"{name}\"\n"
    )?;
    writeln!(ctx, "as-path-group \"{name}\" {{")?;
    for (i, expr) in clauses(ctx.request(), input, RegexStyle::Nokia).enumerate() {
        write!(
            ctx,
            "  entry {} {{\n    expression \"{expr}\"\n  }}\n",
            i + 1
        )?;
    }
    writeln!(ctx, "}}")?;
    Ok(())
}

pub fn huawei(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    writeln!(ctx, "undo ip as-path-filter {name}")?;
    let mut empty = true;
    for re in clauses(ctx.request(), input, RegexStyle::Posix) {
        writeln!(ctx, "ip as-path-filter {name} permit {re}")?;
        empty = false;
    }
    if empty {
        writeln!(ctx, "ip as-path-filter {name} deny .*")?;
    }
    Ok(())
}

/// One `allow` rule per member, origin included; no batching.
pub fn openbgpd(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let verb = match Direction::from(ctx.request().kind()) {
        Direction::Received => "from",
        Direction::Announced => "to",
    };
    let asn = ctx.request().asn();
    for member in input.asns {
        writeln!(ctx, "allow {verb} AS {asn} AS {member}")?;
    }
    if input.asns.is_empty() {
        writeln!(ctx, "deny {verb} AS {asn}")?;
    }
    Ok(())
}
