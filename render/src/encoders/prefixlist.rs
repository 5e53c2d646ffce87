// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Prefix lists.
//!
//! Every concrete node of the tree yields exactly one clause, in traversal
//! order. How a node's mask length match is spelled depends on the dialect,
//! but all of them follow [`LenMatch`]: exact, "up to" (the lower bound is
//! the prefix length) or a two-sided range.

use crate::context::{RenderContext, RenderInput};
use crate::errors::RenderResult;
use radix::prefix::IpVer;
use radix::trie::{Entry, LenMatch};
use std::fmt::Display;
use tracing::debug;

/// ` ge L le H` / ` le H` suffix of IOS-like dialects
pub(crate) struct GeLe<'a>(pub(crate) &'a Entry);

impl Display for GeLe<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.len_match {
            LenMatch::Exact => Ok(()),
            LenMatch::UpTo { high } => write!(f, " le {high}"),
            LenMatch::Range { low, high } => write!(f, " ge {low} le {high}"),
        }
    }
}

/// Huawei spelling of [`GeLe`]
struct GreaterLess<'a>(&'a Entry);

impl Display for GreaterLess<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.len_match {
            LenMatch::Exact => Ok(()),
            LenMatch::UpTo { high } => write!(f, " less-equal {high}"),
            LenMatch::Range { low, high } => write!(f, " greater-equal {low} less-equal {high}"),
        }
    }
}

/// OpenBGPD prefix-set / filter entry, with its leading line break
pub(crate) struct BgpdPrefix<'a>(pub(crate) &'a Entry);

impl Display for BgpdPrefix<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entry = self.0;
        match entry.len_match {
            LenMatch::Exact => write!(f, "\n\t{}", entry.prefix),
            _ if entry.low() == entry.high() => {
                write!(f, "\n\t{} prefixlen = {}", entry.prefix, entry.high())
            }
            _ => write!(
                f,
                "\n\t{} prefixlen {} - {}",
                entry.prefix,
                entry.low(),
                entry.high()
            ),
        }
    }
}

pub fn juniper(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(
        ctx,
        "policy-options {{\nreplace:\n prefix-list {} {{\n",
        ctx.name()
    )?;
    for entry in input.prefixes.entries() {
        writeln!(ctx, "    {};", entry.prefix)?;
    }
    writeln!(ctx, " }}\n}}")?;
    Ok(())
}

/// Cisco IOS. The sequence tag is only there if the request asks for one.
pub fn cisco(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    let family = ctx.request().family();
    writeln!(ctx, "no {} prefix-list {name}", family.keyword())?;
    if input.prefixes.is_empty() {
        let seq = if ctx.request().sequence() == 0 {
            ""
        } else {
            " seq 1"
        };
        writeln!(ctx, "! generated prefix-list {name} is empty")?;
        writeln!(
            ctx,
            "{} prefix-list {name}{seq} deny {}",
            family.keyword(),
            family.root()
        )?;
        return Ok(());
    }
    for entry in input.prefixes.entries() {
        let seq = ctx
            .next_seq()
            .map(|seq| format!(" seq {seq}"))
            .unwrap_or_default();
        writeln!(
            ctx,
            "{} prefix-list {name}{seq} permit {}{}",
            entry.prefix.ipver().keyword(),
            entry.prefix,
            GeLe(&entry)
        )?;
    }
    Ok(())
}

pub fn cisco_xr(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    writeln!(ctx, "no prefix-set {name}\nprefix-set {name}")?;
    for entry in input.prefixes.entries() {
        let sep = match ctx.separator(",\n ") {
            "" => " ",
            sep => sep,
        };
        write!(ctx, "{sep}{}{}", entry.prefix, GeLe(&entry))?;
    }
    writeln!(ctx, "\nend-set")?;
    Ok(())
}

pub fn json(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(ctx, "{{ \"{}\": [", ctx.name())?;
    for entry in input.prefixes.entries() {
        let sep = ctx.separator(",");
        write!(ctx, "{sep}\n    {{ \"prefix\": \"{}\", ", entry.prefix)?;
        match entry.len_match {
            LenMatch::Exact => write!(ctx, "\"exact\": true }}")?,
            LenMatch::UpTo { high } => {
                write!(ctx, "\"exact\": false, \"less-equal\": {high} }}")?;
            }
            LenMatch::Range { low, high } => write!(
                ctx,
                "\"exact\": false,\n      \"greater-equal\": {low}, \"less-equal\": {high} }}"
            )?,
        }
    }
    writeln!(ctx, "\n] }}")?;
    Ok(())
}

/// A BIRD prefix set. Nothing is emitted for an empty tree.
pub fn bird(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    if input.prefixes.is_empty() {
        debug!("Skipping empty prefix-list {} in BIRD format", ctx.name());
        return Ok(());
    }
    write!(ctx, "{} = [", ctx.name())?;
    for entry in input.prefixes.entries() {
        let sep = ctx.separator(",");
        match entry.len_match {
            LenMatch::Exact => write!(ctx, "{sep}\n    {}", entry.prefix)?,
            _ => write!(
                ctx,
                "{sep}\n    {}{{{},{}}}",
                entry.prefix,
                entry.low(),
                entry.high()
            )?,
        }
    }
    writeln!(ctx, "\n];")?;
    Ok(())
}

/// An OpenBGPD filter fragment. An empty list is replaced by a rule denying
/// everything from the origin AS, when the request has one.
pub fn openbgpd(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    let asn = ctx.request().asn();
    let empty = input.prefixes.is_empty();
    if empty {
        writeln!(ctx, "# generated prefix-list {name} (AS {asn}) is empty")?;
        if asn == 0 {
            writeln!(
                ctx,
                "# use -a <asn> to generate \"deny from ASN <asn>\" instead of this list"
            )?;
        }
    }
    if empty && asn != 0 {
        writeln!(ctx, "deny from AS {asn}")?;
        return Ok(());
    }
    let quote = ctx.request().has_name();
    if quote {
        write!(ctx, "{name}=\"")?;
    }
    write!(ctx, "prefix {{ ")?;
    for entry in input.prefixes.entries() {
        write!(ctx, "{}", BgpdPrefix(&entry))?;
    }
    write!(ctx, "\n\t}}")?;
    if quote {
        write!(ctx, "\"")?;
    }
    writeln!(ctx)?;
    Ok(())
}

/// SR OS classic CLI
pub fn nokia(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    write!(
        ctx,
        "configure router policy-options\nbegin\nno prefix-list \"{name}\"\n"
    )?;
    writeln!(ctx, "prefix-list \"{name}\"")?;
    for entry in input.prefixes.entries() {
        match entry.len_match {
            LenMatch::Exact => writeln!(ctx, "    prefix {} exact", entry.prefix)?,
            _ => writeln!(
                ctx,
                "    prefix {} prefix-length-range {}-{}",
                entry.prefix,
                entry.low(),
                entry.high()
            )?,
        }
    }
    writeln!(ctx, "exit\ncommit")?;
    Ok(())
}

/// SR OS model-driven CLI
pub fn nokia_md(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    write!(
        ctx,
        "/configure policy-options\ndelete prefix-list \"{name}\"\n"
    )?;
    writeln!(ctx, "prefix-list \"{name}\" {{")?;
    for entry in input.prefixes.entries() {
        let prefix = entry.prefix;
        match entry.len_match {
            LenMatch::Exact => writeln!(ctx, "    prefix {prefix} type exact {{\n    }}")?,
            LenMatch::Range { low, high } => write!(
                ctx,
                "    prefix {prefix} type range {{\n        start-length {low}\n        \
                 end-length {high}\n    }}\n"
            )?,
            LenMatch::UpTo { high } => write!(
                ctx,
                "    prefix {prefix} type through {{\n        through-length {high}\n    }}\n"
            )?,
        }
    }
    writeln!(ctx, "}}")?;
    Ok(())
}

/// Huawei VRP: address and length are separate words, no sequence numbers
/// on entries
pub fn huawei(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    let family = ctx.request().family();
    writeln!(ctx, "undo ip {}-prefix {name}", family.keyword())?;
    if input.prefixes.is_empty() {
        let seq = if ctx.request().sequence() == 0 {
            ""
        } else {
            " seq 1"
        };
        writeln!(
            ctx,
            "ip {}-prefix {name}{seq} deny {}",
            family.keyword(),
            family.root()
        )?;
        return Ok(());
    }
    for entry in input.prefixes.entries() {
        writeln!(
            ctx,
            "ip {}-prefix {name} permit {} {}{}",
            entry.prefix.ipver().keyword(),
            entry.prefix.as_address(),
            entry.prefix.length(),
            GreaterLess(&entry)
        )?;
    }
    Ok(())
}

/// Arista EOS: entries are always numbered from 1, the requested sequence
/// does not apply.
///
/// The deny line of an empty list is indented like regular entries. This
/// differs from bgpq4, which indents it by three spaces.
pub fn arista(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    let family = ctx.request().family();
    let mut seq: u32 = 1;
    writeln!(ctx, "no {} prefix-list {name}", family.keyword())?;
    if input.prefixes.is_empty() {
        writeln!(ctx, "! generated prefix-list {name} is empty")?;
        writeln!(ctx, "{} prefix-list {name}", family.keyword())?;
        writeln!(ctx, "    seq {seq} deny {}", family.root())?;
        return Ok(());
    }
    writeln!(ctx, "{} prefix-list {name}", family.keyword())?;
    for entry in input.prefixes.entries() {
        writeln!(ctx, "    seq {seq} permit {}{}", entry.prefix, GeLe(&entry))?;
        seq += 1;
    }
    Ok(())
}

/// Mikrotik RouterOS filter rules, one chain per family.
///
/// Aggregated entries print the full `prefix-length=L-H` range. This differs
/// from bgpq4, which prints only `H` for entries matching up to a length.
pub fn mikrotik(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    if input.prefixes.is_empty() {
        writeln!(ctx, "# generated prefix-list {name} is empty")?;
        return Ok(());
    }
    for entry in input.prefixes.entries() {
        let chain = match entry.prefix.ipver() {
            IpVer::V4 => "V4",
            IpVer::V6 => "V6",
        };
        write!(
            ctx,
            "/routing filter add action=accept chain=\"{name}-{chain}\" prefix={}",
            entry.prefix
        )?;
        if entry.len_match != LenMatch::Exact {
            write!(ctx, " prefix-length={}-{}", entry.low(), entry.high())?;
        }
        writeln!(ctx)?;
    }
    Ok(())
}
