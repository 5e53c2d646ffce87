// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Prefix based access control: extended ACLs, route-filter policies and
//! match lists, depending on what the dialect calls it

use crate::context::{RenderContext, RenderInput};
use crate::encoders::prefixlist::BgpdPrefix;
use crate::encoders::routefilter::RouteFilter;
use crate::errors::{RenderError, RenderResult};
use radix::prefix::{IpVer, Prefix};
use radix::trie::{Entry, LenMatch};
use std::net::{IpAddr, Ipv4Addr};

/// Juniper policy statement with one `from` block of route filters. A name
/// like `POLICY/TERM` puts the block in a term of the policy. Unlike bgpq4
/// there is no trailing space after the policy name.
pub fn juniper(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let request = ctx.request();
    let term = match request.name().split_once('/') {
        Some((policy, term)) => {
            write!(
                ctx,
                "policy-options {{\n policy-statement {policy} {{\n  term {term} {{\n\
                 replace:\n   from {{\n"
            )?;
            true
        }
        None => {
            write!(
                ctx,
                "policy-options {{\n policy-statement {} {{\nreplace:\n  from {{\n",
                request.name()
            )?;
            false
        }
    };
    if let Some(clause) = request.match_clause() {
        writeln!(ctx, "    {clause};")?;
    }
    for entry in input.prefixes.entries() {
        let line = RouteFilter {
            entry: &entry,
            keyword: true,
        };
        writeln!(ctx, "{line}")?;
    }
    if input.prefixes.is_empty() {
        writeln!(
            ctx,
            "    route-filter {} orlonger reject;",
            input.prefixes.family().root()
        )?;
    }
    if term {
        writeln!(ctx, "   }}\n  }}")?;
    } else {
        writeln!(ctx, "  }}")?;
    }
    writeln!(ctx, " }}\n}}")?;
    Ok(())
}

/// Bits below a mask length
fn shr(len: u8) -> u32 {
    u32::MAX.checked_shr(u32::from(len)).unwrap_or(0)
}

fn netmask(len: u8) -> u32 {
    !shr(len)
}

fn v4(prefix: &Prefix) -> Option<Ipv4Addr> {
    match prefix.as_address() {
        IpAddr::V4(addr) => Some(addr),
        IpAddr::V6(_) => None,
    }
}

/// One ACE. Mask length matches are expressed through the wildcard bits of
/// the address and of the mask.
fn ace(addr: Ipv4Addr, entry: &Entry) -> String {
    let len = entry.prefix.length();
    if entry.len_match == LenMatch::Exact {
        return format!(
            " permit ip host {addr} host {}",
            Ipv4Addr::from(netmask(len))
        );
    }
    let (low, high) = (entry.low(), entry.high());
    let wildaddr = shr(len) & !shr(high);
    let mask = Ipv4Addr::from(netmask(low));
    let wildmask = shr(low) & !shr(high);
    let source = if wildaddr == 0 {
        format!("host {addr}")
    } else {
        format!("{addr} {}", Ipv4Addr::from(wildaddr))
    };
    let destination = if wildmask == 0 {
        format!("host {mask}")
    } else {
        format!("{mask} {}", Ipv4Addr::from(wildmask))
    };
    format!(" permit ip {source} {destination}")
}

/// Cisco IOS extended access list, also used for Arista EOS. These lists
/// match on the IPv4 address and mask of routes, so IPv6 cannot be
/// expressed.
///
/// Exact host routes get mask `255.255.255.255`. This differs from bgpq4,
/// which derives a zero mask for /32 entries.
pub fn cisco(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let request = ctx.request();
    let unsupported = RenderError::Unsupported {
        kind: request.kind(),
        dialect: request.dialect(),
        hint: "extended access lists are IPv4 only",
    };
    if request.family() == IpVer::V6 {
        return Err(unsupported);
    }
    let aces = input
        .prefixes
        .entries()
        .map(|entry| v4(&entry.prefix).map(|addr| ace(addr, &entry)))
        .collect::<Option<Vec<_>>>()
        .ok_or(unsupported)?;

    let name = request.name();
    writeln!(ctx, "no ip access-list extended {name}")?;
    if aces.is_empty() {
        writeln!(ctx, "! generated access-list {name} is empty")?;
        writeln!(ctx, "ip access-list extended {name} deny any any")?;
        return Ok(());
    }
    writeln!(ctx, "ip access-list extended {name}")?;
    for line in aces {
        writeln!(ctx, "{line}")?;
    }
    Ok(())
}

pub fn openbgpd(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(ctx, "prefix-set {} {{", ctx.name())?;
    for entry in input.prefixes.entries() {
        write!(ctx, "{}", BgpdPrefix(&entry))?;
    }
    writeln!(ctx, "\n}}")?;
    Ok(())
}

/// SR OS classic CLI match list. The empty list comment names the actual
/// list, `ipv6-prefix-list` included, where bgpq4 always says `ip-`.
pub fn nokia(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    let list = format!("{}-prefix-list", input.prefixes.family().keyword());
    write!(
        ctx,
        "configure filter match-list\nno {list} \"{name}\"\n{list} \"{name}\" create\n"
    )?;
    for entry in input.prefixes.entries() {
        writeln!(ctx, "    prefix {}", entry.prefix)?;
    }
    if input.prefixes.is_empty() {
        writeln!(ctx, "# generated {list} {name} is empty")?;
    }
    writeln!(ctx, "exit")?;
    Ok(())
}

/// SR OS model-driven match list
pub fn nokia_md(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let name = ctx.name();
    let list = format!("{}-prefix-list", input.prefixes.family().keyword());
    write!(
        ctx,
        "/configure filter match-list\ndelete {list} \"{name}\"\n{list} \"{name}\" {{\n"
    )?;
    for entry in input.prefixes.entries() {
        writeln!(ctx, "    prefix {} {{ }}", entry.prefix)?;
    }
    if input.prefixes.is_empty() {
        writeln!(ctx, "# generated {list} {name} is empty")?;
    }
    writeln!(ctx, "}}")?;
    Ok(())
}
