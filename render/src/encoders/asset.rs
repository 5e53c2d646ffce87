// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! AS sets: plain member lists, no origin special case. JSON and BIRD use
//! the same encoders for forward AS-path filters.

use crate::batch::batches;
use crate::context::{RenderContext, RenderInput};
use crate::errors::RenderResult;
use tracing::debug;

/// A JSON object holding a single array. Members are comma separated and
/// each group starts on a new line.
pub fn json(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(ctx, "{{\"{}\": [", ctx.name())?;
    for group in batches(input.asns, ctx.request().aswidth(), None) {
        for (i, asn) in group.into_iter().enumerate() {
            let sep = ctx.separator(",");
            let brk = if i == 0 { "\n  " } else { "" };
            write!(ctx, "{sep}{brk}{asn}")?;
        }
    }
    writeln!(ctx, "\n]}}")?;
    Ok(())
}

/// A BIRD set definition, nothing at all if there are no members
pub fn bird(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    if input.asns.is_empty() {
        debug!("Skipping empty AS set {} in BIRD format", ctx.name());
        return Ok(());
    }
    write!(ctx, "{} = [", ctx.name())?;
    for group in batches(input.asns, ctx.request().aswidth(), None) {
        let sep = ctx.separator(",\n    ");
        write!(ctx, "{sep}")?;
        for (i, asn) in group.into_iter().enumerate() {
            let sep = if i == 0 { "" } else { ", " };
            write!(ctx, "{sep}{asn}")?;
        }
    }
    writeln!(ctx, "];")?;
    Ok(())
}

pub fn openbgpd(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(ctx, "as-set {} {{", ctx.name())?;
    for group in batches(input.asns, ctx.request().aswidth(), None) {
        for (i, asn) in group.into_iter().enumerate() {
            let sep = if i == 0 { "\n\t" } else { " " };
            write!(ctx, "{sep}{asn}")?;
        }
    }
    writeln!(ctx, "\n}}")?;
    Ok(())
}
