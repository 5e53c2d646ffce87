// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! User formatted prefix lists

use crate::context::{RenderContext, RenderInput};
use crate::errors::{RenderResult, RequestError};
use crate::template::Template;

/// Expand the request template once per prefix. Output always ends with a
/// line break, added if the template does not provide one. An empty tree
/// renders that line break alone, which bgpq4 does not emit.
pub fn prefix_list(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    let raw = ctx.request().template().ok_or(RequestError::MissingTemplate)?;
    let template = Template::compile(raw)?;
    let name = ctx.name();
    for entry in input.prefixes.entries() {
        write!(ctx, "{}", template.expand(name, &entry))?;
    }
    if !template.is_newline_terminated() {
        writeln!(ctx)?;
    }
    Ok(())
}
