// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Juniper route filters, shared by route-filter-lists and route-filter
//! policies

use crate::context::{RenderContext, RenderInput};
use crate::errors::RenderResult;
use radix::trie::{Entry, LenMatch};
use std::fmt::Display;

/// One route filter line. Inside a policy `from` block the line carries the
/// `route-filter` keyword, inside a route-filter-list it does not.
pub(crate) struct RouteFilter<'a> {
    pub(crate) entry: &'a Entry,
    pub(crate) keyword: bool,
}

impl Display for RouteFilter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = if self.keyword { "route-filter " } else { "" };
        let prefix = self.entry.prefix;
        match self.entry.len_match {
            LenMatch::Exact => write!(f, "    {keyword}{prefix} exact;"),
            LenMatch::UpTo { high } => write!(f, "    {keyword}{prefix} upto /{high};"),
            LenMatch::Range { low, high } => {
                write!(f, "    {keyword}{prefix} prefix-length-range /{low}-/{high};")
            }
        }
    }
}

pub fn juniper(ctx: &mut RenderContext, input: &RenderInput) -> RenderResult {
    write!(
        ctx,
        "policy-options {{\nreplace:\n  route-filter-list {} {{\n",
        ctx.name()
    )?;
    for entry in input.prefixes.entries() {
        let line = RouteFilter {
            entry: &entry,
            keyword: false,
        };
        writeln!(ctx, "{line}")?;
    }
    if input.prefixes.is_empty() {
        writeln!(
            ctx,
            "    {} orlonger reject;",
            input.prefixes.family().root()
        )?;
    }
    writeln!(ctx, "  }}\n}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::dialect::{ArtifactKind, Dialect};
    use crate::encoders::testing::{rendered, v4_tree};
    use crate::request::RenderRequestBuilder;
    use asnset::AsnSet;
    use pretty_assertions::assert_eq;
    use radix::prefix::IpVer;
    use radix::trie::RadixTree;

    fn render(tree: &RadixTree) -> String {
        let request = RenderRequestBuilder::default()
            .dialect(Dialect::Juniper)
            .kind(ArtifactKind::RouteFilterList)
            .name("RFL")
            .family(tree.family())
            .build()
            .unwrap();
        rendered(&request, &AsnSet::new(), tree)
    }

    #[test]
    fn test_route_filter_list() {
        assert_eq!(
            render(&v4_tree()),
            "policy-options {\nreplace:\n  route-filter-list RFL {\n    \
             10.0.0.0/24 exact;\n    \
             10.1.0.0/16 upto /24;\n    \
             10.2.0.0/16 prefix-length-range /20-/24;\n  }\n}\n"
        );
    }

    #[test]
    fn test_route_filter_list_empty() {
        assert_eq!(
            render(&RadixTree::new(IpVer::V6)),
            "policy-options {\nreplace:\n  route-filter-list RFL {\n    \
             ::/0 orlonger reject;\n  }\n}\n"
        );
    }
}
