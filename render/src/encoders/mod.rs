// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Dialect encoders, one module per artifact family.
//!
//! Encoders have the [`Encoder`](crate::capability::Encoder) signature and
//! only fail if the sink does, except where documented.

#![allow(clippy::missing_errors_doc)]

pub mod acl;
pub mod aspath;
pub mod asset;
pub mod format;
pub mod prefixlist;
pub mod routefilter;

#[cfg(test)]
pub(crate) mod testing {
    use crate::capability::render;
    use crate::context::RenderInput;
    use crate::request::RenderRequest;
    use asnset::AsnSet;
    use radix::prefix::{IpVer, Prefix};
    use radix::trie::{Entry, LenMatch, RadixTree};

    /// Render to a string, panicking on errors
    pub fn rendered(request: &RenderRequest, asns: &AsnSet, tree: &RadixTree) -> String {
        let mut out = Vec::new();
        render(request, &RenderInput::new(asns, tree), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    pub fn exact(s: &str) -> Entry {
        Entry::exact(Prefix::expect_from(s))
    }
    pub fn upto(s: &str, high: u8) -> Entry {
        Entry::new(Prefix::expect_from(s), LenMatch::UpTo { high })
    }
    pub fn range(s: &str, low: u8, high: u8) -> Entry {
        Entry::new(Prefix::expect_from(s), LenMatch::Range { low, high })
    }

    /// One exact, one "upto" and one two-sided entry
    pub fn v4_tree() -> RadixTree {
        RadixTree::from_entries(
            IpVer::V4,
            [
                exact("10.0.0.0/24"),
                upto("10.1.0.0/16", 24),
                range("10.2.0.0/16", 20, 24),
            ],
        )
        .unwrap()
    }

    pub fn v6_tree() -> RadixTree {
        RadixTree::from_entries(IpVer::V6, [exact("2001:db8::/32"), upto("2001:db9::/32", 48)])
            .unwrap()
    }
}
