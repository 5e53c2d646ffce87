// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Per-call rendering state

use crate::request::RenderRequest;
use asnset::AsnSet;
use radix::trie::RadixTree;
use std::fmt::Arguments;
use std::io::{self, Write};

/// The data a render call reads: the expanded AS numbers and the aggregated
/// prefixes of the policy object. Encoders only use the part their artifact
/// kind is about.
#[derive(Clone, Copy)]
pub struct RenderInput<'a> {
    pub asns: &'a AsnSet,
    pub prefixes: &'a RadixTree,
}

impl<'a> RenderInput<'a> {
    #[must_use]
    pub fn new(asns: &'a AsnSet, prefixes: &'a RadixTree) -> Self {
        Self { asns, prefixes }
    }
}

/// Output sink plus whatever state an encoder needs while emitting one
/// artifact: the "first entry" flag of joined lists and the running
/// sequence number. A context lives for exactly one render call, so nothing
/// leaks from one call to the next.
pub struct RenderContext<'a> {
    request: &'a RenderRequest,
    out: &'a mut dyn Write,
    first: bool,
    seq: u32,
}

impl<'a> RenderContext<'a> {
    pub fn new(request: &'a RenderRequest, out: &'a mut dyn Write) -> Self {
        Self {
            request,
            out,
            first: true,
            seq: request.sequence(),
        }
    }

    #[must_use]
    pub fn request(&self) -> &'a RenderRequest {
        self.request
    }

    /// Object name, `NN` if the request has none
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.request.name()
    }

    /// Write formatted output to the sink. This makes `write!` and
    /// `writeln!` work on a context.
    ///
    /// # Errors
    /// Fails if the sink fails.
    pub fn write_fmt(&mut self, args: Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(args)
    }

    /// `sep`, except for the first call on this context which gets nothing
    pub fn separator<'s>(&mut self, sep: &'s str) -> &'s str {
        if std::mem::replace(&mut self.first, false) {
            ""
        } else {
            sep
        }
    }

    /// Tell if nothing went through [`RenderContext::separator`] yet
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.first
    }

    /// Next sequence number, `None` if the request does not want any
    pub fn next_seq(&mut self) -> Option<u32> {
        if self.seq == 0 {
            return None;
        }
        let seq = self.seq;
        self.seq += 1;
        Some(seq)
    }

    /// Flush the sink.
    ///
    /// # Errors
    /// Fails if the sink fails.
    pub fn finish(self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{ArtifactKind, Dialect};
    use crate::request::RenderRequestBuilder;

    fn request(sequence: u32) -> RenderRequest {
        RenderRequestBuilder::default()
            .dialect(Dialect::Cisco)
            .kind(ArtifactKind::PrefixList)
            .sequence(sequence)
            .build()
            .unwrap()
    }

    #[test]
    fn test_separator() {
        let request = request(0);
        let mut buf = Vec::new();
        let mut ctx = RenderContext::new(&request, &mut buf);
        writeln!(ctx, "no ip prefix-list {}", ctx.name()).unwrap();
        assert!(ctx.is_first());
        for item in ["a", "b", "c"] {
            let sep = ctx.separator(",");
            write!(ctx, "{sep}{item}").unwrap();
        }
        assert!(!ctx.is_first());
        ctx.finish().unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "no ip prefix-list NN\na,b,c");
    }

    #[test]
    fn test_sequence() {
        let mut buf = Vec::new();
        let request = request(5);
        let mut ctx = RenderContext::new(&request, &mut buf);
        assert_eq!(ctx.next_seq(), Some(5));
        assert_eq!(ctx.next_seq(), Some(6));

        let request = super::tests::request(0);
        let mut ctx = RenderContext::new(&request, &mut buf);
        assert_eq!(ctx.next_seq(), None);
        assert_eq!(ctx.next_seq(), None);
    }

    #[test]
    fn test_fresh_state_per_context() {
        let request = request(1);
        let mut buf = Vec::new();
        {
            let mut ctx = RenderContext::new(&request, &mut buf);
            ctx.separator(",");
            ctx.next_seq();
            ctx.next_seq();
        }
        let mut ctx = RenderContext::new(&request, &mut buf);
        assert!(ctx.is_first());
        assert_eq!(ctx.next_seq(), Some(1));
    }
}
