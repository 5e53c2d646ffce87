// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! User supplied per-prefix templates, as used by the format dialect.
//!
//! Placeholders:
//!
//! | placeholder | expands to                                   |
//! |-------------|----------------------------------------------|
//! | `%n`        | the prefix, as `address/length`              |
//! | `%N`        | the object name                              |
//! | `%l`        | the shortest matched mask length             |
//! | `%h`        | the longest matched mask length              |
//! | `%m`        | the network mask                             |
//! | `%i`        | the inverse (wildcard) mask                  |
//! | `%%`        | a literal `%`                                |
//!
//! The escapes `\n`, `\t` and `\\` are honored; any other backslash is kept
//! as is.

use crate::errors::RequestError;
use radix::trie::Entry;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Prefix,
    Name,
    Low,
    High,
    Netmask,
    Hostmask,
}

/// A compiled template
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    newline_terminated: bool,
}

impl Template {
    /// Compile a template.
    ///
    /// # Errors
    /// Fails on an unknown placeholder or a trailing `%`.
    pub fn compile(raw: &str) -> Result<Self, RequestError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = raw.chars();

        while let Some(c) = chars.next() {
            match c {
                '%' => {
                    let segment = match chars.next() {
                        Some('%') => {
                            literal.push('%');
                            continue;
                        }
                        Some('n') => Segment::Prefix,
                        Some('N') => Segment::Name,
                        Some('l') => Segment::Low,
                        Some('h') => Segment::High,
                        Some('m') => Segment::Netmask,
                        Some('i') => Segment::Hostmask,
                        Some(other) => {
                            return Err(RequestError::Template(format!(
                                "unknown placeholder %{other}"
                            )));
                        }
                        None => {
                            return Err(RequestError::Template("trailing %".to_string()));
                        }
                    };
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                '\\' => match chars.next() {
                    Some('n') => literal.push('\n'),
                    Some('t') => literal.push('\t'),
                    Some('\\') => literal.push('\\'),
                    Some(other) => {
                        literal.push('\\');
                        literal.push(other);
                    }
                    None => literal.push('\\'),
                },
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self {
            segments,
            newline_terminated: raw.ends_with("\\n"),
        })
    }

    /// Tell if the raw template ends with an escaped newline, in which case
    /// no newline is added after the rendered list
    #[must_use]
    pub fn is_newline_terminated(&self) -> bool {
        self.newline_terminated
    }

    /// Expand the template for one entry
    #[must_use]
    pub fn expand(&self, name: &str, entry: &Entry) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Prefix => out.push_str(&entry.prefix.to_string()),
                Segment::Name => out.push_str(name),
                Segment::Low => out.push_str(&entry.low().to_string()),
                Segment::High => out.push_str(&entry.high().to_string()),
                Segment::Netmask => out.push_str(&entry.prefix.netmask().to_string()),
                Segment::Hostmask => out.push_str(&entry.prefix.hostmask().to_string()),
            }
        }
        out
    }
}

impl FromStr for Template {
    type Err = RequestError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::compile(s)
    }
}
