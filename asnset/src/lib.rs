// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Sparse bitmap over the 32-bit AS number space.
//!
//! The set is a two-level structure: an outer table with one slot per
//! "high half" of the AS number (`asn / 65536`) and, for every band that has
//! at least one member, an 8 KiB block holding one bit per AS number of the
//! band. Bit order inside a byte is MSB first (`0x80 >> (asn % 8)`), so a
//! plain walk of the blocks yields AS numbers in ascending order.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]

use std::fmt::{Debug, Display};
use tracing::trace;

/// Number of AS numbers covered by a single band
pub const BAND_SIZE: usize = 1 << 16;
/// Number of bands needed to cover the 32-bit AS number space
pub const BAND_COUNT: usize = 1 << 16;
/// Size in octets of the membership block of a band
pub const BAND_BYTES: usize = BAND_SIZE / 8;

type Band = Box<[u8]>;

#[inline]
fn band_of(asn: u32) -> usize {
    (asn >> 16) as usize
}
#[inline]
fn byte_of(asn: u32) -> usize {
    ((asn & 0xffff) >> 3) as usize
}
#[inline]
fn bit_of(asn: u32) -> u8 {
    0x80 >> (asn & 0x7)
}

/// A set of AS numbers.
///
/// The outer table is only materialized on the first insertion, so an empty
/// set is free to build.
#[derive(Clone, Default)]
pub struct AsnSet {
    bands: Vec<Option<Band>>,
    len: usize,
}

impl AsnSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `asn` to the set. Returns true if it was not a member yet.
    pub fn insert(&mut self, asn: u32) -> bool {
        if self.bands.is_empty() {
            self.bands.resize(BAND_COUNT, None);
        }
        let band = self.bands[band_of(asn)].get_or_insert_with(|| {
            trace!("Allocating block for AS band {}", band_of(asn));
            vec![0u8; BAND_BYTES].into_boxed_slice()
        });
        let byte = &mut band[byte_of(asn)];
        if *byte & bit_of(asn) != 0 {
            return false;
        }
        *byte |= bit_of(asn);
        self.len += 1;
        true
    }

    /// Tell if `asn` is a member of the set
    #[must_use]
    pub fn contains(&self, asn: u32) -> bool {
        match self.bands.get(band_of(asn)) {
            Some(Some(band)) => band[byte_of(asn)] & bit_of(asn) != 0,
            _ => false,
        }
    }

    /// Number of members
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of bands that own a membership block
    #[must_use]
    pub fn allocated_bands(&self) -> usize {
        self.bands.iter().filter(|b| b.is_some()).count()
    }

    /// Iterate over the members in strictly ascending order. The iterator
    /// borrows the set and can be recreated at will.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bands: &self.bands,
            band: 0,
            offset: 0,
        }
    }
}

impl Debug for AsnSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Display for AsnSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for asn in self {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "AS{asn}")?;
            first = false;
        }
        Ok(())
    }
}

impl PartialEq for AsnSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}
impl Eq for AsnSet {}

impl Extend<u32> for AsnSet {
    fn extend<T: IntoIterator<Item = u32>>(&mut self, iter: T) {
        for asn in iter {
            self.insert(asn);
        }
    }
}

impl FromIterator<u32> for AsnSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        let mut set = AsnSet::new();
        set.extend(iter);
        set
    }
}

impl<'a> IntoIterator for &'a AsnSet {
    type Item = u32;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over an [`AsnSet`]. Bands without a block are skipped
/// without touching memory; zero bytes are skipped as a whole.
#[derive(Clone)]
pub struct Iter<'a> {
    bands: &'a [Option<Band>],
    band: usize,
    /// bit offset inside the current band
    offset: usize,
}

impl Iterator for Iter<'_> {
    type Item = u32;

    #[allow(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<u32> {
        while self.band < self.bands.len() {
            if let Some(block) = &self.bands[self.band] {
                while self.offset < BAND_SIZE {
                    let byte = block[self.offset >> 3];
                    let bit = self.offset & 0x7;
                    if byte << bit == 0 {
                        // nothing left in this byte
                        self.offset = (self.offset | 0x7) + 1;
                        continue;
                    }
                    let found = self.offset;
                    self.offset += 1;
                    if byte & (0x80 >> bit) != 0 {
                        return Some(((self.band << 16) | found) as u32);
                    }
                }
            }
            self.band += 1;
            self.offset = 0;
        }
        None
    }
}
