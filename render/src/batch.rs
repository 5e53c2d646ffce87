// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Grouping of AS numbers into width-limited clauses

use asnset::{AsnSet, Iter};

/// Ascending groups of at most `width` members of a set, optionally leaving
/// one AS number out. Every group but the last has exactly `width` members.
pub struct Batches<'a> {
    members: Iter<'a>,
    skip: Option<u32>,
    width: usize,
}

impl Iterator for Batches<'_> {
    type Item = Vec<u32>;

    fn next(&mut self) -> Option<Vec<u32>> {
        let mut group = Vec::new();
        for asn in self.members.by_ref() {
            if Some(asn) == self.skip {
                continue;
            }
            group.push(asn);
            if group.len() == self.width {
                break;
            }
        }
        (!group.is_empty()).then_some(group)
    }
}

/// Group the members of `set` by `width`, leaving `skip` out. A width of 0 is
/// taken as 1.
#[must_use]
pub fn batches(set: &AsnSet, width: usize, skip: Option<u32>) -> Batches<'_> {
    Batches {
        members: set.iter(),
        skip,
        width: width.max(1),
    }
}

/// Tell if the origin AS is a member of its own expansion, in which case the
/// path filters get a clause for paths made of the origin only
#[must_use]
pub fn has_self(set: &AsnSet, origin: u32) -> bool {
    set.contains(origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches() {
        let set: AsnSet = [65001, 65002, 65003].into_iter().collect();
        let groups: Vec<_> = batches(&set, 2, Some(65000)).collect();
        assert_eq!(groups, vec![vec![65001, 65002], vec![65003]]);

        let groups: Vec<_> = batches(&set, 2, Some(65002)).collect();
        assert_eq!(groups, vec![vec![65001, 65003]]);

        assert_eq!(batches(&AsnSet::new(), 4, None).count(), 0);
        assert_eq!(batches(&set, 0, None).count(), 3);
    }

    #[test]
    fn test_unbounded_width() {
        let set: AsnSet = [65001, 65002, 65003].into_iter().collect();
        let groups: Vec<_> = batches(&set, usize::MAX, Some(65000)).collect();
        assert_eq!(groups, vec![vec![65001, 65002, 65003]]);
    }

    #[test]
    fn test_only_origin() {
        let set: AsnSet = [65000].into_iter().collect();
        assert!(has_self(&set, 65000));
        assert_eq!(batches(&set, 4, Some(65000)).count(), 0);
    }

    #[test]
    fn test_batch_properties() {
        bolero::check!()
            .with_type()
            .for_each(|(asns, width, skip): &(Vec<u32>, u8, Option<u32>)| {
                let width = usize::from(*width).max(1);
                let set: AsnSet = asns.iter().copied().collect();
                let groups: Vec<Vec<u32>> = batches(&set, width, *skip).collect();
                if let Some((last, full)) = groups.split_last() {
                    assert!(full.iter().all(|g| g.len() == width));
                    assert!((1..=width).contains(&last.len()));
                }
                let flat: Vec<u32> = groups.into_iter().flatten().collect();
                let expected: Vec<u32> = set.iter().filter(|a| Some(*a) != *skip).collect();
                assert_eq!(flat, expected);
            });
    }
}
