// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Prefixes and the annotated radix tree consumed by the filter renderers.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::similar_names)]

pub mod prefix;
pub mod trie;
