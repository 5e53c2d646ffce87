// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Rendering of router filters out of expanded routing registry data.
//!
//! A [`RenderRequest`] names what to produce (dialect, artifact kind, object
//! name and a few knobs); [`render`] looks the (kind, dialect) pair up in the
//! capability table and runs the matching encoder over an [`AsnSet`] and/or a
//! [`RadixTree`], writing the configuration text to a caller-provided sink.
//! Inputs are never mutated, so independent renders may run concurrently
//! over shared data.

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod capability;
pub mod context;
pub mod dialect;
pub mod encoders;
pub mod errors;
pub mod request;
pub mod template;

pub use asnset::AsnSet;
pub use capability::{Capability, CapabilityEntry, Encoder, capabilities, lookup, render};
pub use context::{RenderContext, RenderInput};
pub use dialect::{ArtifactKind, Dialect};
pub use errors::{RenderError, RenderResult, RequestError};
pub use radix::prefix::{IpVer, Prefix};
pub use radix::trie::{Entry, LenMatch, RadixTree};
pub use request::{RenderRequest, RenderRequestBuilder};
pub use template::Template;

use tracectl::{LevelFilter, trace_target};
trace_target!("render", LevelFilter::WARN, &["filtergen"]);
