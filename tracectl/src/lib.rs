// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Runtime control of log levels.
//!
//! Crates declare their log targets with [`trace_target!`]; the targets are
//! collected at link time and their levels can be changed by name or tag
//! through the process-wide [`LogControl`].

pub mod control;
pub mod display;
pub mod targets;

pub use control::{LogConfigError, LogControl, get_log_ctl};
pub use tracing_subscriber::filter::LevelFilter;
