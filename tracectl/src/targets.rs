// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Link-time registry of log targets

use crate::LevelFilter;
use linkme::distributed_slice;

/// A log target as declared by [`trace_target!`](crate::trace_target)
pub struct LogTarget {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: &'static [&'static str],
}

impl LogTarget {
    pub const fn new(
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
    ) -> Self {
        Self {
            target,
            name,
            level,
            tags,
        }
    }
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[distributed_slice]
pub static LOG_TARGETS: [LogTarget];

#[macro_export]
/// Declare the log target of the calling module, with a short name, a
/// default level and a list of tags
macro_rules! trace_target {
    // The const scope lets the macro be used several times in a crate
    // without colliding static names.
    ($name:expr, $level:expr, $tags:expr) => {
        const _: () = {
            use $crate::targets::{LOG_TARGETS, LogTarget};
            #[linkme::distributed_slice(LOG_TARGETS)]
            static LOG_TGT: LogTarget = LogTarget::new(module_path!(), $name, $level, $tags);
        };
    };
}
