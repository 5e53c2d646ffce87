// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Display implementations

use crate::control::{TargetCfg, TargetDb};
use std::fmt::Display;

macro_rules! TARGET_FMT {
    () => {
        "{:>40} │ {:>8} │ {}"
    };
}

impl Display for TargetCfg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            format_args!(TARGET_FMT!(), self.target, self.level, self.tags.join(","))
        )
    }
}

impl Display for TargetDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", format_args!(TARGET_FMT!(), "TARGET", "LEVEL", "TAGS"))?;
        for cfg in self.targets.values() {
            writeln!(f, "{cfg}")?;
        }
        write!(f, "{}", format_args!(TARGET_FMT!(), "(default)", self.level, "--"))
    }
}

pub(crate) struct TargetsByTag<'a>(pub(crate) &'a TargetDb);

impl Display for TargetsByTag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let db = self.0;
        for (tag, members) in &db.tags {
            writeln!(f, " {tag}:")?;
            for cfg in db.targets.values().filter(|c| members.contains(c.target)) {
                writeln!(f, "      {:<40} : {}", cfg.target, cfg.level)?;
            }
        }
        Ok(())
    }
}
