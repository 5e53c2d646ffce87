// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Process-wide log control.

use ordermap::{OrderMap, OrderSet};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, Registry, filter::LevelFilter, prelude::*, reload};

use crate::{display::TargetsByTag, targets::LOG_TARGETS, trace_target};

trace_target!("tracectl", LevelFilter::INFO, &[]);

#[derive(Debug, Error, PartialEq)]
pub enum LogConfigError {
    #[error("Invalid syntax '{0}': it should be tag=level")]
    Syntax(String),
    #[error("Invalid level '{0}'")]
    Level(String),
    #[error("Unknown tag '{0}'")]
    UnknownTag(String),
}

#[derive(Debug, Clone)]
pub struct TargetCfg {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: Vec<&'static str>,
}

impl TargetCfg {
    fn new(
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
    ) -> Self {
        // a target can always be addressed by its name
        let mut tags = tags.to_vec();
        if !tags.contains(&name) {
            tags.push(name);
        }
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
    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

#[derive(Debug)]
pub(crate) struct TargetDb {
    pub(crate) level: LevelFilter,
    pub(crate) targets: OrderMap<&'static str, TargetCfg>,
    pub(crate) tags: OrderMap<&'static str, OrderSet<&'static str>>,
}

impl TargetDb {
    fn new(level: LevelFilter) -> Self {
        let mut db = Self {
            level,
            targets: OrderMap::new(),
            tags: OrderMap::new(),
        };
        for t in LOG_TARGETS {
            db.register(TargetCfg::new(t.target, t.name, t.level, t.tags));
        }
        db
    }
    fn register(&mut self, cfg: TargetCfg) {
        let target = cfg.target;
        for tag in &cfg.tags {
            self.tags.entry(*tag).or_default().insert(target);
        }
        if self.targets.insert(target, cfg).is_some() {
            warn!("Log target {target} declared more than once");
        }
    }
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(self.level.to_string());
        for cfg in self.targets.values() {
            match format!("{}={}", cfg.target, cfg.level).parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => error!("Bad filter directive for {}: {e}", cfg.target),
            }
        }
        filter
    }
    fn tagged_mut(&mut self, tag: &str) -> Option<impl Iterator<Item = &mut TargetCfg>> {
        let members = self.tags.get(tag)?;
        Some(
            self.targets
                .values_mut()
                .filter(|cfg| members.contains(cfg.target)),
        )
    }
    pub(crate) fn as_config_string(&self) -> String {
        let mut out = format!("default={}", self.level);
        for cfg in self.targets.values() {
            out += &format!(",{}={}", cfg.name, cfg.level);
        }
        out
    }
}

/// Parse comma-separated `tag=level` items, level being one of off, error,
/// warn, info, debug, trace
fn parse_config(input: &str) -> Result<OrderMap<String, LevelFilter>, LogConfigError> {
    let mut config = OrderMap::new();
    for item in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (tag, level) = item
            .split_once('=')
            .ok_or_else(|| LogConfigError::Syntax(item.to_string()))?;
        let level = LevelFilter::from_str(level.trim())
            .map_err(|_| LogConfigError::Level(level.trim().to_string()))?;
        config.insert(tag.trim().to_string(), level);
    }
    Ok(config)
}

/// Owner of the subscriber filter. There is a single one per process, see
/// [`get_log_ctl`].
pub struct LogControl {
    db: Mutex<TargetDb>,
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogControl {
    fn new() -> Self {
        let db = TargetDb::new(LevelFilter::WARN);
        let (filter_layer, filter) = reload::Layer::new(db.env_filter());
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        if let Err(e) = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .try_init()
        {
            // another subscriber is already in place, e.g. in tests
            eprintln!("Could not install log subscriber: {e}");
        }
        Self {
            db: Mutex::new(db),
            filter,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TargetDb> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reload(&self, db: &TargetDb) {
        if let Err(e) = self.filter.reload(db.env_filter()) {
            error!("Failed to reload log filter: {e}");
        }
    }

    pub fn set_default_level(&self, level: LevelFilter) {
        let mut db = self.lock();
        if db.level != level {
            db.level = level;
            self.reload(&db);
            debug!("Default log level set to {level}");
        }
    }

    #[must_use]
    pub fn default_level(&self) -> LevelFilter {
        self.lock().level
    }

    pub fn set_level_all(&self, level: LevelFilter) {
        let mut db = self.lock();
        db.targets.values_mut().for_each(|cfg| cfg.level = level);
        self.reload(&db);
    }

    /// Set the level of every target carrying `tag`.
    ///
    /// # Errors
    /// Fails if no target carries the tag.
    pub fn set_tag_level(&self, tag: &str, level: LevelFilter) -> Result<(), LogConfigError> {
        let mut db = self.lock();
        let changed = db
            .tagged_mut(tag)
            .ok_or_else(|| LogConfigError::UnknownTag(tag.to_string()))?
            .filter(|cfg| cfg.level != level)
            .map(|cfg| cfg.level = level)
            .count();
        if changed > 0 {
            self.reload(&db);
        }
        debug!("Log level for tag '{tag}' set to {level} ({changed} targets changed)");
        Ok(())
    }

    /// Apply a configuration like `default=warn,render=debug`. `default` sets
    /// the level of everything that is not a declared target; `all` sets every
    /// declared target, and can be refined by the items that follow.
    ///
    /// # Errors
    /// Fails on syntax errors, bad levels or unknown tags. Nothing is applied
    /// if the configuration does not parse.
    pub fn setup_from_string(&self, input: &str) -> Result<(), LogConfigError> {
        let config = parse_config(input)?;
        if let Some(level) = config.get("default") {
            self.set_default_level(*level);
        }
        if let Some(level) = config.get("all") {
            self.set_level_all(*level);
        }
        for (tag, level) in config
            .iter()
            .filter(|(tag, _)| !matches!(tag.as_str(), "default" | "all"))
        {
            self.set_tag_level(tag, *level)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn target(&self, target: &str) -> Option<TargetCfg> {
        self.lock().targets.get(target).cloned()
    }

    #[must_use]
    pub fn targets_by_tag(&self, tag: &str) -> Vec<TargetCfg> {
        let db = self.lock();
        db.tags
            .get(tag)
            .map(|members| {
                db.targets
                    .values()
                    .filter(|cfg| members.contains(cfg.target))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn as_config_string(&self) -> String {
        self.lock().as_config_string()
    }

    /// Human readable table of targets and their levels
    #[must_use]
    pub fn dump(&self) -> String {
        self.lock().to_string()
    }

    /// Human readable listing of targets, grouped by tag
    #[must_use]
    pub fn dump_by_tag(&self) -> String {
        TargetsByTag(&self.lock()).to_string()
    }

    pub fn log_config(&self) {
        info!("{}", self.dump());
    }
}

static LOG_CTL: OnceLock<LogControl> = OnceLock::new();

/// Get the process-wide [`LogControl`], installing the subscriber on first use
pub fn get_log_ctl() -> &'static LogControl {
    LOG_CTL.get_or_init(LogControl::new)
}
