// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

#![deny(clippy::all, clippy::pedantic)]

mod input;

use crate::input::{DataError, PolicyData};

use args::{CmdArgs, Parser};
use render::{ArtifactKind, RenderError, RenderInput, RequestError, capabilities, render};
use std::io::Write;
use std::process::ExitCode;
use thiserror::Error;
use tracectl::{LevelFilter, get_log_ctl, trace_target};
use tracing::{debug, error};

trace_target!("filtergen", LevelFilter::WARN, &["filtergen"]);

#[derive(Debug, Error)]
enum FiltergenError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// One line per artifact kind, listing the dialects able to render it
fn capability_summary() -> String {
    let mut out = String::new();
    let mut current: Option<ArtifactKind> = None;
    for entry in capabilities() {
        if current != Some(entry.kind) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{:<18}", entry.kind.to_string()));
            current = Some(entry.kind);
        }
        if entry.capability.is_supported() {
            out.push(' ');
            out.push_str(&entry.dialect.to_string());
        }
    }
    out.push('\n');
    out
}

/// Render into a buffer, so that nothing is printed unless rendering
/// succeeds
fn run(args: &CmdArgs) -> Result<Vec<u8>, FiltergenError> {
    let request = args.request()?;
    let data = PolicyData::load(args.input())?;
    let asns = data.asns();
    let prefixes = data.tree(request.family())?;
    debug!(
        "Loaded {} AS numbers and {} prefixes",
        asns.len(),
        prefixes.entries().count()
    );
    let mut out = Vec::new();
    render(&request, &RenderInput::new(&asns, &prefixes), &mut out)?;
    Ok(out)
}

fn main() -> ExitCode {
    let args = CmdArgs::parse();
    let logctl = get_log_ctl();
    if let Some(tracing) = args.tracing()
        && let Err(e) = logctl.setup_from_string(tracing)
    {
        error!("Invalid tracing configuration: {e}");
        return ExitCode::FAILURE;
    }
    if args.show_tracing_tags() {
        print!("{}", logctl.dump_by_tag());
        return ExitCode::SUCCESS;
    }
    if args.show_tracing_targets() {
        print!("{}", logctl.dump());
        return ExitCode::SUCCESS;
    }
    if args.show_capabilities() {
        print!("{}", capability_summary());
        return ExitCode::SUCCESS;
    }

    let written = run(&args).and_then(|out| {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
        Ok(())
    });
    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
