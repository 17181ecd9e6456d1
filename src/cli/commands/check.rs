use anyhow::{Ok, Result};

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};
use crate::core::CheckContext;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;
    let sources = ctx.bundle_sources(&cmd.bundles)?;

    let batch = ctx.analyze(&sources);
    let bundles_checked = batch.analyses.len();
    let entries_checked = batch.entry_count();

    Ok(finish(
        CommandSummary::Check,
        batch.into_issues(),
        bundles_checked,
        entries_checked,
    ))
}
