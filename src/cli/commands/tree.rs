use anyhow::{Ok, Result};

use super::super::args::TreeCommand;
use super::{CommandResult, CommandSummary, TreeSummary, helper::finish};
use crate::core::{BundleSource, CheckContext, analyze_bundle};

pub fn tree(cmd: TreeCommand) -> Result<CommandResult> {
    let ctx = CheckContext::new(&cmd.common)?;
    let source = BundleSource::from_name(&ctx.source_root, &cmd.bundle);

    let analysis = analyze_bundle(&source, &ctx.resolver, ctx.encoding)?;
    let issues = analysis.issues.clone();
    let entries_checked = analysis.entry_count;

    Ok(finish(
        CommandSummary::Tree(TreeSummary {
            analysis,
            json: cmd.json,
        }),
        issues,
        1,
        entries_checked,
    ))
}
