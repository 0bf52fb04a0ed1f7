//! `compkb identify` command

use anyhow::{bail, Context, Result};

use crate::cli::IdentifyArgs;
use compkb::ops::identify::{format_report, identify, IdentifyOptions};
use compkb::util::diagnostic::emit;
use compkb::GlobalContext;

pub fn execute(args: IdentifyArgs, ctx: &GlobalContext) -> Result<()> {
    let kb = ctx.knowledgebase()?;

    let options = IdentifyOptions {
        kind: args.kind.map(Into::into),
    };
    let report = identify(&kb, args.commands.as_slice(), &options);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report));
    }

    for diag in report.diagnostics() {
        emit(&diag, ctx.color());
    }

    let unknown = report.unknown_count();
    if unknown > 0 {
        bail!("{} of {} command(s) could not be identified", unknown, report.entries.len());
    }
    Ok(())
}
