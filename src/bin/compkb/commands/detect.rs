//! `compkb detect` command

use anyhow::{Context, Result};

use crate::cli::DetectArgs;
use compkb::ops::detect::{detect, format_report, DetectOptions};
use compkb::util::diagnostic::{emit, Diagnostic};
use compkb::GlobalContext;

pub fn execute(args: DetectArgs, ctx: &GlobalContext) -> Result<()> {
    let kb = ctx.knowledgebase()?;
    tracing::debug!("Detecting compilers on {}", kb.profile());

    let options = DetectOptions {
        kind: args.kind.map(Into::into),
        family: args.family,
        arch_args: args.arch_args,
    };
    let report = detect(&kb, &options)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{}", json);
    } else {
        print!("{}", format_report(&report));
    }

    for warning in &report.warnings {
        let mut diag = Diagnostic::warning(format!("could not probe {}", warning));
        if !ctx.is_verbose() {
            diag = diag.with_suggestion("Run with --verbose to see the wrapper's output");
        }
        emit(&diag, ctx.color());
    }

    Ok(())
}
