//! `compkb families` command

use anyhow::{Context, Result};

use crate::cli::FamiliesArgs;
use compkb::ops::describe::{format_families, list_families};
use compkb::{GlobalContext, RegistryKind};

pub fn execute(args: FamiliesArgs, ctx: &GlobalContext) -> Result<()> {
    let kb = ctx.knowledgebase()?;

    let kinds: Vec<RegistryKind> = match args.kind {
        Some(kind) => vec![kind.into()],
        None => RegistryKind::ALL.to_vec(),
    };
    let summaries = list_families(&kb, &kinds);

    if args.json {
        let json =
            serde_json::to_string_pretty(&summaries).context("failed to serialize families")?;
        println!("{}", json);
    } else {
        print!("{}", format_families(&summaries));
    }

    Ok(())
}
