//! `compkb family` command

use anyhow::{Context, Result};

use crate::cli::FamilyArgs;
use compkb::ops::describe::{describe_family, format_family};
use compkb::util::diagnostic::emit;
use compkb::{GlobalContext, RegistryKind};

pub fn execute(args: FamilyArgs, ctx: &GlobalContext) -> Result<()> {
    let kb = ctx.knowledgebase()?;
    let kind = RegistryKind::from(args.kind);

    let detail = match describe_family(&kb, kind, &args.name) {
        Ok(detail) => detail,
        Err(err) => {
            emit(&err.to_diagnostic(), ctx.color());
            std::process::exit(1);
        }
    };

    if args.json {
        let json = serde_json::to_string_pretty(&detail).context("failed to serialize family")?;
        println!("{}", json);
    } else {
        print!("{}", format_family(&detail));
    }

    Ok(())
}
