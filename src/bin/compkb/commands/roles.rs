//! `compkb roles` command

use anyhow::{Context, Result};

use crate::cli::RolesArgs;
use compkb::ops::describe::format_roles;
use compkb::CompilerRole;

pub fn execute(args: RolesArgs) -> Result<()> {
    let roles = CompilerRole::all();

    if args.json {
        let json = serde_json::to_string_pretty(roles).context("failed to serialize roles")?;
        println!("{}", json);
    } else {
        print!("{}", format_roles(roles));
    }

    Ok(())
}
