//! compkb CLI - Identify compilers by family and role

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use compkb::GlobalContext;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("compkb=debug")
    } else {
        EnvFilter::new("compkb=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut ctx = GlobalContext::new()?;
    ctx.set_verbose(cli.verbose);
    ctx.set_color(!cli.no_color && std::io::stderr().is_terminal());

    // Execute command
    match cli.command {
        Commands::Identify(args) => commands::identify::execute(args, &ctx),
        Commands::Families(args) => commands::families::execute(args, &ctx),
        Commands::Family(args) => commands::family::execute(args, &ctx),
        Commands::Roles(args) => commands::roles::execute(args),
        Commands::Detect(args) => commands::detect::execute(args, &ctx),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
