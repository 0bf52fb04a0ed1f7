//! CLI definitions using clap.

use clap::builder::FalseyValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use compkb::RegistryKind;

/// compkb - Identify compilers by family and role
#[derive(Parser)]
#[command(name = "compkb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify compiler commands by family and role
    Identify(IdentifyArgs),

    /// List known compiler families
    Families(FamiliesArgs),

    /// Show the members and flags of one family
    Family(FamilyArgs),

    /// List compiler roles
    Roles(RolesArgs),

    /// Find installed compilers on PATH
    Detect(DetectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Knowledgebase selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Host compilers (CC, CXX, FC, UPC)
    Host,
    /// MPI compiler wrappers
    Mpi,
    /// SHMEM compiler wrappers
    Shmem,
}

impl From<KindArg> for RegistryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Host => RegistryKind::Host,
            KindArg::Mpi => RegistryKind::Mpi,
            KindArg::Shmem => RegistryKind::Shmem,
        }
    }
}

#[derive(Args)]
pub struct IdentifyArgs {
    /// Compiler commands, with or without a path
    #[arg(required = true)]
    pub commands: Vec<String>,

    /// Only search this knowledgebase
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FamiliesArgs {
    /// Only list families of this knowledgebase
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FamilyArgs {
    /// Family name, e.g. Intel
    pub name: String,

    /// Knowledgebase the family belongs to
    #[arg(long, value_enum, default_value = "host")]
    pub kind: KindArg,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct RolesArgs {
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Only detect compilers of this knowledgebase
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,

    /// Only detect this family
    #[arg(long)]
    pub family: Option<String>,

    /// Extra arguments passed to wrappers when probing, e.g. -m64
    #[arg(long = "arch-arg", allow_hyphen_values = true)]
    pub arch_args: Vec<String>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
