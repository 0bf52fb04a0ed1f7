//! High-level operations.
//!
//! This module contains the implementation of compkb commands.

pub mod describe;
pub mod detect;
pub mod identify;
pub mod installed;

pub use describe::{describe_family, list_families, FamilyDetail, FamilySummary};
pub use detect::{detect, DetectOptions, DetectReport};
pub use identify::{identify, IdentifyOptions, IdentifyReport};
pub use installed::{
    CompilerProbe, InstalledCompiler, InstalledCompilerSet, InstalledFamily, WrappedCompiler,
    WrapperArgs,
};
