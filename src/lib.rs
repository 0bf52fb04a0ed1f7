//! compkb - A compiler identification knowledgebase
//!
//! This crate knows which compiler commands belong to which vendor
//! families and which language role each one fills. Given a command such
//! as `/opt/intel/bin/icpc` or `x86_64-linux-gnu-gcc-12` it reports the
//! family and role without ever running the compiler.

pub mod core;
pub mod ops;
pub mod util;

pub use core::{
    CompilerFamily, CompilerInfo, CompilerRegistry, CompilerRole, HostProfile, KbError,
    KnowledgeBase, RegistryKind,
};
pub use util::context::GlobalContext;
