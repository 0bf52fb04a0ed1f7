//! Core data structures for compkb.
//!
//! This module contains the compiler knowledgebase itself:
//! - Roles a compiler can fill (CC, CXX, MPI_FC, ...)
//! - Families of compilers and the per-command information they own
//! - Registries indexing families by command, and the built-in tables
//! - The host preference policy

pub mod errors;
pub mod family;
pub mod host;
pub mod info;
pub mod knowledgebase;
pub mod registry;
pub mod role;
pub mod seed;

pub use errors::KbError;
pub use family::{CompilerFamily, FamilyFlags};
pub use host::HostProfile;
pub use info::CompilerInfo;
pub use knowledgebase::KnowledgeBase;
pub use registry::{CompilerRegistry, RegistryKind};
pub use role::CompilerRole;
