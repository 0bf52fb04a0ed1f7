//! Command implementations

pub mod completions;
pub mod detect;
pub mod families;
pub mod family;
pub mod identify;
pub mod roles;
