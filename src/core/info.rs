//! Information about one compiler command.

use std::fmt;

use serde::Serialize;

use crate::core::role::CompilerRole;
use crate::util::InternedString;

/// A concrete compiler command in one family and role.
///
/// The compiler need not be installed; see
/// [`InstalledCompiler`](crate::ops::installed::InstalledCompiler) for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CompilerInfo {
    command: InternedString,
    family: InternedString,
    role: CompilerRole,
}

impl CompilerInfo {
    pub(crate) fn new(command: InternedString, family: InternedString, role: CompilerRole) -> Self {
        CompilerInfo {
            command,
            family,
            role,
        }
    }

    /// Command without path or arguments, e.g. `icpc`.
    pub fn command(&self) -> &'static str {
        self.command.as_str()
    }

    /// Name of the owning family.
    pub fn family(&self) -> &'static str {
        self.family.as_str()
    }

    /// The role this command fills in its family.
    pub fn role(&self) -> &CompilerRole {
        &self.role
    }

    /// Short description for command line help, e.g. "Intel C++ compiler".
    pub fn short_descr(&self) -> String {
        format!("{} {} compiler", self.family, self.role.language)
    }
}

impl fmt::Display for CompilerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::role::{CXX_ROLE, UPC_ROLE};

    #[test]
    fn test_short_descr() {
        let info = CompilerInfo::new("icpc".into(), "Intel".into(), CXX_ROLE);
        assert_eq!(info.short_descr(), "Intel C++ compiler");
        assert_eq!(info.to_string(), "icpc");

        let upc = CompilerInfo::new("gupc".into(), "GNU".into(), UPC_ROLE);
        assert_eq!(upc.short_descr(), "GNU Universal Parallel C compiler");
    }
}
