//! Compiler roles.
//!
//! A role identifies how a compiler is used in the build process. Every
//! compiler fills at least one role within its family: `icpc` is the Intel
//! compiler in the CXX role, `gfortran` the GNU compiler in the FC role.
//! The set of roles is closed and defined here as constants.

use std::fmt;

use serde::Serialize;

/// A language purpose a compiler can serve.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CompilerRole {
    /// Unique short code, e.g. `CXX`.
    pub keyword: &'static str,
    /// Display name of the language, e.g. `C++`.
    pub language: &'static str,
    /// Whether the toolchain needs a compiler in this role.
    pub required: bool,
    /// Environment variables that conventionally name a compiler for this role.
    pub env_vars: &'static [&'static str],
}

pub const CC_ROLE: CompilerRole = CompilerRole {
    keyword: "CC",
    language: "C",
    required: true,
    env_vars: &["CC"],
};

pub const CXX_ROLE: CompilerRole = CompilerRole {
    keyword: "CXX",
    language: "C++",
    required: true,
    env_vars: &["CXX"],
};

pub const FC_ROLE: CompilerRole = CompilerRole {
    keyword: "FC",
    language: "Fortran",
    required: true,
    env_vars: &["FC", "F77", "F90"],
};

pub const UPC_ROLE: CompilerRole = CompilerRole {
    keyword: "UPC",
    language: "Universal Parallel C",
    required: false,
    env_vars: &["UPC"],
};

pub const MPI_CC_ROLE: CompilerRole = CompilerRole {
    keyword: "MPI_CC",
    language: "MPI C",
    required: false,
    env_vars: &["MPI_CC"],
};

pub const MPI_CXX_ROLE: CompilerRole = CompilerRole {
    keyword: "MPI_CXX",
    language: "MPI C++",
    required: false,
    env_vars: &["MPI_CXX"],
};

pub const MPI_FC_ROLE: CompilerRole = CompilerRole {
    keyword: "MPI_FC",
    language: "MPI Fortran",
    required: false,
    env_vars: &["MPI_FC", "MPI_F77", "MPI_F90"],
};

pub const SHMEM_CC_ROLE: CompilerRole = CompilerRole {
    keyword: "SHMEM_CC",
    language: "SHMEM C",
    required: false,
    env_vars: &["SHMEM_CC"],
};

pub const SHMEM_CXX_ROLE: CompilerRole = CompilerRole {
    keyword: "SHMEM_CXX",
    language: "SHMEM C++",
    required: false,
    env_vars: &["SHMEM_CXX"],
};

pub const SHMEM_FC_ROLE: CompilerRole = CompilerRole {
    keyword: "SHMEM_FC",
    language: "SHMEM Fortran",
    required: false,
    env_vars: &["SHMEM_FC", "SHMEM_F77", "SHMEM_F90"],
};

/// Roles served by host compilers.
pub const HOST_ROLES: &[CompilerRole] = &[CC_ROLE, CXX_ROLE, FC_ROLE, UPC_ROLE];

/// Roles served by MPI compiler wrappers.
pub const MPI_ROLES: &[CompilerRole] = &[MPI_CC_ROLE, MPI_CXX_ROLE, MPI_FC_ROLE];

/// Roles served by SHMEM compiler wrappers.
pub const SHMEM_ROLES: &[CompilerRole] = &[SHMEM_CC_ROLE, SHMEM_CXX_ROLE, SHMEM_FC_ROLE];

/// Every known role, keyed by `keyword`.
const ALL_ROLES: &[CompilerRole] = &[
    CC_ROLE,
    CXX_ROLE,
    FC_ROLE,
    UPC_ROLE,
    MPI_CC_ROLE,
    MPI_CXX_ROLE,
    MPI_FC_ROLE,
    SHMEM_CC_ROLE,
    SHMEM_CXX_ROLE,
    SHMEM_FC_ROLE,
];

impl CompilerRole {
    /// All known roles.
    pub fn all() -> &'static [CompilerRole] {
        ALL_ROLES
    }

    /// Look up a role by keyword.
    pub fn find(keyword: &str) -> Option<&'static CompilerRole> {
        ALL_ROLES.iter().find(|role| role.keyword == keyword)
    }

    /// Roles that must be filled before anything can be built.
    ///
    /// The iterator is `Clone`, so callers can walk it more than once.
    pub fn required_roles() -> impl Iterator<Item = &'static CompilerRole> + Clone {
        ALL_ROLES.iter().filter(|role| role.required)
    }
}

impl PartialEq for CompilerRole {
    fn eq(&self, other: &Self) -> bool {
        self.keyword == other.keyword
    }
}

impl Eq for CompilerRole {}

impl std::hash::Hash for CompilerRole {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.keyword.hash(state)
    }
}

impl fmt::Display for CompilerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_required_roles() {
        let required: Vec<&str> = CompilerRole::required_roles().map(|r| r.keyword).collect();
        assert_eq!(required, vec!["CC", "CXX", "FC"]);
    }

    #[test]
    fn test_required_roles_restartable() {
        let roles = CompilerRole::required_roles();
        let first: Vec<_> = roles.clone().collect();
        let second: Vec<_> = roles.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_keywords_unique() {
        let keywords: HashSet<&str> = CompilerRole::all().iter().map(|r| r.keyword).collect();
        assert_eq!(keywords.len(), CompilerRole::all().len());
    }

    #[test]
    fn test_find_by_keyword() {
        let upc = CompilerRole::find("UPC").unwrap();
        assert_eq!(upc.language, "Universal Parallel C");
        assert!(!upc.required);

        assert!(CompilerRole::find("cc").is_none());
        assert!(CompilerRole::find("F77").is_none());
    }

    #[test]
    fn test_fortran_env_vars() {
        assert_eq!(FC_ROLE.env_vars, &["FC", "F77", "F90"]);
    }
}
