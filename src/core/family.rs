//! Compiler families.
//!
//! A family groups compiler commands that accept similar arguments and
//! produce binary compatible object files, e.g. `icc`, `icpc` and `ifort`
//! in the Intel family. The family also assigns each command to a role.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::errors::KbError;
use crate::core::info::CompilerInfo;
use crate::core::role::CompilerRole;
use crate::util::InternedString;

/// Command line flag templates shared by every compiler in a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyFlags {
    /// Flags that print the compiler version.
    pub version: Vec<String>,
    /// Flags that add a directory to the include path.
    pub include_path: Vec<String>,
    /// Flags that add a directory to the library path.
    pub library_path: Vec<String>,
    /// Flags that link a library.
    pub link_library: Vec<String>,
    /// Flags that make a wrapper print the wrapped compiler's command line.
    pub show_wrapper: Vec<String>,
}

impl Default for FamilyFlags {
    fn default() -> Self {
        FamilyFlags {
            version: vec!["--version".to_string()],
            include_path: vec!["-I".to_string()],
            library_path: vec!["-L".to_string()],
            link_library: vec!["-l".to_string()],
            show_wrapper: Vec::new(),
        }
    }
}

impl FamilyFlags {
    /// Defaults for MPI wrapper families, which all understand `-show`.
    pub fn mpi() -> Self {
        FamilyFlags {
            show_wrapper: vec!["-show".to_string()],
            ..FamilyFlags::default()
        }
    }

    /// Replace the wrapper introspection flags.
    pub fn with_show_wrapper<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.show_wrapper = flags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether compilers in the family wrap another compiler.
    pub fn is_wrapper(&self) -> bool {
        !self.show_wrapper.is_empty()
    }
}

/// A vendor toolchain and the compiler commands that belong to it.
#[derive(Debug, Clone)]
pub struct CompilerFamily {
    name: InternedString,
    flags: FamilyFlags,
    /// Members in registration order.
    infos: Vec<CompilerInfo>,
    by_command: HashMap<InternedString, usize>,
    /// Filled roles in first-registration order, each with members by preference.
    by_role: Vec<(CompilerRole, Vec<usize>)>,
}

impl CompilerFamily {
    /// Create an empty family with default flags.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::with_flags(name, FamilyFlags::default())
    }

    /// Create an empty family with the given flags.
    pub fn with_flags(name: impl AsRef<str>, flags: FamilyFlags) -> Self {
        CompilerFamily {
            name: InternedString::new(name),
            flags,
            infos: Vec::new(),
            by_command: HashMap::new(),
            by_role: Vec::new(),
        }
    }

    /// Family name, e.g. "Intel".
    pub fn name(&self) -> &'static str {
        self.name.as_str()
    }

    /// Flag templates for this family.
    pub fn flags(&self) -> &FamilyFlags {
        &self.flags
    }

    /// Mutable flag templates; only reachable before the family is registered.
    pub fn flags_mut(&mut self) -> &mut FamilyFlags {
        &mut self.flags
    }

    /// Register compiler commands in the given role.
    ///
    /// Commands are listed by preference. We prefer to build C++ with `c++`
    /// rather than `CC` so that case-insensitive filesystems don't pick the
    /// C compiler, so System lists `c++` first.
    ///
    /// Nothing is registered if any command is already a member.
    pub fn add<I, S>(&mut self, role: CompilerRole, commands: I) -> Result<(), KbError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut pending: Vec<InternedString> = Vec::new();
        for command in commands {
            let command = InternedString::new(command);
            if self.by_command.contains_key(&command) || pending.contains(&command) {
                return Err(KbError::DuplicateRegistration {
                    command: command.to_string(),
                    family: self.name.to_string(),
                });
            }
            pending.push(command);
        }

        let slot = match self.by_role.iter().position(|(r, _)| *r == role) {
            Some(slot) => slot,
            None => {
                self.by_role.push((role, Vec::new()));
                self.by_role.len() - 1
            }
        };

        for command in pending {
            let idx = self.infos.len();
            self.infos.push(CompilerInfo::new(command, self.name, role));
            self.by_command.insert(command, idx);
            self.by_role[slot].1.push(idx);
        }

        Ok(())
    }

    /// Whether `command` is a member of this family.
    pub fn contains_command(&self, command: &str) -> bool {
        self.by_command.contains_key(command)
    }

    /// Whether at least one member fills `role`.
    pub fn contains_role(&self, role: &CompilerRole) -> bool {
        self.by_role.iter().any(|(r, _)| r == role)
    }

    /// The member with exactly this command.
    pub fn member_by_command(&self, command: &str) -> Result<&CompilerInfo, KbError> {
        self.by_command
            .get(command)
            .map(|&idx| &self.infos[idx])
            .ok_or_else(|| KbError::UnknownCommand {
                command: command.to_string(),
                family: self.name.to_string(),
            })
    }

    /// Members filling `role`, most preferred first.
    pub fn member_by_role(&self, role: &CompilerRole) -> Result<Vec<&CompilerInfo>, KbError> {
        self.by_role
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, members)| members.iter().map(|&idx| &self.infos[idx]).collect())
            .ok_or_else(|| KbError::UnknownRole {
                role: role.keyword.to_string(),
                family: self.name.to_string(),
            })
    }

    /// The most preferred member filling `role`, if any.
    pub fn preferred_member(&self, role: &CompilerRole) -> Option<&CompilerInfo> {
        self.by_role
            .iter()
            .find(|(r, _)| r == role)
            .and_then(|(_, members)| members.first())
            .map(|&idx| &self.infos[idx])
    }

    /// Every member, each exactly once, in registration order.
    pub fn members(&self) -> impl Iterator<Item = &CompilerInfo> + Clone + '_ {
        self.infos.iter()
    }

    /// Roles with at least one member, in the order they were first filled.
    pub fn roles(&self) -> impl Iterator<Item = &CompilerRole> + '_ {
        self.by_role.iter().map(|(role, _)| role)
    }

    /// Number of member commands.
    pub fn len(&self) -> usize {
        self.infos.len()
    }

    /// Whether no commands have been added.
    pub fn is_empty(&self) -> bool {
        self.infos.is_empty()
    }
}
