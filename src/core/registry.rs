//! Compiler registry - the reverse index from command name to family and role.
//!
//! Key principle: identifying a compiler never runs it. Compilers print
//! wildly different banners and many wrap other compilers, so `find` works
//! purely on the command string against the registered families.
//!
//! A registry is built once (see [`seed`](crate::core::seed)) and only read
//! afterwards. Families cannot be modified once registered, so the index
//! always equals the union of every family's command map.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::errors::KbError;
use crate::core::family::CompilerFamily;
use crate::core::info::CompilerInfo;
use crate::core::role::{CompilerRole, HOST_ROLES, MPI_ROLES, SHMEM_ROLES};
use crate::util::InternedString;

/// Which knowledgebase a registry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// Host compilers (CC, CXX, FC, UPC).
    Host,
    /// MPI compiler wrappers.
    Mpi,
    /// SHMEM compiler wrappers.
    Shmem,
}

impl RegistryKind {
    /// Every kind, in display order.
    pub const ALL: [RegistryKind; 3] = [RegistryKind::Host, RegistryKind::Mpi, RegistryKind::Shmem];

    /// Roles families of this kind may fill.
    pub fn roles(&self) -> &'static [CompilerRole] {
        match self {
            RegistryKind::Host => HOST_ROLES,
            RegistryKind::Mpi => MPI_ROLES,
            RegistryKind::Shmem => SHMEM_ROLES,
        }
    }

    /// Short lowercase name used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::Host => "host",
            RegistryKind::Mpi => "mpi",
            RegistryKind::Shmem => "shmem",
        }
    }
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip any directory components from a command.
pub fn command_basename(command: &str) -> &str {
    command
        .rsplit(|c: char| c == '/' || c == std::path::MAIN_SEPARATOR)
        .next()
        .unwrap_or(command)
}

/// Registry of compiler families of one kind.
#[derive(Debug, Clone)]
pub struct CompilerRegistry {
    kind: RegistryKind,
    families: Vec<CompilerFamily>,
    by_name: HashMap<InternedString, usize>,
    /// Command -> families containing it, in registration order.
    index: HashMap<InternedString, Vec<usize>>,
    preferred: Option<usize>,
}

impl CompilerRegistry {
    /// Create an empty registry.
    pub fn new(kind: RegistryKind) -> Self {
        CompilerRegistry {
            kind,
            families: Vec::new(),
            by_name: HashMap::new(),
            index: HashMap::new(),
            preferred: None,
        }
    }

    /// The kind of compilers in this registry.
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Register a family and index all of its commands.
    ///
    /// The first family registered is preferred until
    /// [`set_preferred`](Self::set_preferred) says otherwise.
    pub fn register(&mut self, family: CompilerFamily) -> Result<(), KbError> {
        let name = InternedString::new(family.name());
        if self.by_name.contains_key(&name) {
            return Err(KbError::DuplicateFamily {
                name: name.to_string(),
            });
        }

        let id = self.families.len();
        for info in family.members() {
            self.index
                .entry(InternedString::new(info.command()))
                .or_default()
                .push(id);
        }
        self.by_name.insert(name, id);
        self.families.push(family);

        if self.preferred.is_none() {
            self.preferred = Some(id);
        }
        Ok(())
    }

    /// Make the named family the host's preferred family.
    pub fn set_preferred(&mut self, name: &str) -> Result<(), KbError> {
        let id = self.family_id(name)?;
        tracing::debug!("{} compilers prefer the {} family", self.kind, name);
        self.preferred = Some(id);
        Ok(())
    }

    /// The host's preferred family.
    pub fn preferred(&self) -> Option<&CompilerFamily> {
        self.preferred.map(|id| &self.families[id])
    }

    /// Get a family by name.
    pub fn family(&self, name: &str) -> Result<&CompilerFamily, KbError> {
        self.family_id(name).map(|id| &self.families[id])
    }

    /// Check if a family with the given name is registered.
    pub fn contains_family(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn family_id(&self, name: &str) -> Result<usize, KbError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| KbError::UnknownFamily {
                name: name.to_string(),
                known: self.family_names().iter().map(|n| n.to_string()).collect(),
            })
    }

    /// All families: the preferred family first, then the rest in registration order.
    pub fn all_families(&self) -> impl Iterator<Item = &CompilerFamily> + Clone + '_ {
        let preferred = self.preferred;
        preferred
            .map(|id| &self.families[id])
            .into_iter()
            .chain(
                self.families
                    .iter()
                    .enumerate()
                    .filter(move |(id, _)| Some(*id) != preferred)
                    .map(|(_, family)| family),
            )
    }

    /// Alphabetical list of family names.
    pub fn family_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.families.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names
    }

    /// Every registered compiler, preferred family first.
    pub fn infos(&self) -> impl Iterator<Item = &CompilerInfo> + '_ {
        self.all_families().flat_map(|family| family.members())
    }

    /// Families containing exactly this command, preferred family first.
    pub fn exact_matches(&self, command: &str) -> Vec<&CompilerInfo> {
        let command = command_basename(command);
        let Some(ids) = self.index.get(command) else {
            return Vec::new();
        };
        let mut ids = ids.clone();
        if let Some(preferred) = self.preferred {
            if let Some(pos) = ids.iter().position(|&id| id == preferred) {
                let id = ids.remove(pos);
                ids.insert(0, id);
            }
        }
        ids.into_iter()
            .filter_map(|id| self.families[id].member_by_command(command).ok())
            .collect()
    }

    /// Find compiler information matching `command`.
    ///
    /// `command` may be an absolute or relative path. If no registered
    /// command equals its basename, the longest registered command contained
    /// in it wins, e.g. `gcc-4.7-x86_64` matches `gcc` rather than `cc`.
    ///
    /// Ties go to the preferred family, then to registration order.
    pub fn find(&self, command: &str) -> Result<&CompilerInfo, KbError> {
        let basename = command_basename(command);
        let not_found = || KbError::NotFound {
            command: command.to_string(),
        };
        if basename.is_empty() {
            return Err(not_found());
        }

        if let Some(info) = self.exact_matches(basename).into_iter().next() {
            return Ok(info);
        }

        tracing::debug!(
            "No compiler info exactly matches {}, trying approximate match",
            basename
        );
        let mut best: Option<&CompilerInfo> = None;
        for info in self.infos() {
            if !basename.contains(info.command()) {
                continue;
            }
            if best.map_or(true, |b| info.command().len() > b.command().len()) {
                best = Some(info);
            }
        }

        let matched = best.ok_or_else(not_found)?;
        tracing::debug!("Matched info for {} to {}", matched, basename);
        Ok(matched)
    }

    /// Number of registered families.
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}
