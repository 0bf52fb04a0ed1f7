//! The complete compiler knowledgebase.
//!
//! Bundles the host, MPI and SHMEM registries together with the host they
//! were tuned for. Built once at startup and passed by reference to whatever
//! needs to identify compilers.

use anyhow::{Context, Result};

use crate::core::errors::KbError;
use crate::core::host::{self, HostProfile};
use crate::core::info::CompilerInfo;
use crate::core::registry::{command_basename, CompilerRegistry, RegistryKind};
use crate::core::seed;
use crate::util::config::Config;

/// Host, MPI and SHMEM compiler registries.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    host: CompilerRegistry,
    mpi: CompilerRegistry,
    shmem: CompilerRegistry,
    profile: HostProfile,
}

impl KnowledgeBase {
    /// The built-in tables with no preference policy applied.
    pub fn builtin(profile: HostProfile) -> Result<Self, KbError> {
        Ok(KnowledgeBase {
            host: seed::host_registry()?,
            mpi: seed::mpi_registry()?,
            shmem: seed::shmem_registry()?,
            profile,
        })
    }

    /// Build the knowledgebase for `profile`.
    ///
    /// Families from `config` join the host registry before the preferred
    /// family of each registry is chosen, so a configured family can be
    /// preferred too.
    pub fn load<F>(config: &Config, profile: HostProfile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut kb = Self::builtin(profile)?;

        for entry in &config.families {
            let family = entry
                .to_family()
                .with_context(|| format!("invalid compiler family `{}` in config", entry.name))?;
            kb.host
                .register(family)
                .with_context(|| format!("cannot add compiler family `{}`", entry.name))?;
            tracing::debug!("Added host compiler family {} from config", entry.name);
        }

        for kind in RegistryKind::ALL {
            let configured = config.preferred.for_kind(kind);
            let profile = kb.profile.clone();
            host::apply_preference(kb.registry_mut(kind), &profile, configured, &env)
                .with_context(|| format!("invalid preferred {} compiler family", kind))?;
        }

        Ok(kb)
    }

    /// The host these registries were tuned for.
    pub fn profile(&self) -> &HostProfile {
        &self.profile
    }

    /// The registry of one kind.
    pub fn registry(&self, kind: RegistryKind) -> &CompilerRegistry {
        match kind {
            RegistryKind::Host => &self.host,
            RegistryKind::Mpi => &self.mpi,
            RegistryKind::Shmem => &self.shmem,
        }
    }

    fn registry_mut(&mut self, kind: RegistryKind) -> &mut CompilerRegistry {
        match kind {
            RegistryKind::Host => &mut self.host,
            RegistryKind::Mpi => &mut self.mpi,
            RegistryKind::Shmem => &mut self.shmem,
        }
    }

    /// Every registry, host first.
    pub fn registries(&self) -> impl Iterator<Item = &CompilerRegistry> + '_ {
        RegistryKind::ALL.into_iter().map(|kind| self.registry(kind))
    }

    /// Identify `command` in one registry.
    pub fn find(&self, kind: RegistryKind, command: &str) -> Result<&CompilerInfo, KbError> {
        self.registry(kind).find(command)
    }

    /// Identify `command` in whichever registry knows it best.
    ///
    /// An exact match in any registry beats an approximate one. Among exact
    /// matches the host registry wins, then MPI, then SHMEM; among
    /// approximate matches the longest command wins with the same order
    /// breaking ties.
    pub fn find_any(&self, command: &str) -> Result<(RegistryKind, &CompilerInfo), KbError> {
        let basename = command_basename(command);
        for kind in RegistryKind::ALL {
            if let Some(info) = self.registry(kind).exact_matches(basename).into_iter().next() {
                return Ok((kind, info));
            }
        }

        let mut best: Option<(RegistryKind, &CompilerInfo)> = None;
        for kind in RegistryKind::ALL {
            let Ok(info) = self.registry(kind).find(command) else {
                continue;
            };
            if best.map_or(true, |(_, b)| info.command().len() > b.command().len()) {
                best = Some((kind, info));
            }
        }
        best.ok_or_else(|| KbError::NotFound {
            command: command.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::{CRAY, GNU, INTEL, OPENSHMEM, SYSTEM};
    use crate::util::config::{FamilyConfig, PreferredConfig};

    fn linux() -> HostProfile {
        HostProfile::new("x86_64", "linux")
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn llvm() -> FamilyConfig {
        FamilyConfig {
            name: "LLVM".to_string(),
            cc: vec!["clang".to_string()],
            cxx: vec!["clang++".to_string()],
            fc: vec!["flang".to_string()],
            upc: vec![],
            flags: Default::default(),
        }
    }

    #[test]
    fn test_load_defaults() {
        let kb = KnowledgeBase::load(&Config::default(), linux(), no_env).unwrap();
        assert_eq!(kb.registry(RegistryKind::Host).preferred().unwrap().name(), SYSTEM);
        assert_eq!(kb.registry(RegistryKind::Mpi).preferred().unwrap().name(), SYSTEM);
        assert_eq!(
            kb.registry(RegistryKind::Shmem).preferred().unwrap().name(),
            OPENSHMEM
        );
        assert_eq!(kb.registries().count(), 3);
    }

    #[test]
    fn test_load_cray_host() {
        let cray = linux().with_cray(true);
        let kb = KnowledgeBase::load(&Config::default(), cray, no_env).unwrap();
        for kind in RegistryKind::ALL {
            assert_eq!(kb.registry(kind).preferred().unwrap().name(), CRAY);
        }
        assert_eq!(kb.find(RegistryKind::Host, "cc").unwrap().family(), CRAY);
    }

    #[test]
    fn test_load_config_family() {
        let config = Config {
            preferred: PreferredConfig {
                host: Some("LLVM".to_string()),
                ..Default::default()
            },
            families: vec![llvm()],
        };
        let kb = KnowledgeBase::load(&config, linux(), no_env).unwrap();

        let info = kb.find(RegistryKind::Host, "/usr/bin/clang++").unwrap();
        assert_eq!(info.family(), "LLVM");
        assert_eq!(info.role().keyword, "CXX");
        assert_eq!(kb.registry(RegistryKind::Host).preferred().unwrap().name(), "LLVM");
    }

    #[test]
    fn test_load_config_family_clash() {
        let mut gnu = llvm();
        gnu.name = GNU.to_string();
        let config = Config {
            families: vec![gnu],
            ..Default::default()
        };
        let err = KnowledgeBase::load(&config, linux(), no_env).unwrap_err();
        assert!(format!("{:#}", err).contains("already registered"));
    }

    #[test]
    fn test_load_unknown_preferred() {
        let config = Config {
            preferred: PreferredConfig {
                mpi: Some("OpenMPI".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = KnowledgeBase::load(&config, linux(), no_env).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid preferred mpi compiler family"));
    }

    #[test]
    fn test_load_env_preference() {
        let env = |key: &str| (key == "MPI_CC").then(|| "mpiicc".to_string());
        let kb = KnowledgeBase::load(&Config::default(), linux(), env).unwrap();
        assert_eq!(kb.registry(RegistryKind::Mpi).preferred().unwrap().name(), INTEL);
        assert_eq!(kb.registry(RegistryKind::Host).preferred().unwrap().name(), SYSTEM);
    }

    #[test]
    fn test_find_any_exact() {
        let kb = KnowledgeBase::load(&Config::default(), linux(), no_env).unwrap();

        let (kind, info) = kb.find_any("mpif90").unwrap();
        assert_eq!(kind, RegistryKind::Mpi);
        assert_eq!(info.role().keyword, "MPI_FC");

        let (kind, info) = kb.find_any("/opt/bin/oshcc").unwrap();
        assert_eq!(kind, RegistryKind::Shmem);
        assert_eq!(info.family(), OPENSHMEM);

        // `cc` is known everywhere; host wins.
        let (kind, info) = kb.find_any("cc").unwrap();
        assert_eq!(kind, RegistryKind::Host);
        assert_eq!(info.family(), SYSTEM);
    }

    #[test]
    fn test_find_any_exact_beats_approximate() {
        let kb = KnowledgeBase::load(&Config::default(), linux(), no_env).unwrap();

        // `mpicc` contains the host command `cc` but matches MPI exactly.
        let (kind, info) = kb.find_any("mpicc").unwrap();
        assert_eq!(kind, RegistryKind::Mpi);
        assert_eq!(info.command(), "mpicc");
    }

    #[test]
    fn test_find_any_approximate() {
        let kb = KnowledgeBase::load(&Config::default(), linux(), no_env).unwrap();

        let (kind, info) = kb.find_any("mpiicc-2021").unwrap();
        assert_eq!(kind, RegistryKind::Mpi);
        assert_eq!(info.command(), "mpiicc");

        let (kind, info) = kb.find_any("gcc-13").unwrap();
        assert_eq!(kind, RegistryKind::Host);
        assert_eq!(info.command(), "gcc");

        assert!(matches!(
            kb.find_any("rustc"),
            Err(KbError::NotFound { .. })
        ));
        assert!(kb.find_any("").is_err());
    }
}
