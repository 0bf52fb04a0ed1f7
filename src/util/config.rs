//! Configuration file support for compkb.
//!
//! Two configuration file locations are read:
//! - Global: `~/.compkb/config.toml` - User-wide defaults (`$COMPKB_HOME` moves it)
//! - Project: `.compkb/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.
//!
//! ```toml
//! [preferred]
//! host = "GNU"
//! mpi = "Intel"
//!
//! [[families]]
//! name = "LLVM"
//! cc = ["clang"]
//! cxx = ["clang++"]
//! fc = ["flang"]
//!
//! [families.flags]
//! show_wrapper = ["-###"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::family::{CompilerFamily, FamilyFlags};
use crate::core::registry::RegistryKind;
use crate::core::role::{CC_ROLE, CXX_ROLE, FC_ROLE, UPC_ROLE};

/// compkb configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred family overrides
    pub preferred: PreferredConfig,

    /// Extra host compiler families
    pub families: Vec<FamilyConfig>,
}

/// Preferred family for each knowledgebase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferredConfig {
    /// Preferred host compiler family
    pub host: Option<String>,

    /// Preferred MPI compiler family
    pub mpi: Option<String>,

    /// Preferred SHMEM compiler family
    pub shmem: Option<String>,
}

impl PreferredConfig {
    /// The configured family for `kind`, if any.
    pub fn for_kind(&self, kind: RegistryKind) -> Option<&str> {
        match kind {
            RegistryKind::Host => self.host.as_deref(),
            RegistryKind::Mpi => self.mpi.as_deref(),
            RegistryKind::Shmem => self.shmem.as_deref(),
        }
    }
}

/// A user-defined host compiler family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyConfig {
    /// Family name (must not clash with a built-in family)
    pub name: String,

    /// C compiler commands, most preferred first
    #[serde(default)]
    pub cc: Vec<String>,

    /// C++ compiler commands
    #[serde(default)]
    pub cxx: Vec<String>,

    /// Fortran compiler commands
    #[serde(default)]
    pub fc: Vec<String>,

    /// UPC compiler commands
    #[serde(default)]
    pub upc: Vec<String>,

    /// Flag templates (missing entries take the usual defaults)
    #[serde(default)]
    pub flags: FamilyFlags,
}

impl FamilyConfig {
    /// Build the family described by this entry.
    pub fn to_family(&self) -> Result<CompilerFamily> {
        let name = self.name.trim();
        if name.is_empty() {
            bail!("compiler family name must not be empty");
        }

        let mut family = CompilerFamily::with_flags(name, self.flags.clone());
        for (role, commands) in [
            (CC_ROLE, &self.cc),
            (CXX_ROLE, &self.cxx),
            (FC_ROLE, &self.fc),
            (UPC_ROLE, &self.upc),
        ] {
            if commands.is_empty() {
                continue;
            }
            family
                .add(role, commands)
                .with_context(|| format!("invalid {} commands for family `{}`", role, name))?;
        }

        if family.is_empty() {
            bail!("compiler family `{}` has no commands", name);
        }
        Ok(family)
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    ///
    /// Families are matched by name; a family in `other` replaces one of the
    /// same name.
    pub fn merge(&mut self, other: Config) {
        if other.preferred.host.is_some() {
            self.preferred.host = other.preferred.host;
        }
        if other.preferred.mpi.is_some() {
            self.preferred.mpi = other.preferred.mpi;
        }
        if other.preferred.shmem.is_some() {
            self.preferred.shmem = other.preferred.shmem;
        }

        for family in other.families {
            match self.families.iter_mut().find(|f| f.name == family.name) {
                Some(existing) => *existing = family,
                None => self.families.push(family),
            }
        }
    }
}

/// Get the global compkb config directory (`$COMPKB_HOME`, else ~/.compkb).
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os("COMPKB_HOME")
        .map(PathBuf::from)
        .or_else(|| directories::BaseDirs::new().map(|b| b.home_dir().join(".compkb")))
}

/// Get the global config path (~/.compkb/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.compkb/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".compkb").join("config.toml")
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.compkb/config.toml)
/// 2. Global config (~/.compkb/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.preferred.host.is_none());
        assert!(config.families.is_empty());
        assert_eq!(config.preferred.for_kind(RegistryKind::Mpi), None);
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[preferred]
host = "GNU"
shmem = "Cray"

[[families]]
name = "LLVM"
cc = ["clang"]
cxx = ["clang++"]

[families.flags]
show_wrapper = ["-###"]
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        assert_eq!(config.preferred.for_kind(RegistryKind::Host), Some("GNU"));
        assert_eq!(config.preferred.for_kind(RegistryKind::Shmem), Some("Cray"));
        assert_eq!(config.families.len(), 1);

        let llvm = &config.families[0];
        assert_eq!(llvm.cxx, vec!["clang++"]);
        assert_eq!(llvm.flags.show_wrapper, vec!["-###"]);
        // Unlisted flags keep their defaults.
        assert_eq!(llvm.flags.include_path, vec!["-I"]);
    }

    #[test]
    fn test_config_load_invalid() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[[families]]\ncc = [\"clang\"]\n").unwrap();

        // Missing family name.
        assert!(Config::load(&config_path).is_err());
        let config = Config::load_or_default(&config_path);
        assert!(config.families.is_empty());
    }

    #[test]
    fn test_family_config_to_family() {
        let entry = FamilyConfig {
            name: "LLVM".to_string(),
            cc: vec!["clang".to_string()],
            cxx: vec!["clang++".to_string(), "clang-cl".to_string()],
            fc: vec![],
            upc: vec![],
            flags: FamilyFlags::default(),
        };

        let family = entry.to_family().unwrap();
        assert_eq!(family.name(), "LLVM");
        assert_eq!(family.len(), 3);
        assert_eq!(family.preferred_member(&CXX_ROLE).unwrap().command(), "clang++");
        assert!(!family.contains_role(&FC_ROLE));
    }

    #[test]
    fn test_family_config_rejects_duplicates() {
        let entry = FamilyConfig {
            name: "LLVM".to_string(),
            cc: vec!["clang".to_string()],
            cxx: vec!["clang".to_string()],
            fc: vec![],
            upc: vec![],
            flags: FamilyFlags::default(),
        };

        let err = entry.to_family().unwrap_err();
        assert!(format!("{:#}", err).contains("already a member"));
    }

    #[test]
    fn test_family_config_rejects_empty() {
        let entry = FamilyConfig {
            name: "  ".to_string(),
            cc: vec!["clang".to_string()],
            cxx: vec![],
            fc: vec![],
            upc: vec![],
            flags: FamilyFlags::default(),
        };
        assert!(entry.to_family().is_err());

        let entry = FamilyConfig {
            name: "Nothing".to_string(),
            cc: vec![],
            cxx: vec![],
            fc: vec![],
            upc: vec![],
            flags: FamilyFlags::default(),
        };
        assert!(entry.to_family().is_err());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[preferred]
host = "Intel"
mpi = "Intel"

[[families]]
name = "LLVM"
cc = ["clang"]

[[families]]
name = "AOCC"
cc = ["amdclang"]
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[preferred]
host = "GNU"

[[families]]
name = "LLVM"
cc = ["clang-17"]
"#,
        )
        .unwrap();

        let config = load_config(Some(&global_path), &project_path);

        assert_eq!(config.preferred.host.as_deref(), Some("GNU"));
        assert_eq!(config.preferred.mpi.as_deref(), Some("Intel"));
        assert_eq!(config.families.len(), 2);
        assert_eq!(config.families[0].name, "LLVM");
        assert_eq!(config.families[0].cc, vec!["clang-17"]);
        assert_eq!(config.families[1].name, "AOCC");
    }

    #[test]
    fn test_load_config_missing_files() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, &project_config_path(tmp.path()));
        assert!(config.families.is_empty());
        assert!(config.preferred.host.is_none());
    }
}
