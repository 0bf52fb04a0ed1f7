//! Host detection and the preferred compiler family policy.
//!
//! Each registry has one preferred family that is yielded first by
//! [`CompilerRegistry::all_families`] and wins ties in
//! [`CompilerRegistry::find`]. The preference comes from, in order:
//!
//! 1. The `[preferred]` table in the config file
//! 2. A role environment variable (e.g. `CC`) naming a known compiler
//! 3. The host platform (Cray and POWER systems have vendor defaults)

use crate::core::errors::KbError;
use crate::core::registry::{CompilerRegistry, RegistryKind};
use crate::core::seed::{CRAY, IBM, OPENSHMEM, SYSTEM};

/// Environment variables set by the Cray programming environment.
const CRAY_ENV_VARS: &[&str] = &["CRAYOS_VERSION", "PE_ENV"];

/// The machine compilers are being identified on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostProfile {
    /// CPU architecture (x86_64, powerpc64, aarch64, etc.)
    pub arch: String,
    /// Operating system (linux, macos, etc.)
    pub os: String,
    /// Whether the Cray programming environment is loaded
    pub cray: bool,
}

impl HostProfile {
    /// Create a profile for an explicit architecture and OS.
    pub fn new(arch: impl Into<String>, os: impl Into<String>) -> Self {
        HostProfile {
            arch: arch.into(),
            os: os.into(),
            cray: false,
        }
    }

    /// Mark the host as a Cray system.
    pub fn with_cray(mut self, cray: bool) -> Self {
        self.cray = cray;
        self
    }

    /// Detect the running host.
    pub fn detect() -> Self {
        let cray = CRAY_ENV_VARS
            .iter()
            .any(|var| std::env::var_os(var).is_some());
        let host = HostProfile::new(std::env::consts::ARCH, std::env::consts::OS).with_cray(cray);
        tracing::debug!("Detected host: {}", host);
        host
    }

    /// The family this host prefers for `kind` when nothing else says otherwise.
    pub fn default_family(&self, kind: RegistryKind) -> &'static str {
        match kind {
            _ if self.cray => CRAY,
            RegistryKind::Shmem => OPENSHMEM,
            RegistryKind::Host | RegistryKind::Mpi if self.arch == "powerpc64" => IBM,
            RegistryKind::Host | RegistryKind::Mpi => SYSTEM,
        }
    }
}

impl std::fmt::Display for HostProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.arch, self.os)?;
        if self.cray {
            write!(f, " (Cray)")?;
        }
        Ok(())
    }
}

/// Find a family named by a role environment variable such as `CC=icc`.
pub fn family_from_env<F>(registry: &CompilerRegistry, env: F) -> Option<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    for role in registry.kind().roles() {
        for var in role.env_vars {
            let Some(command) = env(var) else {
                continue;
            };
            match registry.find(&command) {
                Ok(info) => {
                    tracing::debug!(
                        "Preferring {} {} compilers by {}={}",
                        info.family(),
                        registry.kind(),
                        var,
                        command
                    );
                    return Some(info.family());
                }
                Err(err) => tracing::debug!("Ignoring {}={}: {}", var, command, err),
            }
        }
    }
    None
}

/// Decide which family `registry` should prefer.
///
/// A configured family that is not registered is an error, not a fallback.
pub fn preferred_family<F>(
    registry: &CompilerRegistry,
    host: &HostProfile,
    configured: Option<&str>,
    env: F,
) -> Result<&'static str, KbError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(name) = configured {
        return registry.family(name).map(|family| family.name());
    }
    if let Some(name) = family_from_env(registry, env) {
        return Ok(name);
    }
    let name = host.default_family(registry.kind());
    tracing::debug!("{} prefers {} {} compilers by default", host, name, registry.kind());
    Ok(name)
}

/// Apply the preference policy to `registry`.
pub fn apply_preference<F>(
    registry: &mut CompilerRegistry,
    host: &HostProfile,
    configured: Option<&str>,
    env: F,
) -> Result<(), KbError>
where
    F: Fn(&str) -> Option<String>,
{
    let name = preferred_family(registry, host, configured, env)?;
    if registry.contains_family(name) {
        registry.set_preferred(name)?;
    }
    Ok(())
}
