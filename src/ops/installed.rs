//! Installed compiler detection.
//!
//! The knowledgebase lists every compiler compkb knows about, but only some
//! of them are installed on any given system. This module finds installed
//! compilers on `PATH` and, for wrapper families such as MPI, asks the
//! wrapper which compiler and flags it really uses.
//!
//! Probing a wrapper means running it, which can be slow, so a
//! [`CompilerProbe`] remembers every compiler it has seen by absolute path.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::core::errors::KbError;
use crate::core::family::{CompilerFamily, FamilyFlags};
use crate::core::info::CompilerInfo;
use crate::core::knowledgebase::KnowledgeBase;
use crate::core::registry::{command_basename, RegistryKind};
use crate::core::role::CompilerRole;
use crate::util::hash::sha256_file;
use crate::util::process::ProcessBuilder;

/// Arguments a wrapper passes to the compiler it wraps, sorted by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WrapperArgs {
    /// Directories added to the include path
    pub include_path: Vec<String>,
    /// Directories added to the library path
    pub library_path: Vec<String>,
    /// Libraries linked
    pub libraries: Vec<String>,
    /// Everything else
    pub compiler_flags: Vec<String>,
}

impl WrapperArgs {
    /// Sort `args` using the wrapper family's flag templates.
    ///
    /// An argument equal to a flag takes the next argument as its value
    /// (`-I /usr/include`); one starting with a flag carries it inline
    /// (`-I/usr/include`). Include flags are tried first, then library
    /// path flags, then link flags.
    pub fn parse<S: AsRef<str>>(args: &[S], flags: &FamilyFlags) -> Result<Self> {
        let mut parsed = WrapperArgs::default();
        let mut idx = 0;

        while idx < args.len() {
            let arg = args[idx].as_ref();
            let mut consumed = 0;

            for (templates, acc) in [
                (&flags.include_path, &mut parsed.include_path),
                (&flags.library_path, &mut parsed.library_path),
                (&flags.link_library, &mut parsed.libraries),
            ] {
                for flag in templates {
                    if arg == flag.as_str() {
                        let Some(value) = args.get(idx + 1) else {
                            bail!("`{}` is missing its value", flag);
                        };
                        acc.push(value.as_ref().to_string());
                        consumed = 2;
                    } else if let Some(value) = arg.strip_prefix(flag.as_str()) {
                        acc.push(value.to_string());
                        consumed = 1;
                    }
                    if consumed > 0 {
                        break;
                    }
                }
                if consumed > 0 {
                    break;
                }
            }

            if consumed == 0 {
                parsed.compiler_flags.push(arg.to_string());
                consumed = 1;
            }
            idx += consumed;
        }

        tracing::debug!("Wrapped compiler flags: {:?}", parsed.compiler_flags);
        tracing::debug!("Wrapped include path: {:?}", parsed.include_path);
        tracing::debug!("Wrapped library path: {:?}", parsed.library_path);
        tracing::debug!("Wrapped libraries: {:?}", parsed.libraries);
        Ok(parsed)
    }
}

/// The compiler a wrapper invokes.
#[derive(Debug, Clone, Serialize)]
pub struct WrappedCompiler {
    /// First word of the wrapper's command line
    pub command: String,
    /// Where `command` resolves to, if it can be found
    pub absolute_path: Option<PathBuf>,
    /// What the host knowledgebase knows about `command`
    pub info: Option<CompilerInfo>,
    /// Arguments the wrapper adds
    pub args: WrapperArgs,
}

impl WrappedCompiler {
    /// Parse the command line a wrapper prints when asked to show it.
    pub fn parse(output: &str, flags: &FamilyFlags, kb: &KnowledgeBase) -> Result<Self> {
        let words: Vec<&str> = output.split_whitespace().collect();
        let Some((command, rest)) = words.split_first() else {
            bail!("wrapper printed no command line");
        };

        let info = match kb.find(RegistryKind::Host, command) {
            Ok(info) => Some(*info),
            Err(err) => {
                tracing::debug!("Wrapped compiler {} is not in the knowledgebase: {}", command, err);
                None
            }
        };

        Ok(WrappedCompiler {
            command: command.to_string(),
            absolute_path: which::which(command).ok(),
            info,
            args: WrapperArgs::parse(rest, flags)?,
        })
    }
}

/// An installed compiler command linked to its knowledgebase entry.
///
/// There are few well known compilers but endless commands that invoke
/// them (`icc`, `gcc-4.2`, `/opt/cray/bin/cc`).
#[derive(Debug, Serialize)]
pub struct InstalledCompiler {
    absolute_path: PathBuf,
    kind: RegistryKind,
    info: CompilerInfo,
    wrapped: Option<WrappedCompiler>,
    #[serde(skip)]
    checksum: OnceLock<String>,
}

impl InstalledCompiler {
    /// Probe the compiler at `absolute_path`, known to be `info`.
    ///
    /// Wrapper families are run with their show-wrapper flags followed by
    /// `arch_args`; nothing else is ever executed.
    fn new(
        kb: &KnowledgeBase,
        kind: RegistryKind,
        absolute_path: PathBuf,
        info: CompilerInfo,
        arch_args: &[String],
    ) -> Result<Self> {
        let flags = kb.registry(kind).family(info.family())?.flags();

        let wrapped = if flags.is_wrapper() {
            tracing::debug!(
                "Probing wrapper compiler {} to discover wrapped compiler",
                absolute_path.display()
            );
            let cmd = ProcessBuilder::new(&absolute_path)
                .args(&flags.show_wrapper)
                .args(arch_args);
            let output = cmd.exec_combined()?;
            tracing::debug!("{} returned 0:\n{}", cmd.display_command(), output);

            let wrapped = WrappedCompiler::parse(&output, flags, kb).with_context(|| {
                format!(
                    "unexpected output from `{}`:\n{}",
                    cmd.display_command(),
                    output
                )
            })?;
            Some(wrapped)
        } else {
            None
        };

        Ok(InstalledCompiler {
            absolute_path,
            kind,
            info,
            wrapped,
            checksum: OnceLock::new(),
        })
    }

    /// Absolute path to the compiler command.
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Directory containing the compiler command.
    pub fn path(&self) -> &Path {
        self.absolute_path.parent().unwrap_or(Path::new(""))
    }

    /// The command without its directory.
    pub fn command(&self) -> &str {
        self.absolute_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Knowledgebase the compiler was identified in.
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// What the knowledgebase knows about this compiler.
    pub fn info(&self) -> &CompilerInfo {
        &self.info
    }

    /// The compiler this one wraps, for wrapper families.
    pub fn wrapped(&self) -> Option<&WrappedCompiler> {
        self.wrapped.as_ref()
    }

    /// SHA-256 of the compiler executable in hex.
    ///
    /// Renaming a compiler or swapping the installation changes the
    /// checksum even when the command stays the same.
    pub fn checksum(&self) -> Result<&str> {
        if let Some(sum) = self.checksum.get() {
            return Ok(sum);
        }
        tracing::debug!("Calculating checksum of {}", self.absolute_path.display());
        let sum = sha256_file(&self.absolute_path)?;
        Ok(self.checksum.get_or_init(|| sum))
    }
}

/// Finds and probes installed compilers, each at most once.
#[derive(Debug)]
pub struct CompilerProbe<'kb> {
    kb: &'kb KnowledgeBase,
    /// Search path; `None` means the `PATH` environment variable.
    search_path: Option<OsString>,
    arch_args: Vec<String>,
    cache: HashMap<(RegistryKind, &'static str, PathBuf), Arc<InstalledCompiler>>,
}

impl<'kb> CompilerProbe<'kb> {
    /// Create a probe searching `PATH`.
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        CompilerProbe {
            kb,
            search_path: None,
            arch_args: Vec::new(),
            cache: HashMap::new(),
        }
    }

    /// Search these directories instead of `PATH`.
    pub fn with_search_path(mut self, path: impl Into<OsString>) -> Self {
        self.search_path = Some(path.into());
        self
    }

    /// Extra arguments passed to wrappers when probing, e.g. `-m64`.
    pub fn with_arch_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arch_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// The knowledgebase used to identify compilers.
    pub fn knowledgebase(&self) -> &'kb KnowledgeBase {
        self.kb
    }

    /// Resolve `command` to an executable, if it is installed.
    pub fn resolve(&self, command: &str) -> Option<PathBuf> {
        let resolved = match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_default();
                which::which_in(command, Some(paths), cwd)
            }
            None => which::which(command),
        };
        resolved.ok()
    }

    /// Find and identify an installed compiler command.
    pub fn probe(&mut self, kind: RegistryKind, command: &str) -> Result<Arc<InstalledCompiler>> {
        let absolute_path = self.require(command)?;
        let info = *self
            .kb
            .find(kind, command_basename(&absolute_path.to_string_lossy()))
            .with_context(|| format!("unknown compiler command `{}`", absolute_path.display()))?;
        self.probe_as(kind, absolute_path, info)
    }

    /// Probe an installed member of a known family.
    pub fn probe_member(
        &mut self,
        kind: RegistryKind,
        info: &CompilerInfo,
    ) -> Result<Arc<InstalledCompiler>> {
        let absolute_path = self.require(info.command())?;
        self.probe_as(kind, absolute_path, *info)
    }

    /// Number of distinct compilers probed so far.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing has been probed yet.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    fn require(&self, command: &str) -> Result<PathBuf> {
        match self.resolve(command) {
            Some(path) => Ok(path),
            None => bail!(
                "`{}` missing or not executable\n\
                 Check spelling, loaded modules, PATH environment variable, and file permissions",
                command
            ),
        }
    }

    fn probe_as(
        &mut self,
        kind: RegistryKind,
        absolute_path: PathBuf,
        info: CompilerInfo,
    ) -> Result<Arc<InstalledCompiler>> {
        let key = (kind, info.family(), absolute_path);
        if let Some(found) = self.cache.get(&key) {
            return Ok(Arc::clone(found));
        }

        let compiler = Arc::new(InstalledCompiler::new(
            self.kb,
            kind,
            key.2.clone(),
            info,
            &self.arch_args,
        )?);
        self.cache.insert(key, Arc::clone(&compiler));
        Ok(compiler)
    }
}

/// The installed members of one compiler family.
///
/// Families are usually installed at a common prefix, but nothing promises
/// every member is present: C and C++ without Fortran is common.
#[derive(Debug)]
pub struct InstalledFamily<'kb> {
    family: &'kb CompilerFamily,
    kind: RegistryKind,
    commands: HashMap<&'static str, Arc<InstalledCompiler>>,
}

impl<'kb> InstalledFamily<'kb> {
    /// Detect which members of `family` are installed.
    pub fn detect(
        probe: &mut CompilerProbe<'kb>,
        kind: RegistryKind,
        family: &'kb CompilerFamily,
    ) -> Result<Self> {
        tracing::debug!("Detecting {} compiler installation", family.name());
        let mut commands = HashMap::new();

        for info in family.members() {
            if probe.resolve(info.command()).is_none() {
                tracing::debug!("{} is not installed", info.command());
                continue;
            }
            let compiler = probe.probe_member(kind, info)?;
            tracing::debug!(
                "{} {} compiler is {}",
                family.name(),
                info.role().language,
                compiler.absolute_path().display()
            );
            commands.insert(info.command(), compiler);
        }

        Ok(InstalledFamily {
            family,
            kind,
            commands,
        })
    }

    /// The family that was detected.
    pub fn family(&self) -> &'kb CompilerFamily {
        self.family
    }

    /// Knowledgebase the family belongs to.
    pub fn kind(&self) -> RegistryKind {
        self.kind
    }

    /// Whether no member is installed.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The preferred installed compiler for `role`.
    ///
    /// A family can list several commands for one role; the first one
    /// installed wins.
    pub fn preferred(&self, role: &CompilerRole) -> Result<&Arc<InstalledCompiler>, KbError> {
        let unfilled = || KbError::UnknownRole {
            role: role.keyword.to_string(),
            family: self.family.name().to_string(),
        };
        self.family
            .member_by_role(role)?
            .into_iter()
            .find_map(|info| self.commands.get(info.command()))
            .ok_or_else(unfilled)
    }

    /// One preferred installed compiler per role any member fills.
    pub fn iter(&self) -> impl Iterator<Item = (&'static CompilerRole, &Arc<InstalledCompiler>)> + '_ {
        CompilerRole::all()
            .iter()
            .filter_map(move |role| self.preferred(role).ok().map(|c| (role, c)))
    }
}

/// One installed compiler per role, ready to build with.
#[derive(Debug, Clone)]
pub struct InstalledCompilerSet {
    uid: String,
    members: Vec<(&'static CompilerRole, Arc<InstalledCompiler>)>,
}

impl InstalledCompilerSet {
    /// Build a set from `(role keyword, compiler)` pairs.
    ///
    /// Every required role must be filled and no role twice.
    pub fn new<I, S>(uid: impl Into<String>, members: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Arc<InstalledCompiler>)>,
        S: AsRef<str>,
    {
        let uid = uid.into();
        let mut set: Vec<(&'static CompilerRole, Arc<InstalledCompiler>)> = Vec::new();

        for (keyword, compiler) in members {
            let keyword = keyword.as_ref();
            let Some(role) = CompilerRole::find(keyword) else {
                bail!("invalid compiler role `{}`", keyword);
            };
            if set.iter().any(|(r, _)| *r == role) {
                bail!("compiler role {} is filled twice in set `{}`", role, uid);
            }
            set.push((role, compiler));
        }

        let missing: Vec<&str> = CompilerRole::required_roles()
            .filter(|role| !set.iter().any(|(r, _)| r == role))
            .map(|role| role.keyword)
            .collect();
        if !missing.is_empty() {
            bail!(
                "compiler set `{}` has no compiler for required role(s): {}",
                uid,
                missing.join(", ")
            );
        }

        let position = |role: &CompilerRole| {
            CompilerRole::all()
                .iter()
                .position(|r| r == role)
                .unwrap_or(usize::MAX)
        };
        set.sort_by_key(|(role, _)| position(*role));

        Ok(InstalledCompilerSet { uid, members: set })
    }

    /// Collect the preferred compiler of every role `family` fills.
    pub fn from_family(family: &InstalledFamily<'_>) -> Result<Self> {
        Self::new(
            family.family().name(),
            family
                .iter()
                .map(|(role, compiler)| (role.keyword, Arc::clone(compiler))),
        )
    }

    /// Identifier of this combination of compilers.
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// The compiler filling `role`.
    pub fn get(&self, role: &CompilerRole) -> Option<&Arc<InstalledCompiler>> {
        self.members
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, compiler)| compiler)
    }

    /// Members in role order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static CompilerRole, &Arc<InstalledCompiler>)> + '_ {
        self.members.iter().map(|(role, compiler)| (*role, compiler))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::HostProfile;
    use crate::core::role::{CC_ROLE, CXX_ROLE, FC_ROLE, MPI_CC_ROLE};
    use crate::util::config::Config;
    use tempfile::TempDir;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::load(&Config::default(), HostProfile::new("x86_64", "linux"), |_| None)
            .unwrap()
    }

    #[cfg(unix)]
    fn install(dir: &Path, name: &str, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[test]
    fn test_wrapper_args_inline_and_separate() {
        let flags = FamilyFlags::mpi();
        let args = [
            "-I/opt/mpi/include",
            "-I",
            "/opt/extra",
            "-L/opt/mpi/lib",
            "-lmpi",
            "-l",
            "pthread",
            "-O2",
            "-Wl,-rpath,/opt/mpi/lib",
        ];
        let parsed = WrapperArgs::parse(&args, &flags).unwrap();
        assert_eq!(parsed.include_path, vec!["/opt/mpi/include", "/opt/extra"]);
        assert_eq!(parsed.library_path, vec!["/opt/mpi/lib"]);
        assert_eq!(parsed.libraries, vec!["mpi", "pthread"]);
        assert_eq!(parsed.compiler_flags, vec!["-O2", "-Wl,-rpath,/opt/mpi/lib"]);
    }

    #[test]
    fn test_wrapper_args_include_before_library() {
        // A flag list can contain overlapping prefixes; include flags are tried first.
        let mut flags = FamilyFlags::default();
        flags.include_path = vec!["-isystem".to_string(), "-I".to_string()];
        let parsed = WrapperArgs::parse(&["-isystem", "/usr/x", "-lm"], &flags).unwrap();
        assert_eq!(parsed.include_path, vec!["/usr/x"]);
        assert_eq!(parsed.libraries, vec!["m"]);
        assert!(parsed.compiler_flags.is_empty());
    }

    #[test]
    fn test_wrapper_args_missing_value() {
        let err = WrapperArgs::parse(&["-O2", "-L"], &FamilyFlags::default()).unwrap_err();
        assert!(err.to_string().contains("`-L` is missing its value"));
    }

    #[test]
    fn test_wrapped_compiler_parse() {
        let kb = kb();
        let output = "icc -I/opt/intel/mpi/include -L/opt/intel/mpi/lib -lmpifort -lmpi\n";
        let wrapped = WrappedCompiler::parse(output, &FamilyFlags::mpi(), &kb).unwrap();
        assert_eq!(wrapped.command, "icc");
        assert_eq!(wrapped.info.unwrap().family(), "Intel");
        assert_eq!(wrapped.args.libraries, vec!["mpifort", "mpi"]);

        assert!(WrappedCompiler::parse("  \n", &FamilyFlags::mpi(), &kb).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_plain_compiler() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        let gcc = install(tmp.path(), "gcc", "exit 0");

        let mut probe = CompilerProbe::new(&kb).with_search_path(tmp.path());
        let compiler = probe.probe(RegistryKind::Host, "gcc").unwrap();
        assert_eq!(compiler.absolute_path(), gcc);
        assert_eq!(compiler.path(), tmp.path());
        assert_eq!(compiler.command(), "gcc");
        assert_eq!(compiler.info().family(), "GNU");
        assert!(compiler.wrapped().is_none());

        let expected = crate::util::hash::sha256_file(&gcc).unwrap();
        assert_eq!(compiler.checksum().unwrap(), expected);
        assert_eq!(compiler.checksum().unwrap(), expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_wrapper_runs_once() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("calls");
        install(
            tmp.path(),
            "mpicc",
            &format!(
                "echo probed >> {}\necho \"gcc -I/opt/mpi/include -L /opt/mpi/lib -lmpi $*\"",
                log.display()
            ),
        );

        let mut probe = CompilerProbe::new(&kb)
            .with_search_path(tmp.path())
            .with_arch_args(["-m64"]);
        let first = probe.probe(RegistryKind::Mpi, "mpicc").unwrap();
        let by_path = probe
            .probe(RegistryKind::Mpi, &tmp.path().join("mpicc").to_string_lossy())
            .unwrap();
        assert!(Arc::ptr_eq(&first, &by_path));
        assert_eq!(probe.len(), 1);

        let calls = std::fs::read_to_string(&log).unwrap();
        assert_eq!(calls.lines().count(), 1);

        let wrapped = first.wrapped().unwrap();
        assert_eq!(wrapped.command, "gcc");
        assert_eq!(wrapped.args.include_path, vec!["/opt/mpi/include"]);
        assert_eq!(wrapped.args.library_path, vec!["/opt/mpi/lib"]);
        assert_eq!(wrapped.args.libraries, vec!["mpi"]);
        // The show flag and arch args are echoed back as compiler flags.
        assert_eq!(wrapped.args.compiler_flags, vec!["-show", "-m64"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_failing_wrapper() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), "mpif90", "echo 'unknown option' >&2; exit 1");

        let mut probe = CompilerProbe::new(&kb).with_search_path(tmp.path());
        let err = probe.probe(RegistryKind::Mpi, "mpif90").unwrap_err();
        assert!(format!("{:#}", err).contains("failed with exit code"));
        assert!(probe.is_empty());
    }

    #[test]
    fn test_probe_missing() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        let mut probe = CompilerProbe::new(&kb).with_search_path(tmp.path());
        let err = probe.probe(RegistryKind::Host, "icc").unwrap_err();
        assert!(err.to_string().contains("missing or not executable"));
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_unknown_command() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), "rustc", "exit 0");

        let mut probe = CompilerProbe::new(&kb).with_search_path(tmp.path());
        let err = probe.probe(RegistryKind::Host, "rustc").unwrap_err();
        assert!(err.to_string().contains("unknown compiler command"));
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_family_preferred() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        install(tmp.path(), "cxx", "exit 0");
        install(tmp.path(), "CC", "exit 0");
        install(tmp.path(), "cc", "exit 0");

        let system = kb.registry(RegistryKind::Host).family("System").unwrap();
        let mut probe = CompilerProbe::new(&kb).with_search_path(tmp.path());
        let installed = InstalledFamily::detect(&mut probe, RegistryKind::Host, system).unwrap();

        // `c++` is preferred but missing, so `cxx` fills CXX.
        assert_eq!(installed.preferred(&CXX_ROLE).unwrap().command(), "cxx");
        assert_eq!(installed.preferred(&CC_ROLE).unwrap().command(), "cc");
        assert!(matches!(
            installed.preferred(&FC_ROLE),
            Err(KbError::UnknownRole { .. })
        ));
        assert!(installed.preferred(&MPI_CC_ROLE).is_err());

        let roles: Vec<&str> = installed.iter().map(|(role, _)| role.keyword).collect();
        assert_eq!(roles, vec!["CC", "CXX"]);

        // FC is required.
        let err = InstalledCompilerSet::from_family(&installed).unwrap_err();
        assert!(err.to_string().contains("required role(s): FC"));
    }

    #[cfg(unix)]
    #[test]
    fn test_installed_compiler_set() {
        let kb = kb();
        let tmp = TempDir::new().unwrap();
        for name in ["gcc", "g++", "gfortran"] {
            install(tmp.path(), name, "exit 0");
        }

        let gnu = kb.registry(RegistryKind::Host).family("GNU").unwrap();
        let mut probe = CompilerProbe::new(&kb).with_search_path(tmp.path());
        let installed = InstalledFamily::detect(&mut probe, RegistryKind::Host, gnu).unwrap();

        let set = InstalledCompilerSet::from_family(&installed).unwrap();
        assert_eq!(set.uid(), "GNU");
        assert_eq!(set.get(&FC_ROLE).unwrap().command(), "gfortran");
        let roles: Vec<&str> = set.iter().map(|(role, _)| role.keyword).collect();
        assert_eq!(roles, vec!["CC", "CXX", "FC"]);

        let gcc = set.get(&CC_ROLE).unwrap().clone();
        let err = InstalledCompilerSet::new("bad", [("CC", gcc.clone()), ("LISP", gcc.clone())])
            .unwrap_err();
        assert!(err.to_string().contains("invalid compiler role `LISP`"));

        let err = InstalledCompilerSet::new("twice", [("CC", gcc.clone()), ("CC", gcc)]).unwrap_err();
        assert!(err.to_string().contains("filled twice"));
    }
}
