//! Installed compiler discovery.
//!
//! The `detect` command looks for every known compiler family on `PATH`
//! and reports the preferred installed compiler for each role.
//!
//! ## Usage
//!
//! ```bash
//! compkb detect                       # All families in every knowledgebase
//! compkb detect --kind mpi            # MPI wrappers only
//! compkb detect --kind host --family GNU
//! ```

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::Serialize;

use crate::core::errors::KbError;
use crate::core::knowledgebase::KnowledgeBase;
use crate::core::registry::RegistryKind;
use crate::core::seed::CRAY;
use crate::ops::installed::{CompilerProbe, InstalledFamily};

/// Options for the detect command.
#[derive(Debug, Clone, Default)]
pub struct DetectOptions {
    /// Restrict detection to one knowledgebase.
    pub kind: Option<RegistryKind>,

    /// Restrict detection to one family.
    pub family: Option<String>,

    /// Extra arguments passed to wrappers when probing.
    pub arch_args: Vec<String>,
}

/// A compiler found on the system.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedCompiler {
    pub role: &'static str,
    pub command: String,
    pub path: PathBuf,
    /// Command line of the compiler a wrapper invokes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wraps: Option<String>,
}

/// Installed members of one family.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedFamily {
    pub kind: RegistryKind,
    pub family: &'static str,
    pub compilers: Vec<DetectedCompiler>,
}

/// Result of scanning the system.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DetectReport {
    /// Families with at least one installed member
    pub families: Vec<DetectedFamily>,

    /// Families whose installed compilers could not be probed
    pub warnings: Vec<String>,
}

impl DetectReport {
    /// Total number of installed compilers found.
    pub fn compiler_count(&self) -> usize {
        self.families.iter().map(|f| f.compilers.len()).sum()
    }
}

/// Scan the system for installed compilers.
pub fn detect(kb: &KnowledgeBase, options: &DetectOptions) -> Result<DetectReport> {
    let probe = CompilerProbe::new(kb).with_arch_args(options.arch_args.iter().cloned());
    detect_with(probe, options)
}

/// Scan using an already configured probe.
pub fn detect_with(mut probe: CompilerProbe<'_>, options: &DetectOptions) -> Result<DetectReport> {
    let kb = probe.knowledgebase();
    let kinds: Vec<RegistryKind> = match options.kind {
        Some(kind) => vec![kind],
        None => RegistryKind::ALL.to_vec(),
    };

    if let (Some(name), None) = (&options.family, options.kind) {
        if !kinds.iter().any(|&kind| kb.registry(kind).contains_family(name)) {
            let mut known: Vec<String> = kinds
                .iter()
                .flat_map(|&kind| kb.registry(kind).family_names())
                .map(str::to_string)
                .collect();
            known.sort();
            known.dedup();
            return Err(KbError::UnknownFamily {
                name: name.clone(),
                known,
            }
            .into());
        }
    }

    let mut report = DetectReport::default();
    for kind in kinds {
        let registry = kb.registry(kind);
        let families: Vec<_> = match &options.family {
            Some(name) => match registry.family(name) {
                Ok(family) => vec![family],
                // Looking in every kind for one family is not an error.
                Err(_) if options.kind.is_none() => continue,
                Err(err) => return Err(err.into()),
            },
            None => registry.all_families().collect(),
        };

        for family in families {
            // Off Cray, `cc -craype-verbose` is an ordinary compiler printing its banner.
            if family.name() == CRAY && !kb.profile().cray && options.family.is_none() {
                tracing::debug!("Skipping Cray {} compilers on a non-Cray host", kind);
                continue;
            }

            let installed = match InstalledFamily::detect(&mut probe, kind, family) {
                Ok(installed) => installed,
                Err(err) => {
                    tracing::debug!("Skipping {} {} compilers: {:#}", family.name(), kind, err);
                    report
                        .warnings
                        .push(format!("{} {} compilers: {:#}", family.name(), kind, err));
                    continue;
                }
            };
            if installed.is_empty() {
                continue;
            }

            let compilers = installed
                .iter()
                .map(|(role, compiler)| DetectedCompiler {
                    role: role.keyword,
                    command: compiler.command().to_string(),
                    path: compiler.absolute_path().to_path_buf(),
                    wraps: compiler.wrapped().map(|w| {
                        let mut line = w.command.clone();
                        for flag in &w.args.compiler_flags {
                            line.push(' ');
                            line.push_str(flag);
                        }
                        line
                    }),
                })
                .collect();

            report.families.push(DetectedFamily {
                kind,
                family: family.name(),
                compilers,
            });
        }
    }

    Ok(report)
}

/// Format the detect report for display.
pub fn format_report(report: &DetectReport) -> String {
    let mut output = String::new();

    if report.families.is_empty() {
        let _ = writeln!(output, "No known compilers found.");
    }

    for family in &report.families {
        let _ = writeln!(output, "{} {} compilers:", family.family, family.kind);
        for compiler in &family.compilers {
            let _ = write!(
                output,
                "  {:<10} {}",
                compiler.role,
                compiler.path.display()
            );
            if let Some(wraps) = &compiler.wraps {
                let _ = write!(output, " (wraps {})", wraps);
            }
            output.push('\n');
        }
    }

    output
}
