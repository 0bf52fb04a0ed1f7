//! Compiler identification.
//!
//! The `identify` command classifies compiler commands by family and role
//! without running them.
//!
//! ## Usage
//!
//! ```bash
//! compkb identify icc /usr/bin/mpif90   # Search every knowledgebase
//! compkb identify --kind mpi cc         # Search only the MPI knowledgebase
//! compkb identify --json gcc-12
//! ```

use std::fmt::Write;

use serde::Serialize;

use crate::core::errors::KbError;
use crate::core::info::CompilerInfo;
use crate::core::knowledgebase::KnowledgeBase;
use crate::core::registry::{command_basename, RegistryKind};
use crate::util::diagnostic::Diagnostic;

/// Options for the identify command.
#[derive(Debug, Clone, Default)]
pub struct IdentifyOptions {
    /// Restrict the search to one knowledgebase.
    pub kind: Option<RegistryKind>,
}

/// How a command was identified.
#[derive(Debug, Clone, Serialize)]
pub struct Identification {
    /// Knowledgebase the match came from
    pub kind: RegistryKind,
    /// Registered command that matched
    pub command: &'static str,
    /// Owning family
    pub family: &'static str,
    /// Role keyword, e.g. `CXX`
    pub role: &'static str,
    /// Role language, e.g. `C++`
    pub language: &'static str,
    /// Whether the basename equals the registered command
    pub exact: bool,
    /// Other families with the same exact command, in preference order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub also_in: Vec<&'static str>,
}

impl Identification {
    fn new(kb: &KnowledgeBase, kind: RegistryKind, input: &str, info: &CompilerInfo) -> Self {
        let exact = command_basename(input) == info.command();
        let also_in = if exact {
            kb.registry(kind)
                .exact_matches(input)
                .into_iter()
                .map(|other| other.family())
                .filter(|family| *family != info.family())
                .collect()
        } else {
            Vec::new()
        };

        Identification {
            kind,
            command: info.command(),
            family: info.family(),
            role: info.role().keyword,
            language: info.role().language,
            exact,
            also_in,
        }
    }

    /// Short description, e.g. "Intel C++ compiler".
    pub fn short_descr(&self) -> String {
        format!("{} {} compiler", self.family, self.language)
    }
}

/// Result of identifying one command.
#[derive(Debug, Serialize)]
pub struct IdentifyEntry {
    /// The command as given
    pub input: String,
    /// What it was identified as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identified: Option<Identification>,
    /// Why identification failed
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "error_message")]
    pub error: Option<KbError>,
}

fn error_message<S>(error: &Option<KbError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match error {
        Some(err) => serializer.serialize_str(&err.to_string()),
        None => serializer.serialize_none(),
    }
}

/// Identification results in input order.
#[derive(Debug, Default, Serialize)]
pub struct IdentifyReport {
    pub entries: Vec<IdentifyEntry>,
}

impl IdentifyReport {
    /// Whether every command was identified.
    pub fn all_identified(&self) -> bool {
        self.entries.iter().all(|e| e.identified.is_some())
    }

    /// Number of commands that could not be identified.
    pub fn unknown_count(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    /// Diagnostics for the commands that could not be identified, plus a
    /// note for each exact match that other families share.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        for entry in &self.entries {
            if let Some(err) = &entry.error {
                diags.push(err.to_diagnostic());
            }
            if let Some(id) = &entry.identified {
                if !id.also_in.is_empty() {
                    diags.push(
                        Diagnostic::note(format!(
                            "`{}` is also a {} compiler in: {}",
                            id.command,
                            id.kind,
                            id.also_in.join(", ")
                        ))
                        .with_context(format!("{} is the preferred family", id.family)),
                    );
                }
            }
        }
        diags
    }
}

/// Identify each command in `commands`.
///
/// Unknown commands are recorded in the report rather than aborting the
/// remaining lookups.
pub fn identify<S: AsRef<str>>(
    kb: &KnowledgeBase,
    commands: &[S],
    options: &IdentifyOptions,
) -> IdentifyReport {
    let mut report = IdentifyReport::default();

    for command in commands {
        let command = command.as_ref();
        let found = match options.kind {
            Some(kind) => kb.find(kind, command).map(|info| (kind, info)),
            None => kb.find_any(command),
        };

        let entry = match found {
            Ok((kind, info)) => {
                tracing::debug!("{} is {} ({})", command, info.short_descr(), kind);
                IdentifyEntry {
                    input: command.to_string(),
                    identified: Some(Identification::new(kb, kind, command, info)),
                    error: None,
                }
            }
            Err(err) => IdentifyEntry {
                input: command.to_string(),
                identified: None,
                error: Some(err),
            },
        };
        report.entries.push(entry);
    }

    report
}

/// Format identified commands for display, one per line.
pub fn format_report(report: &IdentifyReport) -> String {
    let mut output = String::new();

    for entry in &report.entries {
        let Some(id) = &entry.identified else {
            continue;
        };
        let approx = if id.exact {
            String::new()
        } else {
            format!(" (matched `{}`)", id.command)
        };
        let _ = writeln!(
            output,
            "{}: {} [{} {}]{}",
            entry.input,
            id.short_descr(),
            id.kind,
            id.role,
            approx
        );
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::HostProfile;
    use crate::util::config::Config;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::load(&Config::default(), HostProfile::new("x86_64", "linux"), |_| None)
            .unwrap()
    }

    #[test]
    fn test_identify_mixed() {
        let kb = kb();
        let report = identify(&kb, &["icc", "/usr/bin/mpif90", "rustc"], &IdentifyOptions::default());

        assert_eq!(report.entries.len(), 3);
        assert!(!report.all_identified());
        assert_eq!(report.unknown_count(), 1);

        let icc = report.entries[0].identified.as_ref().unwrap();
        assert_eq!(icc.family, "Intel");
        assert_eq!(icc.role, "CC");
        assert_eq!(icc.kind, RegistryKind::Host);
        assert!(icc.exact);

        let mpif90 = report.entries[1].identified.as_ref().unwrap();
        assert_eq!(mpif90.kind, RegistryKind::Mpi);
        assert_eq!(mpif90.role, "MPI_FC");

        assert!(matches!(
            report.entries[2].error,
            Some(KbError::NotFound { .. })
        ));
    }

    #[test]
    fn test_identify_with_kind() {
        let kb = kb();
        let options = IdentifyOptions {
            kind: Some(RegistryKind::Mpi),
        };
        let report = identify(&kb, &["cc"], &options);
        let id = report.entries[0].identified.as_ref().unwrap();
        assert_eq!(id.kind, RegistryKind::Mpi);
        assert_eq!(id.family, "Cray");
        assert_eq!(id.role, "MPI_CC");
    }

    #[test]
    fn test_identify_shared_command() {
        let kb = kb();
        let report = identify(&kb, &["cc"], &IdentifyOptions::default());
        let id = report.entries[0].identified.as_ref().unwrap();
        assert_eq!(id.family, "System");
        assert_eq!(id.also_in, vec!["Cray"]);

        let diags = report.diagnostics();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].format(false).starts_with("note: `cc` is also a host compiler in: Cray"));
    }

    #[test]
    fn test_format_report() {
        let kb = kb();
        let report = identify(&kb, &["icpc", "gcc-12"], &IdentifyOptions::default());
        let output = format_report(&report);
        assert!(output.contains("icpc: Intel C++ compiler [host CXX]\n"));
        assert!(output.contains("gcc-12: GNU C compiler [host CC] (matched `gcc`)\n"));
    }

    #[test]
    fn test_report_json() {
        let kb = kb();
        let report = identify(&kb, &["ifort", "nope"], &IdentifyOptions::default());
        let json = serde_json::to_value(&report).unwrap();

        let first = &json["entries"][0];
        assert_eq!(first["input"], "ifort");
        assert_eq!(first["identified"]["family"], "Intel");
        assert_eq!(first["identified"]["kind"], "host");
        assert!(first["identified"].get("also_in").is_none());
        assert!(first.get("error").is_none());

        let second = &json["entries"][1];
        assert_eq!(second["error"], "no compiler information is known for `nope`");
    }
}
