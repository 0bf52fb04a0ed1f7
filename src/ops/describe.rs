//! Listings of the knowledgebase contents.
//!
//! Backs the `families`, `family` and `roles` commands. Each listing is a
//! plain serializable value so the binary can print it as text or JSON.

use std::fmt::Write;

use serde::Serialize;

use crate::core::errors::KbError;
use crate::core::family::{CompilerFamily, FamilyFlags};
use crate::core::knowledgebase::KnowledgeBase;
use crate::core::registry::RegistryKind;
use crate::core::role::CompilerRole;

/// One line of the `families` listing.
#[derive(Debug, Clone, Serialize)]
pub struct FamilySummary {
    pub name: &'static str,
    pub kind: RegistryKind,
    pub preferred: bool,
    pub commands: usize,
}

/// Families of the given kinds, sorted by name within each kind.
pub fn list_families(kb: &KnowledgeBase, kinds: &[RegistryKind]) -> Vec<FamilySummary> {
    let mut summaries = Vec::new();
    for &kind in kinds {
        let registry = kb.registry(kind);
        let preferred = registry.preferred().map(|family| family.name());
        for name in registry.family_names() {
            let commands = registry.family(name).map(|family| family.len()).unwrap_or(0);
            summaries.push(FamilySummary {
                name,
                kind,
                preferred: preferred == Some(name),
                commands,
            });
        }
    }
    summaries
}

/// Format the `families` listing.
pub fn format_families(summaries: &[FamilySummary]) -> String {
    let mut output = String::new();
    let mut current = None;

    for summary in summaries {
        if current != Some(summary.kind) {
            if current.is_some() {
                output.push('\n');
            }
            let _ = writeln!(output, "{} compilers:", summary.kind);
            current = Some(summary.kind);
        }
        let marker = if summary.preferred { " (preferred)" } else { "" };
        let _ = writeln!(output, "  {}{}", summary.name, marker);
    }

    output
}

/// Members of one role in a family.
#[derive(Debug, Clone, Serialize)]
pub struct RoleMembers {
    pub role: &'static str,
    pub language: &'static str,
    pub commands: Vec<&'static str>,
}

/// Everything known about one family.
#[derive(Debug, Clone, Serialize)]
pub struct FamilyDetail {
    pub name: &'static str,
    pub kind: RegistryKind,
    pub preferred: bool,
    pub flags: FamilyFlags,
    pub roles: Vec<RoleMembers>,
}

impl FamilyDetail {
    fn new(kind: RegistryKind, family: &CompilerFamily, preferred: bool) -> Self {
        let roles = family
            .roles()
            .map(|role| RoleMembers {
                role: role.keyword,
                language: role.language,
                commands: family
                    .member_by_role(role)
                    .map(|members| members.iter().map(|info| info.command()).collect())
                    .unwrap_or_default(),
            })
            .collect();

        FamilyDetail {
            name: family.name(),
            kind,
            preferred,
            flags: family.flags().clone(),
            roles,
        }
    }
}

/// Describe the family called `name` in the registry of `kind`.
pub fn describe_family(
    kb: &KnowledgeBase,
    kind: RegistryKind,
    name: &str,
) -> Result<FamilyDetail, KbError> {
    let registry = kb.registry(kind);
    let family = registry.family(name)?;
    let preferred = registry
        .preferred()
        .is_some_and(|p| p.name() == family.name());
    Ok(FamilyDetail::new(kind, family, preferred))
}

/// Format a family description.
pub fn format_family(detail: &FamilyDetail) -> String {
    let mut output = String::new();

    let marker = if detail.preferred { " (preferred)" } else { "" };
    let _ = writeln!(output, "{} {} compilers{}", detail.name, detail.kind, marker);

    let _ = writeln!(output, "\nRoles:");
    for role in &detail.roles {
        let _ = writeln!(
            output,
            "  {:<10} {:<22} {}",
            role.role,
            role.language,
            role.commands.join(", ")
        );
    }

    let flags = &detail.flags;
    let _ = writeln!(output, "\nFlags:");
    for (label, values) in [
        ("version", &flags.version),
        ("include path", &flags.include_path),
        ("library path", &flags.library_path),
        ("link library", &flags.link_library),
        ("show wrapper", &flags.show_wrapper),
    ] {
        let shown = if values.is_empty() {
            "-".to_string()
        } else {
            values.join(" ")
        };
        let _ = writeln!(output, "  {:<13} {}", label, shown);
    }

    output
}

/// Format the list of every role.
pub fn format_roles(roles: &[CompilerRole]) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<10} {:<22} {:<9} {}",
        "ROLE", "LANGUAGE", "REQUIRED", "ENVIRONMENT"
    );
    for role in roles {
        let _ = writeln!(
            output,
            "{:<10} {:<22} {:<9} {}",
            role.keyword,
            role.language,
            if role.required { "yes" } else { "no" },
            role.env_vars.join(", ")
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
    fn test_list_families_sorted() {
        let kb = kb();
        let host = list_families(&kb, &[RegistryKind::Host]);
        let names: Vec<&str> = host.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Cray", "GNU", "IBM", "Intel", "PGI", "System"]);

        let preferred: Vec<&str> = host.iter().filter(|s| s.preferred).map(|s| s.name).collect();
        assert_eq!(preferred, vec!["System"]);

        let all = list_families(&kb, &RegistryKind::ALL);
        assert_eq!(all.len(), 6 + 4 + 2);
    }

    #[test]
    fn test_format_families() {
        let kb = kb();
        let output = format_families(&list_families(&kb, &[RegistryKind::Shmem]));
        assert_eq!(output, "shmem compilers:\n  Cray\n  OpenSHMEM (preferred)\n");
    }

    #[test]
    fn test_describe_family() {
        let kb = kb();
        let detail = describe_family(&kb, RegistryKind::Host, "PGI").unwrap();
        assert!(!detail.preferred);
        assert_eq!(detail.roles.len(), 3);
        assert_eq!(detail.roles[1].role, "CXX");
        assert_eq!(detail.roles[1].commands, vec!["pgc++", "pgcxx", "pgCC"]);

        let output = format_family(&detail);
        assert!(output.starts_with("PGI host compilers\n"));
        assert!(output.contains("pgc++, pgcxx, pgCC"));
        assert!(output.contains("show wrapper  -"));
    }

    #[test]
    fn test_describe_wrapper_family() {
        let kb = kb();
        let detail = describe_family(&kb, RegistryKind::Mpi, "Cray").unwrap();
        let output = format_family(&detail);
        assert!(output.contains("show wrapper  -craype-verbose --version -E"));
    }

    #[test]
    fn test_describe_unknown_family() {
        let kb = kb();
        let err = describe_family(&kb, RegistryKind::Shmem, "GNU").unwrap_err();
        assert!(matches!(err, KbError::UnknownFamily { .. }));
    }

    #[test]
    fn test_format_roles() {
        let output = format_roles(CompilerRole::all());
        assert!(output.starts_with("ROLE"));
        assert!(output.contains("FC         Fortran                yes       FC, F77, F90"));
        assert!(output.contains("SHMEM_CXX"));
    }
}
