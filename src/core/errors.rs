//! Knowledgebase error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error raised while building or querying a compiler registry.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum KbError {
    /// A command was added to the same family twice.
    #[error("command `{command}` is already a member of the {family} family")]
    #[diagnostic(code(compkb::kb::duplicate_registration))]
    DuplicateRegistration { command: String, family: String },

    /// Two families with the same name were registered.
    #[error("compiler family `{name}` is already registered")]
    #[diagnostic(code(compkb::kb::duplicate_family))]
    DuplicateFamily { name: String },

    /// No registered command matches, exactly or approximately.
    #[error("no compiler information is known for `{command}`")]
    #[diagnostic(
        code(compkb::kb::not_found),
        help("check the spelling of the compiler command or run `compkb families` to see known compilers")
    )]
    NotFound { command: String },

    /// The family has no member with this exact command.
    #[error("`{command}` is not a member of the {family} family")]
    #[diagnostic(code(compkb::kb::unknown_command))]
    UnknownCommand { command: String, family: String },

    /// The family has no command filling this role.
    #[error("the {family} family has no compiler in the {role} role")]
    #[diagnostic(code(compkb::kb::unknown_role))]
    UnknownRole { role: String, family: String },

    /// No family with this name is registered.
    #[error("unknown compiler family `{name}`")]
    #[diagnostic(code(compkb::kb::unknown_family))]
    UnknownFamily { name: String, known: Vec<String> },
}

impl KbError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            KbError::DuplicateRegistration { command, family } => Diagnostic::error(format!(
                "compiler command `{}` registered twice in the {} family",
                command, family
            ))
            .with_suggestion("Remove the duplicate command from the family definition"),

            KbError::DuplicateFamily { name } => {
                Diagnostic::error(format!("compiler family `{}` defined twice", name))
                    .with_suggestion("Rename one of the families in your configuration")
            }

            KbError::NotFound { command } => {
                Diagnostic::error(format!("unknown compiler command `{}`", command))
                    .with_context("no known compiler command matches or is contained in it")
                    .with_suggestion(suggestions::CHECK_SPELLING)
                    .with_suggestion(suggestions::LIST_FAMILIES)
                    .with_suggestion(suggestions::ADD_FAMILY)
            }

            KbError::UnknownCommand { command, family } => Diagnostic::error(format!(
                "`{}` is not a {} compiler command",
                command, family
            ))
            .with_suggestion(format!("Run `compkb family {}` to see its members", family)),

            KbError::UnknownRole { role, family } => Diagnostic::error(format!(
                "no {} compiler in the {} family",
                role, family
            ))
            .with_suggestion(suggestions::LIST_ROLES),

            KbError::UnknownFamily { name, known } => {
                let mut diag = Diagnostic::error(format!("unknown compiler family `{}`", name));
                if !known.is_empty() {
                    diag = diag.with_context(format!("known families: {}", known.join(", ")));
                }
                diag.with_suggestion(suggestions::LIST_FAMILIES)
            }
        }
    }
}
