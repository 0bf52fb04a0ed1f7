//! Global context for compkb operations.
//!
//! Provides centralized access to configuration, paths, and environment.
//! The knowledgebase itself is built from here so that every command sees
//! the same configured families and preferences.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::host::HostProfile;
use crate::core::knowledgebase::KnowledgeBase;
use crate::util::config::{self, Config};

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global compkb data (~/.compkb/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = config::global_config_dir().unwrap_or_else(|| PathBuf::from(".compkb"));

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Use a different home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the compkb home directory (~/.compkb/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find the project config (.compkb/config.toml) starting from cwd and
    /// searching upward.
    pub fn find_project_config(&self) -> Option<PathBuf> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = config::project_config_path(&current);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        let project = match self.find_project_config() {
            Some(found) => {
                tracing::debug!("Using project config {}", found.display());
                found
            }
            None => config::project_config_path(&self.cwd),
        };
        config::load_config(Some(&self.config_path()), &project)
    }

    /// Build the knowledgebase for the running host.
    pub fn knowledgebase(&self) -> Result<KnowledgeBase> {
        let config = self.load_config();
        KnowledgeBase::load(&config, HostProfile::detect(), |key| std::env::var(key).ok())
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }
}
