//! The harness configs
//!
//! Profiles are loaded from `casebench.toml` in the current directory, or from the file given by
//! `--config`. If no config file exists, a `default` profile with the values below is used.
//!
//! # Example:
//!
//! ```toml
//! [profiles.default]
//! solver = "./cmake-build-debug/PDSP" # The solver executable
//! args = []                           # Optional. Extra solver arguments
//! env = { OMP_NUM_THREADS = "1" }     # Optional. Extra solver environment variables
//! input = "testdata"                  # Test case directory
//! output = "greedy_output"            # Captured solver outputs
//! logs = ".casebench/logs"            # Run summaries and solver stderr
//! jobs = 1                            # Worker threads
//! slots = 1                           # Max. solver processes alive at once
//! timeout = 1800.0                    # Seconds before a solver is killed
//! ```
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "casebench.toml";

/// The harness configuration.
#[derive(Serialize, Deserialize, Debug)]
pub struct HarnessConfig {
    /// Named profiles
    pub profiles: HashMap<String, Profile>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            profiles: [("default".to_owned(), Profile::default())]
                .into_iter()
                .collect(),
        }
    }
}

impl HarnessConfig {
    /// Load the config from `path`, or from `./casebench.toml`.
    /// A missing default config file yields the built-in `default` profile.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = path.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        if !file.is_file() {
            if path.is_some() {
                anyhow::bail!("Config file not found: {}", file.display());
            }
            log::debug!("{} not found, using the default profile", file.display());
            return Ok(Self::default());
        }
        let s = std::fs::read_to_string(file)?;
        toml::from_str::<HarnessConfig>(&s)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", file.display(), e))
    }

    pub fn profile(&self, name: &str) -> anyhow::Result<Profile> {
        let Some(profile) = self.profiles.get(name).cloned() else {
            anyhow::bail!("Could not find harness profile `{}`", name);
        };
        Ok(profile)
    }
}

fn one() -> usize {
    1
}

fn default_solver() -> PathBuf {
    PathBuf::from("./cmake-build-debug/PDSP")
}

fn default_input() -> PathBuf {
    PathBuf::from("testdata")
}

fn default_output() -> PathBuf {
    PathBuf::from("greedy_output")
}

fn default_logs() -> PathBuf {
    PathBuf::from(".casebench/logs")
}

fn default_timeout() -> f64 {
    1800.0
}

/// One set of harness settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Profile {
    /// The solver executable
    #[serde(default = "default_solver")]
    pub solver: PathBuf,
    /// Extra solver arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra solver environment variables
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Test case directory
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Directory receiving one captured output per test case
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Root of the per-run log directories
    #[serde(default = "default_logs")]
    pub logs: PathBuf,
    /// Number of worker threads pulling test cases
    #[serde(default = "one")]
    pub jobs: usize,
    /// Maximum number of solver processes alive at once
    #[serde(default = "one")]
    pub slots: usize,
    /// Per-invocation time limit, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: f64,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            solver: default_solver(),
            args: Vec::new(),
            env: HashMap::new(),
            input: default_input(),
            output: default_output(),
            logs: default_logs(),
            jobs: one(),
            slots: one(),
            timeout: default_timeout(),
        }
    }
}

impl Profile {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.jobs == 0 {
            anyhow::bail!("`jobs` must be at least 1");
        }
        if self.slots == 0 {
            anyhow::bail!("`slots` must be at least 1");
        }
        if !self.timeout.is_finite() || self.timeout <= 0.0 {
            anyhow::bail!("`timeout` must be a positive number of seconds");
        }
        if Duration::try_from_secs_f64(self.timeout).is_err() {
            anyhow::bail!("`timeout` is too large: {}s", self.timeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout)
    }
}
