//! The run summary.
//!
//! Each `casebench run` generates a unique `RUNID`, and dumps a summary of the run to
//! `<logs>/<RUNID>/run.toml`. The summary is written once before the first test case starts and
//! rewritten with the execution records when the run finishes. A summary without a finish time
//! belongs to a run that crashed or is still in progress.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::{config::Profile, utils};

pub const RUN_INFO_FILE: &str = "run.toml";

/// The harness run metadata.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunInfo {
    /// Harness run id
    pub runid: String,
    /// Run start time
    #[serde(rename = "start-time-utc")]
    pub start_timestamp_utc: i64,
    /// Run finish time
    #[serde(rename = "finish-time-utc")]
    pub finish_timestamp_utc: Option<i64>,
    /// The effective profile, after command line overrides
    pub profile: Profile,
    /// Current system information
    pub system: SystemInfo,
    /// One record per finished test case, in test case name order
    #[serde(default)]
    pub cases: Vec<CaseRecord>,
}

impl RunInfo {
    pub(crate) fn new(profile: Profile, runid: String, start_time: DateTime<Local>) -> Self {
        Self {
            runid,
            start_timestamp_utc: start_time.to_utc().timestamp(),
            finish_timestamp_utc: None,
            profile,
            system: utils::sys::get_current_system_info(),
            cases: Vec::new(),
        }
    }

    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub(crate) fn dump(&self, log_dir: &Path) -> anyhow::Result<()> {
        std::fs::write(log_dir.join(RUN_INFO_FILE), toml::to_string(self)?)?;
        Ok(())
    }
}

/// Final state of one test case.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStatus {
    /// The solver exited on its own. Its exit status is recorded but not judged.
    Completed,
    /// The solver exceeded the time limit and was killed.
    Hung,
}

/// The execution record of one test case.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CaseRecord {
    /// Test case file name
    pub case: String,
    pub status: CaseStatus,
    /// Wall-clock seconds from spawn to exit or kill
    pub time: f64,
    /// Solver exit code, if it exited normally
    #[serde(rename = "exit-code")]
    pub exit_code: Option<i32>,
}

/// The system information at the start of a run.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SystemInfo {
    /// Host name
    pub host: String,
    /// Operating system name and version
    pub os: String,
    /// CPU architecture
    pub arch: String,
    /// Kernel version
    #[serde(rename = "kernel-version")]
    pub kernel: String,
    /// CPU model
    #[serde(rename = "cpu-model")]
    pub cpu_model: String,
    /// Number of logical CPUs
    pub cpus: usize,
    /// Total memory size in bytes
    pub memory_size: usize,
    /// (*Linux only*) All logged in users
    #[cfg(target_os = "linux")]
    #[serde(default)]
    pub users: Vec<String>,
    /// The PID of the harness process
    pub pid: usize,
}
