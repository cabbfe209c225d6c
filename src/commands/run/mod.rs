use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use clap::Parser;

use crate::{
    config::{HarnessConfig, Profile},
    meta::RunInfo,
};

mod checks;
mod runner;
mod slots;
mod solver;

use runner::CaseRunner;

/// Run the solver over all test cases and record the time of each run
#[derive(Parser)]
pub struct RunArgs {
    #[arg(long, default_value = "default")]
    /// Harness profile
    pub profile: String,
    /// Path to the config file. Default to `./casebench.toml` if it exists.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Solver executable
    #[arg(long)]
    pub solver: Option<PathBuf>,
    /// Test case directory
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Directory receiving captured solver outputs
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Root directory of run logs
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,
    #[arg(short = 'j', long)]
    /// Number of worker threads
    pub jobs: Option<usize>,
    #[arg(long)]
    /// Maximum number of solver processes running at once
    pub slots: Option<usize>,
    #[arg(short = 't', long)]
    /// Per-case time limit in seconds
    pub timeout: Option<f64>,
}

impl RunArgs {
    fn generate_runid(&self, host: &str) -> (String, DateTime<Local>) {
        let t = Local::now();
        let time = t.format("%Y-%m-%d-%a-%H%M%S").to_string();
        let run_id = format!("{}-{}-{}", self.profile, host, time);
        (run_id, t)
    }

    fn load_profile(&self) -> anyhow::Result<Profile> {
        let config = HarnessConfig::load(self.config.as_deref())?;
        let mut profile = config.profile(&self.profile)?;
        // Overwrite profile values
        if let Some(solver) = &self.solver {
            profile.solver = solver.clone();
        }
        if let Some(input) = &self.input {
            profile.input = input.clone();
        }
        if let Some(output) = &self.output {
            profile.output = output.clone();
        }
        if let Some(logs) = &self.logs_dir {
            profile.logs = logs.clone();
        }
        if let Some(jobs) = self.jobs {
            profile.jobs = jobs;
        }
        if let Some(slots) = self.slots {
            profile.slots = slots;
        }
        if let Some(timeout) = self.timeout {
            profile.timeout = timeout;
        }
        profile.validate()?;
        Ok(profile)
    }

    /// Create `<logs>/<runid>` and point `<logs>/latest` at it.
    fn prepare_logs_dir(&self, logs_dir: &Path, run_id: &str) -> anyhow::Result<PathBuf> {
        let log_dir = logs_dir.join(run_id);
        let latest_log_dir = logs_dir.join("latest");
        std::fs::create_dir_all(&log_dir)?;
        if latest_log_dir.exists() || latest_log_dir.is_symlink() {
            if latest_log_dir.is_dir() && !latest_log_dir.is_symlink() {
                std::fs::remove_dir_all(&latest_log_dir)?;
            } else {
                std::fs::remove_file(&latest_log_dir)?;
            }
        }
        // `latest` is a relative link
        #[cfg(target_os = "windows")]
        std::os::windows::fs::symlink_dir(run_id, latest_log_dir)?;
        #[cfg(not(target_os = "windows"))]
        std::os::unix::fs::symlink(run_id, latest_log_dir)?;
        Ok(log_dir)
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let profile = self.load_profile()?;
        let system = crate::utils::sys::get_current_system_info();
        let (run_id, start_time) = self.generate_runid(&system.host);
        let mut run_info = RunInfo::new(profile, run_id, start_time);
        self.pre_run_checks(&run_info)?;
        let log_dir = self.prepare_logs_dir(&run_info.profile.logs, &run_info.runid)?;
        run_info.dump(&log_dir)?;
        log::info!("Run {} started", run_info.runid);
        let records = CaseRunner::new(&run_info.runid, &run_info.profile, &log_dir).run()?;
        run_info.cases = records;
        run_info.finish_timestamp_utc = Some(Local::now().to_utc().timestamp());
        run_info.dump(&log_dir)?;
        log::info!(
            "Run {} finished: {} test cases",
            run_info.runid,
            run_info.cases.len()
        );
        Ok(())
    }
}
