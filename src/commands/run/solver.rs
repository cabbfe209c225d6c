use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
    time::{Duration, Instant},
};

use crate::config::Profile;

/// Poll interval while waiting for a solver process.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How a solver invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Exited(ExitStatus),
    /// Killed after exceeding the time limit
    TimedOut,
}

#[derive(Debug)]
pub struct Invocation {
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// The external solver: stdin is a test case, stdout is its answer.
#[derive(Debug, Clone)]
pub struct Solver {
    program: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    timeout: Duration,
}

impl Solver {
    pub fn new(profile: &Profile) -> Self {
        Self {
            program: profile.solver.clone(),
            args: profile.args.clone(),
            env: profile.env.clone(),
            timeout: profile.timeout(),
        }
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).envs(&self.env);
        cmd
    }

    /// Run the solver once with `input` as stdin.
    ///
    /// `output` is truncated and receives stdout. `errors` receives stderr.
    /// The clock starts right before spawning and stops as soon as the process has exited or
    /// been killed.
    pub fn invoke(&self, input: &Path, output: &Path, errors: &Path) -> anyhow::Result<Invocation> {
        let stdin = File::open(input)?;
        let stdout = File::create(output)?;
        let stderr = File::create(errors)?;
        let mut cmd = self.command();
        cmd.stdin(Stdio::from(stdin))
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            anyhow::anyhow!("Failed to spawn solver `{}`: {}", self.program.display(), e)
        })?;
        loop {
            let status = match child.try_wait() {
                Ok(status) => status,
                Err(e) => {
                    // The solver must not outlive its slot.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
            };
            if let Some(status) = status {
                return Ok(Invocation {
                    outcome: Outcome::Exited(status),
                    elapsed: start.elapsed(),
                });
            }
            let elapsed = start.elapsed();
            if elapsed >= self.timeout {
                // The process may exit on its own between the poll and the kill.
                if let Err(e) = child.kill() {
                    log::debug!("kill after timeout: {}", e);
                }
                child.wait()?;
                return Ok(Invocation {
                    outcome: Outcome::TimedOut,
                    elapsed: start.elapsed(),
                });
            }
            std::thread::sleep(POLL_INTERVAL.min(self.timeout - elapsed));
        }
    }
}
