use std::{
    collections::VecDeque,
    fs::OpenOptions,
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    time::Duration,
};

use colored::Colorize;

use crate::{
    config::Profile,
    meta::{CaseRecord, CaseStatus},
};

use super::{
    slots::SolverSlots,
    solver::{Outcome, Solver},
};

/// Runs the solver over every test case of the input directory.
#[derive(Debug)]
pub struct CaseRunner<'a> {
    runid: &'a str,
    profile: &'a Profile,
    /// Test case file names, sorted
    cases: Vec<String>,
    log_dir: PathBuf,
}

impl<'a> CaseRunner<'a> {
    pub fn new(runid: &'a str, profile: &'a Profile, log_dir: &Path) -> Self {
        Self {
            runid,
            profile,
            cases: Vec::new(),
            log_dir: log_dir.to_owned(),
        }
    }

    /// Collect all regular files of the input directory. No naming convention is enforced.
    pub fn collect_cases(dir: &Path) -> anyhow::Result<Vec<String>> {
        let mut cases = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => cases.push(name),
                Err(name) => log::warn!("Skipping non UTF-8 file name: {:?}", name),
            }
        }
        cases.sort();
        Ok(cases)
    }

    fn print_before_run(&self) {
        print_md!("# {}\n\n", self.runid);
        print_md!("* solver: `{}`", self.profile.solver.display());
        print_md!("* cases: `{}`", self.cases.len());
        print_md!("* output: `{}`", self.profile.output.display());
        print_md!("* logs: `{}`", self.log_dir.display());
        print_md!(
            "* jobs: `{}`, slots: `{}`, timeout: `{}s`",
            self.profile.jobs,
            self.profile.slots,
            self.profile.timeout
        );
        println!();
        println!("{}\n", "Running Test Cases...".blue());
    }

    fn print_after_run(&self, records: &[CaseRecord]) {
        let hung = records
            .iter()
            .filter(|r| r.status == CaseStatus::Hung)
            .count();
        if hung == 0 {
            println!("\n{}\n", "✔ All Test Cases Finished.".green());
        } else {
            println!(
                "\n{}\n",
                format!("✘ {} of {} Test Cases Timed Out.", hung, records.len()).red()
            );
        }
        print_md!("Outputs at:\n");
        print_md!("* `{}`\n\n", self.profile.output.display());
        print_md!("Please run `casebench report` to view results.\n");
    }

    fn max_case_name_len(&self) -> usize {
        self.cases.iter().map(|c| c.len()).max().unwrap_or(0)
    }

    fn print_progress(&self, record: &CaseRecord) {
        let width = self.max_case_name_len() + 3;
        let status = match record.status {
            CaseStatus::Completed => format!("✔ {:.3}s", record.time).green(),
            CaseStatus::Hung => format!("✘ killed after {:.3}s", record.time).red(),
        };
        let padding = " ".repeat(width - record.case.len());
        println!("{}{}{}", record.case.blue().bold(), padding, status);
    }

    /// Run the solver on one test case and append the timing footer to its output.
    fn run_one(
        &self,
        solver: &Solver,
        slots: &SolverSlots,
        case: &str,
    ) -> anyhow::Result<CaseRecord> {
        let input = self.profile.input.join(case);
        let output = self.profile.output.join(case);
        let errors = self.log_dir.join(format!("{}.log", case));
        let invocation = {
            let _permit = slots.acquire();
            log::debug!("{}: solver started", case);
            solver.invoke(&input, &output, &errors)?
        };
        let hung = invocation.outcome == Outcome::TimedOut;
        append_footer(&output, hung, invocation.elapsed)?;
        let record = CaseRecord {
            case: case.to_owned(),
            status: if hung {
                CaseStatus::Hung
            } else {
                CaseStatus::Completed
            },
            time: invocation.elapsed.as_secs_f64(),
            exit_code: match invocation.outcome {
                Outcome::Exited(status) => status.code(),
                Outcome::TimedOut => None,
            },
        };
        if hung {
            log::warn!("{}: killed after {}s time limit", case, self.profile.timeout);
        }
        Ok(record)
    }

    /// Pull test cases from the shared queue until it is empty or another worker failed.
    fn worker(
        &self,
        solver: &Solver,
        slots: &SolverSlots,
        queue: &Mutex<VecDeque<String>>,
        abort: &AtomicBool,
    ) -> anyhow::Result<Vec<CaseRecord>> {
        let mut records = Vec::new();
        while !abort.load(Ordering::SeqCst) {
            let next = queue.lock().unwrap_or_else(|e| e.into_inner()).pop_front();
            let Some(case) = next else {
                break;
            };
            match self.run_one(solver, slots, &case) {
                Ok(record) => {
                    self.print_progress(&record);
                    io::stdout().flush()?;
                    records.push(record);
                }
                Err(e) => {
                    abort.store(true, Ordering::SeqCst);
                    return Err(e.context(format!("Failed to run test case `{}`", case)));
                }
            }
        }
        Ok(records)
    }

    /// Run all test cases.
    /// Up to `jobs` workers pull cases concurrently, and at most `slots` solvers run at once.
    pub fn run(&mut self) -> anyhow::Result<Vec<CaseRecord>> {
        self.cases = Self::collect_cases(&self.profile.input)?;
        std::fs::create_dir_all(&self.profile.output)?;
        self.print_before_run();
        let solver = Solver::new(self.profile);
        let slots = SolverSlots::new(self.profile.slots);
        let queue = Mutex::new(self.cases.iter().cloned().collect::<VecDeque<_>>());
        let abort = AtomicBool::new(false);
        let workers = self.profile.jobs.min(self.cases.len()).max(1);
        let (this, solver, slots, queue, abort) = (&*self, &solver, &slots, &queue, &abort);
        let results = std::thread::scope(|s| {
            let handles = (0..workers)
                .map(|_| s.spawn(move || this.worker(solver, slots, queue, abort)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| {
                    h.join()
                        .unwrap_or_else(|_| Err(anyhow::anyhow!("Harness worker panicked")))
                })
                .collect::<Vec<_>>()
        });
        let mut records = Vec::new();
        for result in results {
            records.extend(result?);
        }
        records.sort_by(|a, b| a.case.cmp(&b.case));
        self.print_after_run(&records);
        Ok(records)
    }
}

/// Append `Time: <seconds>` to a captured output, on a line of its own.
/// A killed solver additionally gets a `Time limit exceeded` line before the footer.
fn append_footer(output: &Path, hung: bool, elapsed: Duration) -> anyhow::Result<()> {
    let mut f = OpenOptions::new().read(true).append(true).open(output)?;
    let needs_newline = if f.metadata()?.len() > 0 {
        f.seek(SeekFrom::End(-1))?;
        let mut last = [0u8; 1];
        f.read_exact(&mut last)?;
        last[0] != b'\n'
    } else {
        false
    };
    if needs_newline {
        writeln!(f)?;
    }
    if hung {
        writeln!(f, "Time limit exceeded")?;
    }
    writeln!(f, "Time: {}", elapsed.as_secs_f64())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn footer_goes_on_its_own_line() -> anyhow::Result<()> {
        let dir = TempDir::new("casebench")?;
        let path = dir.path().join("out");
        std::fs::write(&path, "12\n1 4 7")?;
        append_footer(&path, false, Duration::from_millis(1500))?;
        assert_eq!(std::fs::read_to_string(&path)?, "12\n1 4 7\nTime: 1.5\n");
        std::fs::write(&path, "")?;
        append_footer(&path, true, Duration::from_secs(2))?;
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "Time limit exceeded\nTime: 2\n"
        );
        Ok(())
    }

    #[test]
    fn only_regular_files_are_cases() -> anyhow::Result<()> {
        let dir = TempDir::new("casebench")?;
        std::fs::write(dir.path().join("case2"), "")?;
        std::fs::write(dir.path().join("IEEE-30.graph"), "")?;
        std::fs::write(dir.path().join("case10"), "")?;
        std::fs::create_dir(dir.path().join("nested"))?;
        assert_eq!(
            CaseRunner::collect_cases(dir.path())?,
            vec!["IEEE-30.graph", "case10", "case2"]
        );
        Ok(())
    }
}
