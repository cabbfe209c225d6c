use colored::Colorize;

use crate::meta::RunInfo;

use super::{runner::CaseRunner, RunArgs};

/// Sanity checks performed before any solver is started.
struct PreRunChecker<'a> {
    warnings: Vec<String>,
    run: &'a RunInfo,
}

impl<'a> PreRunChecker<'a> {
    fn new(run: &'a RunInfo) -> Self {
        Self {
            warnings: Vec::new(),
            run,
        }
    }

    fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_owned());
    }

    fn check_solver(&mut self) -> anyhow::Result<()> {
        let solver = &self.run.profile.solver;
        // Bare program names are resolved through PATH at spawn time.
        if solver.components().count() > 1 && !solver.is_file() {
            anyhow::bail!("Solver not found: {}", solver.display());
        }
        Ok(())
    }

    fn check_input(&mut self) -> anyhow::Result<()> {
        let input = &self.run.profile.input;
        if !input.is_dir() {
            anyhow::bail!("Test case directory not found: {}", input.display());
        }
        if CaseRunner::collect_cases(input)?.is_empty() {
            self.warn(format!("No test cases in {}", input.display()));
        }
        Ok(())
    }

    fn check_output(&mut self) -> anyhow::Result<()> {
        let output = &self.run.profile.output;
        if output.is_dir() && std::fs::read_dir(output)?.next().is_some() {
            self.warn(format!(
                "{} is not empty. Outputs of matching test cases will be overwritten.",
                output.display()
            ));
        }
        Ok(())
    }

    #[cfg(target_os = "linux")]
    fn check_users(&mut self) {
        let users = &self.run.system.users;
        if users.len() > 1 {
            let msg = format!(
                "More than one user logged in: {}. Timings may be noisy.",
                users.join(", ")
            );
            self.warn(msg);
        }
    }

    fn check(&mut self) -> anyhow::Result<()> {
        self.check_solver()?;
        self.check_input()?;
        self.check_output()?;
        #[cfg(target_os = "linux")]
        self.check_users();
        Ok(())
    }

    fn dump_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        eprintln!("{}\n", "Pre-Run Checks Failed:".bold().black().on_red());
        for msg in &self.warnings {
            eprintln!("{} {}", "•".bright_red(), msg.red());
        }
        eprintln!();
    }
}

impl RunArgs {
    pub(super) fn pre_run_checks(&self, run: &RunInfo) -> anyhow::Result<()> {
        let mut checker = PreRunChecker::new(run);
        let result = checker.check();
        checker.dump_warnings();
        result
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;
    use crate::config::Profile;

    fn run_info(dir: &TempDir) -> anyhow::Result<RunInfo> {
        let input = dir.path().join("testdata");
        std::fs::create_dir(&input)?;
        std::fs::write(input.join("case1"), "1 0\n")?;
        let profile = Profile {
            solver: "/bin/sh".into(),
            input,
            output: dir.path().join("greedy_output"),
            ..Profile::default()
        };
        Ok(RunInfo::new(profile, "test".to_owned(), chrono::Local::now()))
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn other_users_only_warn() -> anyhow::Result<()> {
        let dir = TempDir::new("casebench")?;
        let mut run = run_info(&dir)?;
        run.system.users = vec!["alice".to_owned(), "bob".to_owned()];
        let mut checker = PreRunChecker::new(&run);
        checker.check()?;
        assert_eq!(checker.warnings.len(), 1);
        assert!(checker.warnings[0].starts_with("More than one user logged in: alice, bob"));
        Ok(())
    }

    #[test]
    fn empty_input_only_warns() -> anyhow::Result<()> {
        let dir = TempDir::new("casebench")?;
        let run = run_info(&dir)?;
        std::fs::remove_file(run.profile.input.join("case1"))?;
        let mut checker = PreRunChecker::new(&run);
        checker.check()?;
        assert!(checker.warnings.iter().any(|w| w.starts_with("No test cases")));
        Ok(())
    }
}
