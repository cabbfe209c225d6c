#![allow(unused)]

use std::path::{Path, PathBuf};

use clap::Parser;
use tempdir::TempDir;

/// A scratch directory holding test cases, outputs, logs and a config file.
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new("casebench")?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn join(&self, path: impl AsRef<str>) -> String {
        self.path()
            .join(path.as_ref())
            .to_str()
            .unwrap()
            .to_owned()
    }

    pub fn file(&self, path: impl AsRef<str>, content: impl AsRef<str>) -> anyhow::Result<()> {
        let full_path = self.path().join(path.as_ref());
        std::fs::create_dir_all(full_path.parent().unwrap())?;
        std::fs::write(full_path, content.as_ref())?;
        Ok(())
    }

    pub fn read(&self, path: impl AsRef<str>) -> anyhow::Result<String> {
        Ok(std::fs::read_to_string(self.path().join(path.as_ref()))?)
    }

    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        self.path().join(path.as_ref()).exists()
    }

    /// Run `casebench <args>` in-process.
    pub fn casebench(&self, args: &[&str]) -> anyhow::Result<()> {
        let mut cmd_args = vec!["casebench"];
        cmd_args.extend_from_slice(args);
        casebench::entry(&casebench::Cli::parse_from(cmd_args))
    }

    /// Write a `default` profile running `sh -c <script>` over `testdata/`.
    pub fn shell_solver_config(&self, script: &str, extra: &str) -> anyhow::Result<String> {
        let config = format!(
            r#"
            [profiles.default]
            solver = "/bin/sh"
            args = ["-c", {script:?}]
            input = {input:?}
            output = {output:?}
            logs = {logs:?}
            {extra}
            "#,
            input = self.join("testdata"),
            output = self.join("greedy_output"),
            logs = self.join("logs"),
        );
        self.file("casebench.toml", config)?;
        Ok(self.join("casebench.toml"))
    }

    /// `casebench run` with the workspace config.
    pub fn harness_run(&self, args: &[&str]) -> anyhow::Result<()> {
        let config = self.join("casebench.toml");
        let mut cmd_args = vec!["run", "--config", &config];
        cmd_args.extend_from_slice(args);
        self.casebench(&cmd_args)
    }

    /// The summary of the latest run.
    pub fn run_info(&self) -> anyhow::Result<toml::Table> {
        Ok(toml::from_str(&self.read("logs/latest/run.toml")?)?)
    }

    /// Execution records of the latest run, keyed by test case name.
    pub fn case_records(&self) -> anyhow::Result<Vec<toml::Table>> {
        let info = self.run_info()?;
        let cases = info
            .get("cases")
            .and_then(|c| c.as_array())
            .cloned()
            .unwrap_or_default();
        Ok(cases
            .into_iter()
            .filter_map(|c| c.as_table().cloned())
            .collect())
    }
}

/// Split a captured output into the solver's own output and the footer time.
pub fn split_footer(output: &str) -> (&str, f64) {
    let body = output.strip_suffix('\n').unwrap();
    let (head, last) = match body.rfind('\n') {
        Some(i) => (&output[..i + 1], &body[i + 1..]),
        None => ("", body),
    };
    let time = last
        .strip_prefix("Time: ")
        .unwrap_or_else(|| panic!("no footer in {:?}", output));
    (head, time.parse().unwrap())
}
