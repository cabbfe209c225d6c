use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use crate::graph::edges;

/// Collapse duplicate undirected edges of every test case, rewriting the files in place
#[derive(Parser)]
pub struct DedupArgs {
    /// Test case directory
    #[arg(default_value = "testdata")]
    pub dir: PathBuf,
    /// Only files whose name starts with this prefix are rewritten
    #[arg(long, default_value = "case")]
    pub prefix: String,
    /// Report edge counts without rewriting any file
    #[arg(long, default_value = "false")]
    pub dry_run: bool,
}

impl DedupArgs {
    fn collect_cases(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut cases = Vec::new();
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read {}", self.dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let is_case = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&self.prefix));
            if is_case && entry.file_type()?.is_file() {
                cases.push(entry.path());
            }
        }
        cases.sort();
        Ok(cases)
    }

    /// Normalize all matching test cases. The first malformed file aborts the batch.
    pub fn run(&self) -> anyhow::Result<()> {
        let cases = self.collect_cases()?;
        if cases.is_empty() {
            log::warn!(
                "No `{}*` test cases found in {}",
                self.prefix,
                self.dir.display()
            );
        }
        for path in &cases {
            let case = edges::normalize_file(path, self.dry_run)
                .with_context(|| format!("Failed to normalize {}", path.display()))?;
            let (declared, distinct) = (case.declared.edges, case.edges.len());
            log::info!(
                "{}: {} -> {} edges",
                path.display(),
                declared,
                distinct
            );
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if declared == distinct {
                println!("{} {}", name.blue().bold(), "unchanged".green());
            } else {
                println!(
                    "{} {}",
                    name.blue().bold(),
                    format!("{} duplicate edges removed", declared - distinct).yellow()
                );
            }
        }
        if self.dry_run {
            println!("\n{}", "Dry run: no files were modified.".italic());
        }
        Ok(())
    }
}
