use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;

use crate::{
    config::HarnessConfig,
    meta::{CaseStatus, RunInfo, RUN_INFO_FILE},
    utils::md::MarkdownPrinter,
};

pub(crate) mod data;

/// Summarize the timings of a harness run
#[derive(Parser)]
pub struct ReportArgs {
    /// The run id to report. Default to the latest run.
    pub run_id: Option<String>,
    /// Root directory of run logs. Default to the one of the selected profile.
    #[arg(long)]
    pub logs_dir: Option<PathBuf>,
    #[arg(long, default_value = "default")]
    /// Harness profile
    pub profile: String,
    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn format_time(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "N/A".to_owned(),
    }
}

impl ReportArgs {
    fn find_log_dir(&self) -> anyhow::Result<PathBuf> {
        let logs_dir = match &self.logs_dir {
            Some(dir) => dir.clone(),
            None => {
                HarnessConfig::load(self.config.as_deref())?
                    .profile(&self.profile)?
                    .logs
            }
        };
        let log_dir = logs_dir.join(self.run_id.as_deref().unwrap_or("latest"));
        if !log_dir.exists() {
            anyhow::bail!("Log dir not found: {}", log_dir.display());
        }
        Ok(log_dir)
    }

    fn render(&self, run: &RunInfo) -> MarkdownPrinter {
        let summary = data::summarize(&run.cases);
        let mut printer = MarkdownPrinter::new();
        printer.add(format!("# [{}] Run Summary\n\n", run.runid));
        printer.add(format!("* Solver: `{}`\n", run.profile.solver.display()));
        printer.add(format!(
            "* Start Time (UTC): `{}`\n",
            format_time(run.start_timestamp_utc)
        ));
        match run.finish_timestamp_utc {
            Some(t) => printer.add(format!("* Finish Time (UTC): `{}`\n", format_time(t))),
            None => printer.add("* Finish Time (UTC): `N/A` (unfinished)\n"),
        }
        printer.add(format!("* Host: `{}`\n", run.system.host));
        printer.add(format!("* OS: `{}`\n", run.system.os));
        printer.add(format!("* CPU: `{}`\n", run.system.cpu_model));
        printer.add(format!("* Memory: `{} GB`\n", run.system.memory_size >> 30));
        printer.add("\n## Test Cases\n\n");
        printer.add_table(
            &["case", "status", "time (s)", "exit code"],
            run.cases.iter().map(|r| {
                vec![
                    r.case.clone(),
                    match r.status {
                        CaseStatus::Completed => "completed".to_owned(),
                        CaseStatus::Hung => "**hung**".to_owned(),
                    },
                    format!("{:.3}", r.time),
                    r.exit_code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".to_owned()),
                ]
            }),
        );
        printer.add("\n## Summary\n\n");
        printer.add(format!("* Completed: `{}`\n", summary.completed));
        printer.add(format!("* Hung: `{}`\n", summary.hung));
        printer.add(format!("* Non-zero exit: `{}`\n", summary.nonzero_exit));
        printer.add(format!("* Total time: `{:.3}s`\n", summary.total));
        if let Some(mean) = summary.mean {
            printer.add(format!("* Mean time: `{:.3}s`\n", mean));
        }
        if let Some((case, time)) = &summary.slowest {
            printer.add(format!("* Slowest: `{}` (`{:.3}s`)\n", case, time));
        }
        printer
    }

    pub fn run(&self) -> anyhow::Result<()> {
        let log_dir = self.find_log_dir()?;
        let run = RunInfo::load(&log_dir.join(RUN_INFO_FILE))?;
        self.render(&run).dump();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::{config::Profile, meta::CaseRecord};

    fn record(case: &str, status: CaseStatus, time: f64, exit_code: Option<i32>) -> CaseRecord {
        CaseRecord {
            case: case.to_owned(),
            status,
            time,
            exit_code,
        }
    }

    #[test]
    fn report_lists_cases_and_totals() {
        let args = ReportArgs::parse_from(["report"]);
        let mut run = RunInfo::new(Profile::default(), "default-host-1".to_owned(), Local::now());
        run.cases = vec![
            record("case1", CaseStatus::Completed, 1.5, Some(0)),
            record("case2", CaseStatus::Hung, 2.0, None),
            record("case3", CaseStatus::Completed, 0.5, Some(3)),
        ];
        let printer = args.render(&run);
        let content = printer.content();
        assert!(content.starts_with("# [default-host-1] Run Summary\n"));
        assert!(content.contains("* Finish Time (UTC): `N/A` (unfinished)\n"));
        assert!(content.contains("|case|status|time (s)|exit code|\n"));
        assert!(content.contains("|case1|completed|1.500|0|\n"));
        assert!(content.contains("|case2|**hung**|2.000|-|\n"));
        assert!(content.contains("|case3|completed|0.500|3|\n"));
        assert!(content.contains("* Completed: `2`\n"));
        assert!(content.contains("* Hung: `1`\n"));
        assert!(content.contains("* Non-zero exit: `1`\n"));
        assert!(content.contains("* Total time: `2.000s`\n"));
        assert!(content.contains("* Mean time: `1.000s`\n"));
        assert!(content.contains("* Slowest: `case1` (`1.500s`)\n"));
    }

    #[test]
    fn finished_run_has_a_finish_time() {
        let args = ReportArgs::parse_from(["report"]);
        let mut run = RunInfo::new(Profile::default(), "default-host-2".to_owned(), Local::now());
        run.finish_timestamp_utc = Some(0);
        let printer = args.render(&run);
        let content = printer.content();
        assert!(content.contains("* Finish Time (UTC): `1970-01-01 00:00:00`\n"));
        assert!(!content.contains("unfinished"));
        assert!(!content.contains("Mean time"));
    }
}
