//! Graph test case preparation and a timing harness for external solvers.
//!
//! The `casebench` binary exposes three batch jobs that compose through files on disk:
//!
//! * `dedup`: collapse duplicate undirected edges of every `case*` file, in place.
//! * `nodes`: insert the node list of a test case after its `n m` line.
//! * `run`: feed every test case to the solver, capture its output, and append the run time.
//!
//! `report` prints a summary of a previous `run`.

use clap::{Parser, Subcommand};

#[macro_use]
mod utils;
mod commands;
mod config;
mod meta;

pub mod graph;

/// Graph test case tools and solver timing harness
#[derive(Parser)]
#[command(name = "casebench", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Dedup(commands::dedup::DedupArgs),
    Nodes(commands::nodes::NodesArgs),
    Run(commands::run::RunArgs),
    Report(commands::report::ReportArgs),
}

#[doc(hidden)]
pub fn entry(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Dedup(cmd) => cmd.run(),
        Commands::Nodes(cmd) => cmd.run(),
        Commands::Run(cmd) => cmd.run(),
        Commands::Report(cmd) => cmd.run(),
    }
}
