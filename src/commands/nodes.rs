use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::graph::nodes;

/// Insert the node list of a test case after its `n m` line
#[derive(Parser)]
pub struct NodesArgs {
    /// Input test case
    pub input: PathBuf,
    /// Output file. May be the input itself.
    pub output: PathBuf,
}

impl NodesArgs {
    pub fn run(&self) -> anyhow::Result<()> {
        let count = nodes::transform_file(&self.input, &self.output)
            .with_context(|| format!("Failed to transform {}", self.input.display()))?;
        log::info!(
            "{} -> {}: {} nodes",
            self.input.display(),
            self.output.display(),
            count
        );
        Ok(())
    }
}
