use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use phpgen_manifest::SnippetFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the snippet (defaults to ./snippet.toml)
    #[arg(short, long, default_value = "snippet.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let file = SnippetFile::open(&self.config).unwrap_or_exit();
        let report = ops::check(&file).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
