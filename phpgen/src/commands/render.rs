use std::path::PathBuf;

use clap::{Args, ValueEnum};
use eyre::{Context, Result};
use phpgen_manifest::SnippetFile;

use super::UnwrapOrExit;
use crate::ops;

/// How rendered lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Lines joined with the snippet's line ending
    #[default]
    Text,
    /// A JSON array of lines
    Json,
}

#[derive(Args)]
pub struct RenderCommand {
    /// Path to the snippet (defaults to ./snippet.toml)
    #[arg(short, long, default_value = "snippet.toml")]
    pub config: PathBuf,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl RenderCommand {
    /// Run the render command
    pub fn run(&self) -> Result<()> {
        let file = SnippetFile::open(&self.config).unwrap_or_exit();
        let rendered = ops::render(&file).unwrap_or_exit();
        let rendered = match self.format {
            OutputFormat::Text => rendered.text(),
            OutputFormat::Json => rendered.json().wrap_err("Failed to encode lines")?,
        };

        match &self.output {
            Some(path) => std::fs::write(path, rendered)
                .wrap_err_with(|| format!("Failed to write {}", path.display())),
            None => {
                print!("{}", rendered);
                Ok(())
            }
        }
    }
}
