use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Catalog manifest the workspace refers to
    #[arg(short, long, value_name = "FILE")]
    pub manifest: PathBuf,
    #[arg(short, long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
    #[arg(
        short,
        long,
        value_name = "[off, error, warn, info, debug, trace]",
        default_value = "info"
    )]
    pub log_level: LevelFilter,
    #[command(subcommand)]
    pub task: Task,
}

#[derive(Subcommand, Debug)]
pub enum Task {
    /// Checks whether a workspace can be produced
    Validate {
        #[arg(short, long, value_name = "FILE")]
        workspace: PathBuf,
        /// Writes a preview with the offending entities highlighted
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
    /// Validates a workspace and writes its order document
    Export {
        #[arg(short, long, value_name = "FILE")]
        workspace: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
    /// Rewrites a workspace in the current schema, dropping whatever cannot be restored
    Normalize {
        #[arg(short, long, value_name = "FILE")]
        workspace: PathBuf,
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
}
