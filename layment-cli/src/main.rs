use anyhow::Result;
use clap::Parser;
use log::{error, info};

use layment_cli::io;
use layment_cli::io::cli::{Cli, Task};
use layment_cli::tasks;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let cfg = tasks::load_config(args.config_file.as_deref())?;
    let catalog = tasks::load_catalog(&args.manifest)?;
    info!(
        "[MAIN] catalog loaded: {} item(s), {} enabled",
        catalog.len(),
        catalog.enabled().count()
    );

    match args.task {
        Task::Validate { workspace, svg } => {
            let mut session = tasks::open_session(catalog, cfg, &workspace)?;
            let output = tasks::validate(&mut session, svg.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            if !output.valid {
                error!("[MAIN] {}", output.message);
                std::process::exit(1);
            }
        }
        Task::Export {
            workspace,
            output,
            svg,
        } => {
            let mut session = tasks::open_session(catalog, cfg, &workspace)?;
            tasks::export(&mut session, &output, svg.as_deref())?;
        }
        Task::Normalize { workspace, output } => {
            let mut session = tasks::open_session(catalog, cfg, &workspace)?;
            tasks::normalize(&mut session, &output)?;
        }
    }
    Ok(())
}
