mod cli;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::Cli;

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let succeeded = cli.execute(config, &mut std::io::stdout().lock())?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
