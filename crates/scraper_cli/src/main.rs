use std::process::ExitCode;

use clap::Parser;
use scraper_cli::cli::{Cli, Command};
use scraper_cli::config::ScraperConfig;
use scraper_cli::render::render_filters;
use scraper_cli::run;
use scraper_logging::scraper_error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    scraper_logging::initialize(cli.log_destination(), cli.log_level(), &cli.log_file);

    match execute(cli).await {
        Ok(code) => code,
        Err(err) => {
            scraper_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn execute(cli: Cli) -> anyhow::Result<ExitCode> {
    let (config_path, explicit) = cli.config_path();
    let config = ScraperConfig::load(&config_path, explicit)?
        .with_overrides(cli.base_url.clone(), cli.poll_interval_ms);

    let outcome = match &cli.command {
        Command::Scrape(args) => run::scrape(&config, args).await?,
        Command::Watch { task_id, output } => run::watch(&config, task_id, output.clone()).await?,
        Command::DownloadUrl { task_id } => {
            println!("{}", run::download_url(&config, task_id)?);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Filters => {
            for line in render_filters() {
                println!("{line}");
            }
            return Ok(ExitCode::SUCCESS);
        }
    };
    Ok(outcome.exit_code())
}
