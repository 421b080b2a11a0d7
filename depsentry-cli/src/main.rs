use clap::Parser;
use colored::Colorize;

use depsentry_cli::cli::{Cli, Commands};
use depsentry_cli::commands;
use depsentry_cli::error::CliError;
use depsentry_cli::logging;
use depsentry_cli::output::OutputWriter;
use depsentry_core::config::{DepsentryConfig, GeneralConfig};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    // 설정 파일이 깨져 있어도 `config validate`는 리포트를 출력해야 함
    let loaded = DepsentryConfig::load_or_default(&cli.config).await;

    let mut general = match &loaded {
        Ok(config) => config.general.clone(),
        Err(_) => GeneralConfig::default(),
    };
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    logging::init_tracing(&general)?;

    tracing::debug!(config = %cli.config.display(), "depsentry starting");
    depsentry_core::metrics::describe_all();

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
        Commands::Extract(args) => commands::extract::execute(args, &loaded?, &writer).await,
        Commands::Scan(args) => commands::scan::execute(args, &loaded?, &writer).await,
    }
}
