use clap::Parser;

use riftbet::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use riftbet::adapter::inbound::cli::output::{self, OutputConfig};
use riftbet::adapter::inbound::cli::{config, operator, pending, settle, summary};
use riftbet::error::Result;
use riftbet::infrastructure::operator::entry::Operator;
use riftbet::port::inbound::operator::config::LogOverrides;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        cli.color.enabled(),
    ));
    operator::set_log_overrides(LogOverrides {
        level: cli.log_level.clone(),
        json: cli.json_logs,
        verbose: cli.verbose,
    });
    if operator::install(Box::new(Operator::new())).is_err() {
        output::error("operator already installed");
        std::process::exit(1);
    }

    if let Err(e) = dispatch(cli.command) {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Settle(args) => settle::execute(&args.config, args.dry_run),
        Commands::Pending(args) => pending::execute(&args.config),
        Commands::Summary(args) => summary::execute(&args.config),
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
