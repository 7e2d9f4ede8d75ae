use clap::Parser;
use warmpool::adapter::inbound::cli::command::{CheckCommand, Cli, ColorChoice, Commands};
use warmpool::adapter::inbound::cli::output::{self, OutputConfig};
use warmpool::adapter::inbound::cli::{check, complete, operator, run, status};
use warmpool::error::Result;
use warmpool::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    let _ = operator::install(Box::new(Operator));

    if let Err(e) = dispatch(cli.command).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Status(args) => status::execute(&args),
        Commands::Check(CheckCommand::Config(args)) => check::config(&args.config),
        Commands::Complete(args) => complete::execute(&args).await,
    }
}
