mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use statuspage_core::Provider;

use crate::cli::{Cli, Command, LogFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose, cli.global.log_format);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8, format: LogFormat) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands: no API access
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "statuspage", &mut std::io::stdout());
            Ok(())
        }

        Command::Schema => {
            let rendered = output::render_schema(cli.global.output, &Provider::describe())?;
            output::print_output(&rendered, cli.global.quiet);
            Ok(())
        }

        // Everything else builds and validates the provider first
        cmd => {
            let provider_config = config::provider_config(&cli.global)?;
            let provider = Provider::configure(&provider_config).await?;

            tracing::debug!(command = ?cmd, "dispatching command");
            match cmd {
                Command::Validate => {
                    if !cli.global.quiet {
                        eprintln!("Credentials valid for {}", provider.client().base_url());
                    }
                    Ok(())
                }
                Command::Component(args) => {
                    commands::component::handle(&provider, args, &cli.global).await
                }
                Command::Group(args) => commands::group::handle(&provider, args, &cli.global).await,
                Command::Config(_) | Command::Completions(_) | Command::Schema => Ok(()),
            }
        }
    }
}
