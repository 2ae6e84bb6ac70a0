//! Config subcommand handlers. None of these touch the network.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::active_path(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show { show_key } => {
            let settings = config::effective_settings(global)?;
            let rendered = statuspage_config::to_toml(&settings, show_key)?;
            output::print_output(rendered.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::active_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let settings = config::effective_settings(global)?;
            statuspage_config::save_settings(&settings, &path)?;
            tracing::info!(path = %path.display(), "wrote config file");
            if !global.quiet {
                eprintln!("Config written to {}", path.display());
            }
            Ok(())
        }
    }
}
