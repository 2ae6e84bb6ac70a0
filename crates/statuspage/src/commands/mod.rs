//! Command handlers: bridge CLI args -> core provider -> output formatting.

pub mod component;
pub mod config_cmd;
pub mod group;

use statuspage_core::{Provider, ResourceData};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

// ── Shared lifecycle helpers ─────────────────────────────────────────

pub(crate) async fn exists(
    provider: &Provider,
    type_name: &str,
    state: &ResourceData,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let found = provider.exists(type_name, state).await?;
    output::print_output(&found.to_string(), global.quiet);
    Ok(())
}

pub(crate) async fn get(
    provider: &Provider,
    type_name: &str,
    state: &ResourceData,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let state = provider.read(type_name, state).await?;
    print_state(&state, global)
}

/// Read the object at its current address, then apply the declaration.
///
/// A declared page that differs from the address page is refused as a
/// force-new change before any write.
pub(crate) async fn update(
    provider: &Provider,
    type_name: &str,
    address: &ResourceData,
    config: &ResourceData,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let prior = provider.read(type_name, address).await?;
    let state = provider.update(type_name, &prior, config).await?;
    print_state(&state, global)
}

pub(crate) async fn delete(
    provider: &Provider,
    type_name: &str,
    state: &ResourceData,
    label: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    provider.delete(type_name, state).await?;
    if !global.quiet {
        eprintln!("{label} deleted");
    }
    Ok(())
}

pub(crate) fn print_state(state: &ResourceData, global: &GlobalOpts) -> Result<(), CliError> {
    let rendered = output::render_state(global.output, state)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
