//! Command dispatch: turns parsed arguments into service calls

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{AnalysisReport, AnalysisService, LoadReport};
use crate::application::ApplicationResult;
use crate::cli::args::{Cli, Commands, ConfigCommands, SettingsArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{RawSettings, Settings, DEFAULT_PROFILE, DISPLAY_CONFIG_PATH};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli, services: &ServiceContainer) -> CliResult<()> {
    if cli.version {
        println!("a2i version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match &cli.command {
        Some(Commands::Config { command }) => execute_config(command, services),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => match &cli.input {
            Some(input) => cmd_analyze(input, &cli.profile, &cli.settings, services),
            None => cmd_help(),
        },
    }
}

fn execute_config(command: &ConfigCommands, services: &ServiceContainer) -> CliResult<()> {
    match command {
        ConfigCommands::Write { name, settings } => cmd_config_write(name, settings, services),
        ConfigCommands::Rename { old, new } => cmd_config_rename(old, new, services),
        ConfigCommands::ResetDefault => cmd_config_reset_default(services),
        ConfigCommands::Show { name } => cmd_config_show(name, services),
        ConfigCommands::Path => cmd_config_path(services),
    }
}

fn cmd_help() -> CliResult<()> {
    Cli::command()
        .print_help()
        .map_err(|e| InfraError::io("print help", e))?;
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

/// Load a profile and print its warnings.
fn load_profile(services: &ServiceContainer, name: &str) -> ApplicationResult<Settings> {
    let LoadReport { settings, warnings } = services.profiles.load(name)?;
    for warning in &warnings {
        output::warning(warning);
    }
    Ok(settings)
}

/// Profile, then environment, then command line flags.
fn resolve_settings(
    services: &ServiceContainer,
    profile: &str,
    args: &SettingsArgs,
) -> CliResult<Settings> {
    let settings = load_profile(services, profile)?
        .apply_env_overrides()?
        .merge_with(&RawSettings::from(args));
    settings.validate()?;
    debug!(?settings, "resolved");
    Ok(settings)
}

#[instrument(skip(args, services))]
fn cmd_analyze(
    input: &str,
    profile: &str,
    args: &SettingsArgs,
    services: &ServiceContainer,
) -> CliResult<()> {
    let path = Path::new(input);
    if !AnalysisService::is_audio_path(path) {
        return Err(CliError::UnknownCommand(input.to_string()));
    }

    let settings = resolve_settings(services, profile, args)?;
    let report = services.analysis.analyze(path, &settings)?;
    print_report(&report, &settings);
    Ok(())
}

fn print_report(report: &AnalysisReport, settings: &Settings) {
    output::header(&report.path.display());
    output::field(
        "format",
        &format!("{} Hz, {} channel(s)", report.sample_rate, report.channels),
    );
    output::field("duration", &format!("{:.2}s", report.duration_secs));
    output::field(
        "frame",
        &format!("{} samples, {} window", settings.frame_size, settings.window),
    );
    output::field("frames", &report.frames);
    match report.peak {
        Some(peak) => output::field(
            "peak",
            &format!("{:.1} Hz at {:.1} dB", peak.frequency, peak.level),
        ),
        None => output::field("peak", "none (file shorter than one frame)"),
    }
}

#[instrument(skip(args, services))]
fn cmd_config_write(name: &str, args: &SettingsArgs, services: &ServiceContainer) -> CliResult<()> {
    let settings = resolve_settings(services, DEFAULT_PROFILE, args)?;
    services.profiles.write_profile(name, &settings)?;
    output::success(&format!(
        "Configuration '{name}' successfully saved in {DISPLAY_CONFIG_PATH}"
    ));
    Ok(())
}

#[instrument(skip(services))]
fn cmd_config_rename(old: &str, new: &str, services: &ServiceContainer) -> CliResult<()> {
    if old == new {
        return Err(CliError::InvalidArgs(format!("'{old}' is already named '{new}'")));
    }
    services.profiles.rename_profile(old, new)?;
    output::success(&format!("Configuration '{old}' renamed to '{new}'"));
    Ok(())
}

#[instrument(skip(services))]
fn cmd_config_reset_default(services: &ServiceContainer) -> CliResult<()> {
    // reading first surfaces a missing or broken file; neither blocks the reset
    if let Err(e) = load_profile(services, DEFAULT_PROFILE) {
        output::warning(&e);
    }
    services.profiles.reset_default()?;
    output::success(&format!(
        "Default configuration successfully saved in {DISPLAY_CONFIG_PATH}"
    ));
    Ok(())
}

#[instrument(skip(services))]
fn cmd_config_show(name: &str, services: &ServiceContainer) -> CliResult<()> {
    let settings = load_profile(services, name)?;
    output::info(&settings.to_json()?);
    Ok(())
}

fn cmd_config_path(services: &ServiceContainer) -> CliResult<()> {
    let path = services.profiles.config_path();
    output::info(&path.display());
    if !services.fs.exists(path) {
        output::warning(&format!(
            "{} does not exist, run 'a2i config reset-default'",
            path.display()
        ));
    }
    let names = services.profiles.profile_names()?;
    if !names.is_empty() {
        output::field("profiles", &names.join(", "));
    }
    Ok(())
}
