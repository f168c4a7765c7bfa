//! Sitecraft CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use sitecraft_cli::logging::{LogConfig, LogFormat, init_logging};
use sitecraft_cli::settings::Settings;
use sitecraft_cli::studio::Studio;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod output;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_checkout, run_features, run_nav, run_patch, run_reset, run_set, run_settings, run_show,
    run_styles,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let settings_path = cli.settings.clone().unwrap_or_else(Settings::config_path);
    let settings = settings_from_cli(&cli, Settings::load_from(&settings_path));

    if let Command::Settings(args) = &cli.command {
        return run_settings(&settings, &settings_path, args.write);
    }

    let mut studio = Studio::open(&settings)?;
    match cli.command {
        Command::Show(args) => run_show(&studio, args.json),
        Command::Set(args) => run_set(&mut studio, &args.path, &args.value),
        Command::Patch(args) => run_patch(&mut studio, &args.json),
        Command::Reset => run_reset(&mut studio),
        Command::Styles(args) => run_styles(&studio, args.json, args.prefix.as_deref()),
        Command::Features(args) => run_features(&studio, args.tier.map(Into::into), args.missing),
        Command::Nav(args) => run_nav(&studio, args.tier.map(Into::into), args.hero, args.json),
        Command::Checkout(args) => run_checkout(&studio, &args.success_url, &args.cancel_url),
        Command::Settings(_) => Ok(()),
    }
}

/// Command-line flags take precedence over the settings file.
fn settings_from_cli(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(dir) = &cli.storage_dir {
        settings.storage.dir = Some(dir.clone());
    }
    if let Some(debounce_ms) = cli.debounce_ms {
        settings.styles.debounce_ms = debounce_ms;
    }
    if let Some(catalog) = &cli.catalog {
        settings.content.catalog = Some(catalog.clone());
    }
    settings
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level_filter(cli.verbosity.tracing_level_filter())
        .with_format(format)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
