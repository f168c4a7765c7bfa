//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use sitecraft_cli::settings::MAX_DEBOUNCE_MS;
use sitecraft_config::HeroType;
use sitecraft_tier::Tier;

#[derive(Parser)]
#[command(
    name = "sitecraft",
    version,
    about = "Sitecraft - inspect and edit a site's configuration and derived styles",
    long_about = "Inspect and edit a site's persisted configuration.\n\n\
                  Every change is written through to storage and applied to the\n\
                  style surface, which can be printed with `sitecraft styles`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "compact",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file (default: platform config directory).
    #[arg(long = "settings", value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Directory holding the persisted configuration.
    #[arg(long = "storage-dir", value_name = "DIR", global = true)]
    pub storage_dir: Option<PathBuf>,

    /// Style debounce window in milliseconds (at most 10000).
    #[arg(
        long = "debounce-ms",
        value_name = "MS",
        global = true,
        value_parser = clap::value_parser!(u64).range(0..=MAX_DEBOUNCE_MS)
    )]
    pub debounce_ms: Option<u64>,

    /// JSON content catalog for navigation dropdowns.
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the current configuration.
    Show(OutputArgs),

    /// Set one value by its dotted path, e.g. `style.package modern`.
    Set(SetArgs),

    /// Replace whole sections from a JSON object.
    Patch(PatchArgs),

    /// Restore the default configuration and clear stored state.
    Reset,

    /// Print the style variables derived from the configuration.
    Styles(StylesArgs),

    /// List the features included in a tier.
    Features(FeaturesArgs),

    /// Print the navigation derived from the configuration.
    Nav(NavArgs),

    /// Print the checkout request body for the current configuration.
    Checkout(CheckoutArgs),

    /// Print the effective settings.
    Settings(SettingsArgs),
}

#[derive(Args)]
pub struct OutputArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SetArgs {
    /// Dotted camelCase path, e.g. `theme.colorScheme`.
    #[arg(value_name = "PATH")]
    pub path: String,

    /// JSON value. Anything that is not valid JSON is taken as a string.
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Args)]
pub struct PatchArgs {
    /// JSON object of sections, e.g. `{"hero": {"type": "video"}}`.
    #[arg(value_name = "JSON")]
    pub json: String,
}

#[derive(Args)]
pub struct StylesArgs {
    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Only show variables starting with this prefix, e.g. `--radius-`.
    #[arg(long, value_name = "PREFIX", allow_hyphen_values = true)]
    pub prefix: Option<String>,
}

#[derive(Args)]
pub struct FeaturesArgs {
    /// Tier to list (default: the tier implied by the site mode).
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,

    /// Only list features the tier lacks.
    #[arg(long)]
    pub missing: bool,
}

#[derive(Args)]
pub struct NavArgs {
    /// Preview a tier instead of the one implied by the site mode.
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,

    /// Preview a hero type instead of the configured one.
    #[arg(long, value_name = "TYPE")]
    pub hero: Option<HeroType>,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CheckoutArgs {
    #[arg(long = "success-url", value_name = "URL")]
    pub success_url: String,

    #[arg(long = "cancel-url", value_name = "URL")]
    pub cancel_url: String,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Write the effective settings to the settings file.
    #[arg(long)]
    pub write: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_flag_is_bounded() {
        let cli = Cli::try_parse_from(["sitecraft", "--debounce-ms", "250", "show"]).unwrap();
        assert_eq!(cli.debounce_ms, Some(250));

        let too_long = Cli::try_parse_from(["sitecraft", "--debounce-ms", "10001", "show"]);
        assert!(too_long.is_err());
    }
}

/// CLI tier choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum TierArg {
    Starter,
    Professional,
    Premium,
}

impl From<TierArg> for Tier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::Starter => Tier::Starter,
            TierArg::Professional => Tier::Professional,
            TierArg::Premium => Tier::Premium,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
