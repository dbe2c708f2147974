pub mod config;
pub mod page;
pub mod truncate;

use clap::{Parser, Subcommand};
use sm_domain::config::{Config, ShowMoreConfig};
use sm_domain::{Mode, TruncationConfig};

use self::page::Action;

/// showmore: preview show-more truncation of metadata values.
#[derive(Debug, Parser)]
#[command(name = "showmore", version, about)]
pub struct Cli {
    /// Log every classification and toggle to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the collapsed rendering of a single value.
    Truncate {
        /// The value to truncate.
        text: String,
        /// `words` or `characters` (defaults to the configured mode).
        #[arg(long)]
        mode: Option<Mode>,
        /// Budget in the chosen unit; 0 disables truncation.
        #[arg(long)]
        limit: Option<usize>,
        /// Treat the value as a markup fragment even if it has no tags.
        #[arg(long)]
        markup: bool,
    },
    /// Run a page pass over a JSON list of `{label, value}` fields.
    Page {
        /// Path to the fields file.
        fields: String,
        /// Replay control activations in order: `toggle:<n>` or `expand-all`.
        #[arg(long = "action")]
        actions: Vec<Action>,
        /// Print the page report as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },
    /// Print the default stylesheet.
    Css,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any issues.
    Validate,
    /// Dump the configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `SM_CONFIG` (or
/// `showmore.toml` by default). Returns the parsed [`Config`] and the
/// path that was used.
pub fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path = std::env::var("SM_CONFIG").unwrap_or_else(|_| "showmore.toml".into());
    let config = Config::load_or_default(std::path::Path::new(&config_path))
        .map_err(|e| anyhow::anyhow!("loading {config_path}: {e}"))?;
    Ok((config, config_path))
}

/// Settings for the engine. A site without a configured mode gets no
/// truncation at all.
pub fn site_config(config: &Config) -> ShowMoreConfig {
    config.resolve().unwrap_or_else(|| {
        tracing::info!("no show_more mode configured, truncation disabled");
        let mut inactive = ShowMoreConfig::new(TruncationConfig::words(0));
        inactive.labels = config.show_more.labels.clone();
        inactive
    })
}
