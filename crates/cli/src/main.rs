use clap::Parser;
use tracing_subscriber::EnvFilter;

use sm_cli::cli::{self, Cli, Command, ConfigCommand};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_cli_tracing(args.verbose);

    match args.command {
        Command::Truncate {
            text,
            mode,
            limit,
            markup,
        } => {
            let (config, _) = cli::load_config()?;
            cli::truncate::run(&config, &text, mode, limit, markup)
        }
        Command::Page {
            fields,
            actions,
            json,
        } => {
            let (config, _) = cli::load_config()?;
            let site = cli::site_config(&config);
            cli::page::run(&site, &fields, &actions, json)
        }
        Command::Css => {
            print!("{}", sm_toggle::STYLESHEET);
            Ok(())
        }
        Command::Config(ConfigCommand::Validate) => {
            let (config, config_path) = cli::load_config()?;
            if !cli::config::validate(&config, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            let (config, _config_path) = cli::load_config()?;
            cli::config::show(&config)
        }
        Command::Version => {
            println!("showmore {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Filter used when `RUST_LOG` is unset. `--verbose` opens up the engine
/// crates so every classification, truncation and toggle is traced.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,sm_truncate=debug,sm_toggle=debug,sm_domain=debug"
    } else {
        "warn"
    }
}

/// Compact stderr-only tracing; stdout carries the rendered output.
fn init_cli_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbose)
        .compact()
        .init();
}
