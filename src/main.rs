mod alerts;
mod calibration;
mod cli;
mod cli_help;
mod error;
mod profile;
mod report_helpers;
mod risk;
mod sites;
mod window;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};

use cli::{Cli, Commands};
use profile::ProfileRegistry;

/// Built-in profiles, or the ones from `--profiles-file` when given.
fn load_registry(path: Option<&std::path::Path>) -> Result<ProfileRegistry, Box<dyn Error>> {
    let Some(path) = path else {
        return Ok(ProfileRegistry::builtin());
    };
    let loaded = profile::config::load(path)?;
    if loaded.registry.is_empty() {
        log::warn!("{}: no usable profiles, every observation will be rejected", path.display());
    }
    Ok(loaded.registry)
}

fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "fl", &mut io::stdout());
        return Ok(());
    }

    let registry = load_registry(cli.profiles_file.as_deref())?;

    match cli.command {
        Commands::Evaluate { pairs, json } => risk::run(&registry, &pairs, json),
        Commands::Profiles { json } => {
            if json {
                profile::print_json(&registry)
            } else {
                profile::print_report(&registry);
                Ok(())
            }
        }
        Commands::Calibrate { json } => calibration::run(&registry, json),
        Commands::Batch {
            path,
            json,
            top,
            min_base_risk,
            output,
        } => sites::run(&registry, &path, json, top, min_base_risk, output.as_deref()),
        Commands::Diff {
            before,
            after,
            json,
            no_upgrades,
            no_downgrades,
        } => {
            let policy = alerts::AlertPolicy {
                on_upgrades: !no_upgrades,
                on_downgrades: !no_downgrades,
            };
            alerts::run(&before, &after, json, policy)
        }
        Commands::Window {
            path,
            start,
            hours,
            json,
        } => window::run(&registry, &path, start, hours, json),
        Commands::Completions { .. } => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(err) = dispatch(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
