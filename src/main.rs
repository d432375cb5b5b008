mod cli;
mod commands;
mod config;
mod project;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use config::{FileConfig, Overrides, Settings};
use std::io;

/// Global context for the application
pub struct Context {
    pub verbose: u8,
    pub quiet: bool,
    pub settings: Settings,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Status lines go through log at info level, so info is the floor
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    let file = FileConfig::load(cli.config.as_deref())?;
    let settings = Settings::resolve(
        file,
        Overrides {
            cluster: cli.cluster_override(),
            dry_run: cli.dry_run,
        },
    );
    log::debug!("Resolved settings: {settings:?}");

    let ctx = Context {
        verbose: cli.verbose,
        quiet: cli.quiet,
        settings,
    };

    match cli.command {
        Command::Deploy(cmd) => commands::deploy::run(&ctx, cmd),
        Command::Stop(args) => commands::stop::run(&ctx, args),
        Command::Version => {
            log::info!("appctl {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "appctl", &mut io::stdout());
            Ok(())
        }
    }
}
