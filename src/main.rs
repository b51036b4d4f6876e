use clap::Parser;
use std::process;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use moodtask::cli;
use moodtask::cli::commands::{Cli, Commands};

fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("warning: {e:#}");
    }

    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let exit_code = match cli_args.command {
        Commands::Login { email, password } => cli::auth::run_login(&email, &password, json_output),
        Commands::Register {
            username,
            email,
            password,
        } => cli::auth::run_register(&username, &email, &password, json_output),
        Commands::Logout => cli::auth::run_logout(json_output),
        Commands::Token(cmd) => cli::auth::run_token(cmd, json_output),
        Commands::Task(cmd) => cli::task::run(cmd, json_output),
        Commands::Mood(cmd) => cli::mood::run(cmd, json_output),
        Commands::Classify { text } => cli::mood::run_classify(&text, json_output),
        Commands::Reorganize { mood, opts } => cli::arrange::run_reorganize(mood, &opts, json_output),
        Commands::Checkin { text, opts } => cli::arrange::run_checkin(&text, &opts, json_output),
        Commands::History { limit } => cli::history::run(limit, json_output),
        Commands::Report { input } => cli::report::run(input.as_deref(), json_output),
        Commands::Profile(cmd) => cli::profile::run(cmd, json_output),
        Commands::Config(cmd) => cli::settings::run(cmd, json_output),
    };

    process::exit(exit_code);
}

/// Diagnostics go to stderr; stdout carries command output only.
fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_env("MOODTASK_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .try_init()
        .map_err(|e| anyhow!("could not install log subscriber: {e}"))
}
