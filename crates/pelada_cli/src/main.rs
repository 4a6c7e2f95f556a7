//! Pelada roster CLI
//!
//! Drives the roster engine from a terminal: each stdin line is
//! `<name>: <command>` the way a chat transport would deliver it, or a
//! bare `/command` in admin context. Replies print to stdout.

mod dispatch;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::{Local, Utc};
use clap::Parser;

use pelada_core::{BotConfig, FileStore, PendingPayments, Presenter, RosterEngine};

use crate::dispatch::Dispatcher;

#[derive(Parser)]
#[command(name = "pelada_cli")]
#[command(about = "Drive the weekly pelada roster from a terminal", long_about = None)]
struct Cli {
    /// Config file path (overrides PELADA_CONFIG_PATH)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Roster data file (overrides the config)
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .default_filter_or(if cli.verbose { "debug" } else { "info" }),
    )
    .init();

    let mut config = match &cli.config {
        Some(path) => BotConfig::load(path).map_err(|e| anyhow!(e))?,
        None => BotConfig::from_env().map_err(|e| anyhow!(e))?,
    };
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }

    log::info!("roster data file: {}", config.data_file.display());

    let store = FileStore::new(&config.data_file);
    let presenter = Presenter::new(&config.header_title, &config.header_schedule);
    let engine = RosterEngine::new(store, presenter);
    let pending = PendingPayments::with_ttl_secs(config.pending_payment_ttl_secs);
    let mut dispatcher = Dispatcher::new(engine, pending, config.seed_participants.clone());

    println!("{} - {}", config.header_title, config.header_schedule);
    println!("Linhas no formato \"<nome>: /comando\" ou \"/comando\". Ctrl-D encerra.");

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let today = Local::now().date_naive();
        let now = Utc::now();
        if let Some(text) = dispatcher.handle_line(&line, today, now) {
            println!("{}", text);
        }
    }

    Ok(())
}
