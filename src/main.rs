//! mispq - MISP query CLI
//!
//! A command-line tool for searching MISP attributes and events,
//! printing matches as newline-delimited JSON.

use clap::Parser;
use mispq::cli::args::{generate_completions, Cli};
use mispq::commands::run_search;
use mispq::error::{AppError, MispError, UsageError};

const VERSION: &str = concat!("mispq ", env!("CARGO_PKG_VERSION"));
const COPYRIGHT: &str = "mispq  Copyright (C) 2026 mispq contributors";
const LICENSE: &str = "License GPLv3+: This program comes with ABSOLUTELY NO WARRANTY.\n\
This is free software, and you are welcome to redistribute it under certain\n\
conditions;";

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; -d raises the default filter to debug
    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    // Version short-circuits everything, including validation
    if cli.version {
        eprintln!("{}\n{}\n{}", VERSION, COPYRIGHT, LICENSE);
        return;
    }

    if let Some(shell) = cli.completions {
        generate_completions(shell);
        return;
    }

    if let Err(e) = run_search(&cli) {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::Usage(UsageError::ConfigNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Pass -c/--config or place config.json next to the executable.");
        }
        AppError::Misp(MispError::Request { .. }) => {
            eprintln!();
            eprintln!("Hint: Check the Proto and Host values in the configuration file.");
        }
        AppError::Misp(MispError::Status { status, .. })
            if status.as_u16() == 401 || status.as_u16() == 403 =>
        {
            eprintln!();
            eprintln!("Hint: Check the APIKey value in the configuration file.");
        }
        _ => {}
    }
}
