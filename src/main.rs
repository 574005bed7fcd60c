//! # vipe CLI
//!
//! Command-line interface for editing piped data, e.g.
//! `git log | vipe | wc -l`.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

use std::{ffi::OsString, io};

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;

use vipe::{constants::LOG_ENV, Vipe};

#[derive(Parser)]
#[command(name = "vipe")]
#[command(about = "Edit the data flowing through a pipeline in your editor")]
// No flags of our own: everything, `--help` included, goes to the editor
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Arguments passed to the editor before the file name
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<OsString>,
}

fn main() {
    init_logging();

    if let Err(err) = run() {
        eprintln!("{} {err:#}", "error:".red().bold());
        std::process::exit(1);
    }
}

/// Logging is off unless `VIPE_LOG` asks for it; records go to stderr.
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "off")).init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    Vipe::new()
        .args(cli.args)
        .run(io::stdin().lock(), io::stdout().lock())?;

    Ok(())
}
