//! Strips hidden and invisible Unicode characters from text and the clipboard.
//!
//! The cleaning routine lives in [`cleaner`] and has no dependencies on the rest of
//! the crate. [`actions`] drives a paste/clean/copy session over a
//! [`system::ClipboardProvider`]; the `clipclean` binary is a thin front end over both.

pub mod actions;
pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod system;
pub mod text_capture;

use std::io;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use cleaner::{
    classify_removed_characters, clean_text, describe_cleaning, quick_clean, CharCategory,
    CleaningOptions, CleaningResult,
};

use cli::{Cli, Command, ConfigCommand};
use config::{ConfigError, LogLevel};
use error::AppError;
use text_capture::TimedClipboard;

fn init_tracing(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
        .init();
}

/// Parses arguments, sets up logging and runs the requested command.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let cfg = config::load_full_config();
    init_tracing(cli.log_level.unwrap_or_else(|| cfg.log_level()));
    debug!(log_level = ?cli.log_level, "Starting");

    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr();

    match cli.command {
        Command::Clean {
            text,
            flags,
            output,
        } => {
            let input = match text {
                Some(text) => text,
                None => io::read_to_string(io::stdin())?,
            };
            let options = flags.apply(cfg.cleaning_options());
            commands::clean(&input, &options, output, &mut stdout, &mut stderr)
        }
        Command::Paste {
            primary,
            flags,
            output,
        } => {
            let mut clipboard = if primary {
                TimedClipboard::selection()
            } else {
                TimedClipboard::clipboard()
            };
            let options = flags.apply(cfg.cleaning_options());
            commands::paste(&mut clipboard, &options, output, &mut stdout, &mut stderr)
        }
        Command::Fix { flags, quiet } => {
            let options = flags.apply(cfg.cleaning_options());
            commands::fix(&mut TimedClipboard::clipboard(), &options, quiet, &mut stderr)
        }
        Command::Action { names, flags } => {
            let options = flags.apply(cfg.cleaning_options());
            commands::run_actions(
                &mut TimedClipboard::clipboard(),
                &names,
                &options,
                &mut stdout,
                &mut stderr,
            )
        }
        Command::Formats { json } => {
            commands::formats(&mut TimedClipboard::clipboard(), json, &mut stdout)
        }
        Command::Config { action } => match action.unwrap_or(ConfigCommand::Show) {
            ConfigCommand::Show => commands::show_config(&cfg, &mut stdout),
            ConfigCommand::Set { key, value } => {
                let path = config::config_path().ok_or(ConfigError::NoConfigDir)?;
                commands::set_config(&path, &key, &value, &mut stdout).map(|_| ())
            }
        },
    }
}
