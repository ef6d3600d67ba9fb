//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

use crate::cleaner::CleaningOptions;
use crate::config::LogLevel;

#[derive(Debug, Parser)]
#[command(
    name = "clipclean",
    version,
    about = "Strip hidden and invisible Unicode characters from text and the clipboard"
)]
pub struct Cli {
    /// Log verbosity (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clean text given on the command line or read from stdin
    Clean {
        /// Text to clean; stdin is read when omitted
        #[arg(long)]
        text: Option<String>,
        #[command(flatten)]
        flags: CleanFlags,
        #[command(flatten)]
        output: OutputFlags,
    },
    /// Clean the clipboard text and print it
    Paste {
        /// Read the PRIMARY selection instead of the clipboard (Linux)
        #[arg(long)]
        primary: bool,
        #[command(flatten)]
        flags: CleanFlags,
        #[command(flatten)]
        output: OutputFlags,
    },
    /// Clean the clipboard text and write the result back to the clipboard
    Fix {
        #[command(flatten)]
        flags: CleanFlags,
        /// Do not print the summary
        #[arg(short, long)]
        quiet: bool,
    },
    /// Run session actions in order: paste, copy-cleaned, copy-original, clear
    Action {
        #[arg(required = true, value_name = "ACTION")]
        names: Vec<String>,
        #[command(flatten)]
        flags: CleanFlags,
    },
    /// List the formats currently offered by the clipboard
    Formats {
        #[arg(long)]
        json: bool,
    },
    /// Show or change persisted settings
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommand>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path and effective settings
    Show,
    /// Set a value; an empty value resets it to the default
    Set { key: String, value: String },
}

/// Per-invocation overrides on top of the configured options.
/// Each `--keep-*` / `--remove-*` pair forces one flag off or on for this run.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct CleanFlags {
    /// Keep zero-width characters
    #[arg(long, conflicts_with = "remove_zero_width")]
    pub keep_zero_width: bool,
    /// Remove zero-width characters even if the config disables it
    #[arg(long)]
    pub remove_zero_width: bool,
    /// Keep invisible separator and format characters
    #[arg(long, conflicts_with = "remove_invisible")]
    pub keep_invisible: bool,
    /// Remove invisible characters even if the config disables it
    #[arg(long)]
    pub remove_invisible: bool,
    /// Keep control characters
    #[arg(long, conflicts_with = "remove_control")]
    pub keep_control: bool,
    /// Remove control characters even if the config disables it
    #[arg(long)]
    pub remove_control: bool,
    /// Keep characters from the specials block
    #[arg(long, conflicts_with = "remove_non_printable")]
    pub keep_non_printable: bool,
    /// Remove specials-block characters even if the config disables it
    #[arg(long)]
    pub remove_non_printable: bool,
    /// Strip tab, LF and CR as well; leftover line breaks become spaces
    #[arg(long, conflicts_with = "preserve_whitespace")]
    pub no_preserve_whitespace: bool,
    /// Replace line breaks with spaces
    #[arg(long, conflicts_with = "preserve_whitespace")]
    pub remove_line_breaks: bool,
    /// Keep tab, LF and CR even if the config strips them
    #[arg(long)]
    pub preserve_whitespace: bool,
}

fn override_flag(base: bool, force_on: bool, force_off: bool) -> bool {
    if force_off {
        false
    } else if force_on {
        true
    } else {
        base
    }
}

impl CleanFlags {
    pub fn apply(&self, base: CleaningOptions) -> CleaningOptions {
        CleaningOptions {
            remove_zero_width: override_flag(
                base.remove_zero_width,
                self.remove_zero_width,
                self.keep_zero_width,
            ),
            remove_invisible: override_flag(
                base.remove_invisible,
                self.remove_invisible,
                self.keep_invisible,
            ),
            remove_control_chars: override_flag(
                base.remove_control_chars,
                self.remove_control,
                self.keep_control,
            ),
            remove_non_printable: override_flag(
                base.remove_non_printable,
                self.remove_non_printable,
                self.keep_non_printable,
            ),
            preserve_whitespace: override_flag(
                base.preserve_whitespace,
                self.preserve_whitespace,
                self.no_preserve_whitespace || self.remove_line_breaks,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputFlags {
    /// Print the full cleaning result as JSON
    #[arg(long)]
    pub json: bool,
    /// Print only the cleaned text, without the summary on stderr
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_log_level(raw: &str) -> Result<LogLevel, String> {
    LogLevel::from_str(raw).ok_or_else(|| format!("unknown log level: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_with_flags() {
        let cli = Cli::try_parse_from([
            "clipclean",
            "--log-level",
            "debug",
            "clean",
            "--text",
            "abc",
            "--keep-control",
            "--remove-line-breaks",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        let Command::Clean {
            text,
            flags,
            output,
        } = cli.command
        else {
            panic!("expected clean command");
        };
        assert_eq!(text.as_deref(), Some("abc"));
        assert!(output.json);

        let options = flags.apply(CleaningOptions::default());
        assert!(!options.remove_control_chars);
        assert!(!options.preserve_whitespace);
        assert!(options.remove_zero_width);
    }

    #[test]
    fn test_no_flags_keep_config() {
        let base = CleaningOptions {
            remove_invisible: false,
            ..CleaningOptions::default()
        };
        assert_eq!(CleanFlags::default().apply(base), base);
    }

    #[test]
    fn test_rejects_bad_log_level() {
        assert!(Cli::try_parse_from(["clipclean", "--log-level", "loud", "formats"]).is_err());
    }

    #[test]
    fn test_parse_config_set() {
        let cli =
            Cli::try_parse_from(["clipclean", "config", "set", "remove_line_breaks", "true"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Config {
                action: Some(ConfigCommand::Set { .. })
            }
        ));
    }

    #[test]
    fn test_flags_reenable_what_config_disabled() {
        let base = CleaningOptions {
            remove_invisible: false,
            remove_control_chars: false,
            preserve_whitespace: false,
            ..CleaningOptions::default()
        };
        let cli = Cli::try_parse_from([
            "clipclean",
            "clean",
            "--remove-invisible",
            "--remove-control",
            "--preserve-whitespace",
        ])
        .unwrap();
        let Command::Clean { flags, .. } = cli.command else {
            panic!("expected clean command");
        };
        assert_eq!(flags.apply(base), CleaningOptions::default());
    }

    #[test]
    fn test_opposing_flags_conflict() {
        for pair in [
            ["--keep-zero-width", "--remove-zero-width"],
            ["--keep-control", "--remove-control"],
            ["--preserve-whitespace", "--remove-line-breaks"],
            ["--preserve-whitespace", "--no-preserve-whitespace"],
        ] {
            let args = ["clipclean", "clean", pair[0], pair[1]];
            assert!(Cli::try_parse_from(args).is_err(), "{pair:?} should conflict");
        }
    }

    #[test]
    fn test_parse_action_sequence() {
        let cli = Cli::try_parse_from(["clipclean", "action", "paste", "copy-cleaned"]).unwrap();
        let Command::Action { names, .. } = cli.command else {
            panic!("expected action command");
        };
        assert_eq!(names, ["paste", "copy-cleaned"]);
        assert!(Cli::try_parse_from(["clipclean", "action"]).is_err());
    }
}
