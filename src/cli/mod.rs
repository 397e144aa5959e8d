//! Command-line interface for format-dispatch
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and argument overrides
//! - Reading input and printing dispatcher output

pub mod completion;

use clap::{Parser, Subcommand};
use colored_json::prelude::*;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};

use format_dispatch::config::{Config, LogLevel};
use format_dispatch::error::{DispatchError, Result};
use format_dispatch::{Dispatcher, Format};

/// Encode and decode JSON, XML and BSON from the command line
#[derive(Parser, Debug)]
#[command(
    name = "format-dispatch",
    version,
    about = "Transcode values between JSON, XML and base64 BSON",
    long_about = "Reads JSON and encodes it as JSON, XML or base64 BSON, or decodes
any of those formats back into JSON."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Indent JSON and XML output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv", global = true)]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for format-dispatch
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode JSON input in the selected format
    Encode {
        /// Target format (default, json, xml, bson)
        #[arg(short = 'f', long, value_name = "FORMAT")]
        format: Option<String>,

        /// Read input from a file instead of stdin
        #[arg(short = 'i', long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Decode input in the selected format and print it as JSON
    Decode {
        /// Source format (default, json, xml, bson)
        #[arg(short = 'f', long, value_name = "FORMAT")]
        format: Option<String>,

        /// Read input from a file instead of stdin
        #[arg(short = 'i', long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;
        Self::apply_args_to_config(&mut config, &args);
        Ok(Self { args, config })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if args.pretty {
            config.codec.pretty = true;
        }

        if args.no_color {
            config.display.color_output = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Resolve the format from the argument or the configured default
    fn resolve_format(&self, arg: Option<&str>) -> Format {
        let format = arg.map(Format::parse).unwrap_or(self.config.codec.format);
        if !format.is_supported() {
            tracing::warn!("{}", unknown_format_message(arg));
        }
        format
    }

    /// Run the selected subcommand
    pub fn run(&self) -> Result<()> {
        match &self.args.command {
            Commands::Encode { format, input } => {
                let format = self.resolve_format(format.as_deref());
                let output = self.encode(&read_input(input.as_deref())?, format)?;
                println!("{output}");
            }
            Commands::Decode { format, input } => {
                let format = self.resolve_format(format.as_deref());
                let output = self.decode(&read_input(input.as_deref())?, format)?;
                println!("{output}");
            }
            Commands::Version => self.show_version(),
            Commands::Completion { shell } => completion::generate_completion(shell)?,
            Commands::Config { show, validate } => self.handle_config_command(*show, *validate)?,
        }
        Ok(())
    }

    fn dispatcher(&self) -> Dispatcher {
        Dispatcher::from_config(&self.config.codec)
    }

    /// Encode JSON input text in `format`
    ///
    /// Blank input is the absent value and encodes to an empty string.
    pub fn encode(&self, input: &str, format: Format) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return self.dispatcher().encode::<serde_json::Value>(None, format);
        }

        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| DispatchError::Generic(format!("Input is not valid JSON: {e}")))?;
        self.dispatcher().encode(Some(&value), format)
    }

    /// Decode input text in `format` and render it as JSON
    pub fn decode(&self, input: &str, format: Format) -> Result<String> {
        let value: serde_json::Value = self.dispatcher().decode(input.trim_end(), format)?;

        let json = if self.config.codec.pretty {
            serde_json::to_string_pretty(&value)
        } else {
            serde_json::to_string(&value)
        }
        .map_err(|e| DispatchError::Generic(format!("Failed to render JSON: {e}")))?;

        if self.config.display.color_output && self.config.codec.pretty {
            Ok(json.to_colored_json_auto().unwrap_or(json))
        } else {
            Ok(json)
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("format-dispatch version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            match self.config.validate() {
                Ok(()) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {e}"),
            }
        }

        if show {
            let path = self
                .args
                .config_file
                .clone()
                .unwrap_or_else(Config::default_config_path);
            println!("# Configuration file: {}", path.display());
            println!("{}", self.config.to_toml()?);
        }

        Ok(())
    }
}

/// Warning for a format that routes to no codec, naming where it came from
fn unknown_format_message(arg: Option<&str>) -> String {
    match arg {
        Some(name) => format!("Unknown format '{name}', output will be empty"),
        None => format!(
            "Unknown format '{}' in config field codec.format, output will be empty",
            Format::Unknown
        ),
    }
}

/// Read all input from a file, or from stdin when no path is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut stdin = std::io::stdin();
            if stdin.is_terminal() {
                tracing::info!("Reading input from terminal, end with Ctrl+D");
            }
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface(args: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(args).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["format-dispatch", "encode", "-f", "xml"]).unwrap();
        match args.command {
            Commands::Encode { format, input } => {
                assert_eq!(format.as_deref(), Some("xml"));
                assert!(input.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(CliArgs::try_parse_from(["format-dispatch"]).is_err());
    }

    #[test]
    fn test_global_flags_override_config() {
        let cli = interface(&["format-dispatch", "decode", "--pretty", "--no-color", "-v"]);
        assert!(cli.config().codec.pretty);
        assert!(!cli.config().display.color_output);
        assert_eq!(cli.config().logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_resolve_format() {
        let cli = interface(&["format-dispatch", "encode"]);
        assert_eq!(cli.resolve_format(None), Format::Default);
        assert_eq!(cli.resolve_format(Some("BSON")), Format::Bson);
        assert_eq!(cli.resolve_format(Some("yaml")), Format::Unknown);
    }

    #[test]
    fn test_unknown_format_message_names_source() {
        assert_eq!(
            unknown_format_message(Some("yaml")),
            "Unknown format 'yaml', output will be empty"
        );

        let message = unknown_format_message(None);
        assert!(message.contains("'unknown'"));
        assert!(message.contains("codec.format"));
        assert!(!message.contains("''"));
    }

    #[test]
    fn test_encode_then_decode_through_bson() {
        let cli = interface(&["format-dispatch", "encode"]);
        let encoded = cli.encode(r#"{"name":"widget","count":3}"#, Format::Bson).unwrap();
        let decoded = cli.decode(&format!("{encoded}\n"), Format::Bson).unwrap();

        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();
        assert_eq!(value["name"], "widget");
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_blank_input_is_absent() {
        let cli = interface(&["format-dispatch", "encode"]);
        assert_eq!(cli.encode("  \n", Format::Xml).unwrap(), "");
        assert_eq!(cli.decode("", Format::Json).unwrap(), "null");
    }

    #[test]
    fn test_invalid_json_input() {
        let cli = interface(&["format-dispatch", "encode"]);
        assert!(matches!(
            cli.encode("{oops", Format::Json),
            Err(DispatchError::Generic(_))
        ));
    }
}
