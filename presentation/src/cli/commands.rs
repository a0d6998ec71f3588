//! CLI command definitions

use clap::{Parser, ValueEnum};
use raincloud_domain::SelectionMode;
use std::path::PathBuf;

/// Output format for board results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every answer with member headers and totals
    Full,
    /// One line per member
    Brief,
    /// JSON output
    Json,
}

impl From<OutputFormat> for raincloud_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => raincloud_domain::OutputFormat::Full,
            OutputFormat::Brief => raincloud_domain::OutputFormat::Brief,
            OutputFormat::Json => raincloud_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for raincloud
#[derive(Parser, Debug)]
#[command(name = "raincloud")]
#[command(author, version, about = "Board of AI advisors - role personas answer your question")]
#[command(long_about = r#"
Raincloud puts your question to a board of AI advisors (Chairman, CEO, CFO,
CTO, CPO, CMO, Non-Executive Director). Each member answers in character
through its preferred provider, falling back to alternates when a provider
is unavailable.

Selection modes:
  relevant           Members whose expertise keywords match, led by the CEO (default)
  all                Every member
  specific:<id>      One member, e.g. specific:cfo

Configuration files are loaded from (in priority order):
1. RAINCLOUD_* environment variables
2. --config <path>     Explicit config file
3. ./raincloud.toml    Project-level config
4. ~/.config/raincloud/config.toml   Global config

Example:
  raincloud "Should we expand into the European market?"
  raincloud --mode all -o brief "What are our biggest risks next year?"
  raincloud --direct --provider openai "Summarise our Q3 plan"
"#)]
pub struct Cli {
    /// The question to put to the board
    pub query: Option<String>,

    /// Which members answer: all, relevant or specific:<id>
    #[arg(long, default_value = "relevant", value_name = "MODE")]
    pub mode: SelectionMode,

    /// Ask a single provider directly instead of the board
    #[arg(long)]
    pub direct: bool,

    /// Provider for --direct (defaults to board.default_provider)
    #[arg(long, value_name = "ID")]
    pub provider: Option<String>,

    /// Output format (defaults to output.format from config, then full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List the configured board members and exit
    #[arg(long)]
    pub list_members: bool,

    /// Health-check every configured provider and exit
    #[arg(long)]
    pub check_providers: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
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
    fn test_parse_mode_and_output() {
        let cli = Cli::parse_from([
            "raincloud",
            "--mode",
            "specific:cfo",
            "-o",
            "brief",
            "-vv",
            "What is our runway?",
        ]);
        assert_eq!(cli.mode, SelectionMode::specific("cfo"));
        assert_eq!(cli.output, Some(OutputFormat::Brief));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.query.as_deref(), Some("What is our runway?"));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["raincloud", "hello"]);
        assert_eq!(cli.mode, SelectionMode::Relevant);
        assert!(cli.output.is_none());
        assert!(!cli.direct);
    }

    #[test]
    fn test_invalid_mode_is_rejected() {
        assert!(Cli::try_parse_from(["raincloud", "--mode", "everyone", "q"]).is_err());
    }
}
