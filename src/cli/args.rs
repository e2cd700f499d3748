// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Replays step events into outcome trees and generates reports
#[derive(Parser, Debug)]
#[command(name = "steptrace")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Record acceptance test step events and generate reports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Create default configuration file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub init_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded event log and generate reports for its test runs
    Replay(ReplayArgs),

    /// List the report formats that can be generated
    Formats,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// JSON event log to replay
    #[arg(required = true)]
    pub events: PathBuf,

    /// Directory for generated reports (overrides the configuration file)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Report format to generate; repeat for several formats
    #[arg(short = 'f', long = "format", value_name = "FORMAT")]
    pub formats: Vec<String>,

    /// Qualifier appended to report names of data-driven runs
    #[arg(short = 'q', long)]
    pub qualifier: Option<String>,

    /// Pause after each finished step, in milliseconds
    #[arg(long, value_name = "MILLIS")]
    pub step_delay: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_args() {
        let cli = Cli::parse_from([
            "steptrace",
            "replay",
            "events.json",
            "-f",
            "json",
            "--format",
            "xml",
            "-q",
            "row 1",
        ]);

        let Some(Commands::Replay(args)) = cli.command else {
            panic!("expected replay command");
        };
        assert_eq!(args.events, PathBuf::from("events.json"));
        assert_eq!(args.formats, vec!["json", "xml"]);
        assert_eq!(args.qualifier.as_deref(), Some("row 1"));
        assert!(args.output.is_none());
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from(["steptrace", "-v", "formats"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Formats)));
    }
}
