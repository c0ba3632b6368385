use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "adpost")]
#[command(about = "Post one message into every configured destination through a browser session")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Run configuration file (session settings, credentials, destinations)
    #[arg(short, long, global = true, default_value = "config.json", value_name = "FILE")]
    pub config: PathBuf,

    /// Load the destination list from a separate file instead
    #[arg(long, global = true, value_name = "FILE")]
    pub destinations: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post content to every configured destination and report the result
    Run {
        /// File containing the content; reads stdin when omitted
        #[arg(value_name = "FILE")]
        content: Option<PathBuf>,
    },

    /// List the configured destinations in posting order
    #[command(alias = "dests")]
    Destinations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_with_content_file() {
        let cli = Cli::try_parse_from(["adpost", "run", "ad.txt"]).unwrap();
        match cli.command {
            Commands::Run { content } => {
                assert_eq!(content, Some(PathBuf::from("ad.txt")));
            }
            _ => panic!("expected Run command"),
        }
        assert_eq!(cli.config, PathBuf::from("config.json"));
    }

    #[test]
    fn parse_run_without_content_reads_stdin() {
        let cli = Cli::try_parse_from(["adpost", "run"]).unwrap();
        match cli.command {
            Commands::Run { content } => assert!(content.is_none()),
            _ => panic!("expected Run command"),
        }
    }

    #[test]
    fn parse_custom_config_and_destinations() {
        let cli = Cli::try_parse_from([
            "adpost",
            "--config",
            "/etc/adpost/config.json",
            "--destinations",
            "targets.json",
            "destinations",
        ])
        .unwrap();

        assert_eq!(cli.config, PathBuf::from("/etc/adpost/config.json"));
        assert_eq!(cli.destinations, Some(PathBuf::from("targets.json")));
        assert!(matches!(cli.command, Commands::Destinations));
    }

    #[test]
    fn destinations_alias_parses() {
        let cli = Cli::try_parse_from(["adpost", "dests"]).unwrap();
        assert!(matches!(cli.command, Commands::Destinations));
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["adpost", "-vv", "run"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn unknown_command_fails() {
        assert!(Cli::try_parse_from(["adpost", "frobnicate"]).is_err());
    }
}
