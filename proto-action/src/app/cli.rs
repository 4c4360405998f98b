//! Command-Line Interface

use crate::synthetic::MotionKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Proto Action - few-shot skeleton action recognition by prototype matching
#[derive(Parser, Debug)]
#[command(name = "proto-action")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a keypoint sequence against a prototype bank
    Classify {
        /// Directory of per-frame keypoint files (defaults to ./input_json)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Labeled example tree (<root>/<label>/<clip>/); synthetic bank if omitted
        #[arg(short, long)]
        prototypes: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a synthetic clip against the synthetic demo bank
    Demo {
        /// Motion used for the query clip
        #[arg(short, long, default_value = "run")]
        query: MotionKind,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default config file
    Init {
        /// Replace an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// View or reset configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Overwrite the config file with defaults
    Reset {
        /// Replace an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Query directory used when `--input` is not given
    pub fn default_input_dir() -> PathBuf {
        PathBuf::from("input_json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_default_input_dir() {
        assert_eq!(Cli::default_input_dir(), PathBuf::from("input_json"));
    }

    #[test]
    fn test_cli_parse_classify_defaults() {
        let cli = Cli::try_parse_from(["proto-action", "classify"]).unwrap();

        match cli.command {
            Commands::Classify { input, prototypes, json } => {
                assert!(input.is_none());
                assert!(prototypes.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_parse_classify_with_all_options() {
        let args = vec![
            "proto-action",
            "classify",
            "--input", "/data/query",
            "--prototypes", "/data/examples",
            "--json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Classify { input, prototypes, json } => {
                assert_eq!(input, Some(PathBuf::from("/data/query")));
                assert_eq!(prototypes, Some(PathBuf::from("/data/examples")));
                assert!(json);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_parse_classify_shorthand() {
        let cli = Cli::try_parse_from(["proto-action", "classify", "-i", "q", "-p", "ex"]).unwrap();

        match cli.command {
            Commands::Classify { input, prototypes, .. } => {
                assert_eq!(input, Some(PathBuf::from("q")));
                assert_eq!(prototypes, Some(PathBuf::from("ex")));
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_cli_parse_demo_defaults() {
        let cli = Cli::try_parse_from(["proto-action", "demo"]).unwrap();

        match cli.command {
            Commands::Demo { query, json } => {
                assert_eq!(query, MotionKind::Run);
                assert!(!json);
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_parse_demo_query() {
        let cli = Cli::try_parse_from(["proto-action", "demo", "--query", "walk", "--json"]).unwrap();

        match cli.command {
            Commands::Demo { query, json } => {
                assert_eq!(query, MotionKind::Walk);
                assert!(json);
            }
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_parse_demo_unknown_query() {
        let result = Cli::try_parse_from(["proto-action", "demo", "--query", "swim"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_init_command() {
        let cli = Cli::try_parse_from(["proto-action", "init", "--force"]).unwrap();

        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_parse_init_command_defaults() {
        let cli = Cli::try_parse_from(["proto-action", "init"]).unwrap();

        match cli.command {
            Commands::Init { force } => assert!(!force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_parse_config_show() {
        let cli = Cli::try_parse_from(["proto-action", "config", "show"]).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Show } => {}
            _ => panic!("Expected Config Show command"),
        }
    }

    #[test]
    fn test_cli_parse_config_reset() {
        let cli = Cli::try_parse_from(["proto-action", "config", "reset", "-f"]).unwrap();

        match cli.command {
            Commands::Config { action: ConfigAction::Reset { force } } => assert!(force),
            _ => panic!("Expected Config Reset command"),
        }
    }

    #[test]
    fn test_cli_global_verbose_flag() {
        let cli = Cli::try_parse_from(["proto-action", "--verbose", "demo"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_global_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["proto-action", "demo", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli = Cli::try_parse_from(["proto-action", "-c", "/custom/config.toml", "demo"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_cli_missing_subcommand() {
        assert!(Cli::try_parse_from(["proto-action"]).is_err());
    }

    #[test]
    fn test_cli_unknown_subcommand() {
        assert!(Cli::try_parse_from(["proto-action", "record"]).is_err());
    }

    #[test]
    fn test_cli_structure() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_name(), "proto-action");
        let names: Vec<&str> = cmd.get_subcommands().map(|c| c.get_name()).collect();
        assert_eq!(names, vec!["classify", "demo", "init", "config"]);
        cmd.debug_assert();
    }
}
