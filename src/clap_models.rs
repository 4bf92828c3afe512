use crate::config::DEFAULT_API_URL;
use crate::environments::Environment;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[clap(
author,
version,
about,
long_about = None
)]
#[clap(propagate_version = true)]
pub struct Cli {
    /// API server URL
    #[clap(long, value_parser, default_value = DEFAULT_API_URL, env = "API_URL")]
    pub api_url: String,

    /// API key for authentication
    #[clap(long, value_parser, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create customer instance
    Create {
        /// Customer name
        #[clap(value_parser)]
        name: String,

        /// Display name
        #[clap(long, value_parser)]
        display_name: Option<String>,

        /// Image tag
        #[clap(long, value_parser, default_value = "latest")]
        image_tag: String,

        /// Environment type
        #[clap(long, value_enum, default_value_t = Environment::Development)]
        environment: Environment,

        /// Team label
        #[clap(long, value_parser)]
        team: Option<String>,

        /// Additional label, can be given multiple times
        #[clap(long = "label", value_parser = parse_label, value_name = "KEY=VALUE")]
        labels: Vec<(String, String)>,

        /// Wait for customer to be ready
        #[clap(long, action = ArgAction::SetTrue)]
        wait: bool,

        /// Seconds to wait for the customer to become ready (with --wait)
        #[clap(long, value_parser, default_value_t = 300)]
        timeout: u64,
    },

    /// List customer instances
    List {
        /// Page number
        #[clap(long, value_parser = clap::value_parser!(u32).range(1..), default_value_t = 1)]
        page: u32,

        /// Page size
        #[clap(long, value_parser = clap::value_parser!(u32).range(1..=100), default_value_t = 10)]
        page_size: u32,
    },

    /// Get customer instance
    Get {
        /// Customer name
        #[clap(value_parser)]
        name: String,
    },

    /// Update customer instance
    Update {
        /// Customer name
        #[clap(value_parser)]
        name: String,

        /// New display name
        #[clap(long, value_parser)]
        display_name: Option<String>,

        /// New image tag
        #[clap(long, value_parser)]
        image_tag: Option<String>,

        /// New environment configuration
        #[clap(long, value_enum)]
        environment: Option<Environment>,

        /// Replacement label, can be given multiple times
        #[clap(long = "label", value_parser = parse_label, value_name = "KEY=VALUE")]
        labels: Vec<(String, String)>,
    },

    /// Delete customer instance
    Delete {
        /// Customer name
        #[clap(value_parser)]
        name: String,

        /// Skip confirmation prompt
        #[clap(long, action = ArgAction::SetTrue)]
        confirm: bool,
    },

    /// Get customer status
    Status {
        /// Customer name
        #[clap(value_parser)]
        name: String,
    },
}

/// Parses a `KEY=VALUE` label argument.
fn parse_label(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid label '{}', expected KEY=VALUE", input)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(
            ["agectl", "--api-url", "http://api", "--api-key", "secret"]
                .iter()
                .chain(args.iter()),
        )
    }

    #[test]
    fn create_defaults() {
        let cli = parse(&["create", "foo"]).unwrap();
        match cli.command {
            Some(Commands::Create {
                name,
                display_name,
                image_tag,
                environment,
                team,
                labels,
                wait,
                timeout,
            }) => {
                assert_eq!(name, "foo");
                assert_eq!(display_name, None);
                assert_eq!(image_tag, "latest");
                assert_eq!(environment, Environment::Development);
                assert_eq!(team, None);
                assert!(labels.is_empty());
                assert!(!wait);
                assert_eq!(timeout, 300);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!(parse(&["create", "foo", "--environment", "qa"]).is_err());
        assert!(parse(&["update", "foo", "--environment", "qa"]).is_err());
    }

    #[test]
    fn accepts_known_environments() {
        for env in ["development", "staging", "production"] {
            assert!(parse(&["create", "foo", "--environment", env]).is_ok());
        }
    }

    #[test]
    fn rejects_non_positive_pagination() {
        assert!(parse(&["list", "--page", "0"]).is_err());
        assert!(parse(&["list", "--page-size", "0"]).is_err());
        assert!(parse(&["list", "--page-size", "101"]).is_err());
        assert!(parse(&["list", "--page", "-1"]).is_err());
    }

    #[test]
    fn list_pagination() {
        let cli = parse(&["list", "--page", "2", "--page-size", "5"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                page: 2,
                page_size: 5
            })
        ));
    }

    #[test]
    fn parses_repeated_labels() {
        let cli = parse(&["update", "foo", "--label", "tier=gold", "--label", "owner="]).unwrap();
        match cli.command {
            Some(Commands::Update { labels, .. }) => assert_eq!(
                labels,
                vec![
                    ("tier".to_string(), "gold".to_string()),
                    ("owner".to_string(), "".to_string())
                ]
            ),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(parse(&["update", "foo", "--label", "novalue"]).is_err());
    }

    #[test]
    fn delete_confirm_flag() {
        let cli = parse(&["delete", "foo", "--confirm"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete { confirm: true, .. })
        ));
    }
}
