//! CLI command definitions

use crate::domain::Audience;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogforge")]
#[command(about = "Tag and comment build core for a static blog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Comma separated allow-list replacing the built-in tags
        #[arg(long, value_delimiter = ',')]
        allowed_tags: Option<Vec<String>>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Validate post tags and list the tags of one audience
    Tags {
        /// Audience (regular, today-learned)
        #[arg(short, long, default_value = "regular")]
        audience: Audience,
    },

    /// Show the comment thread of a post
    Comments {
        /// Post slug
        slug: String,

        /// Print the thread as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build tag lists, navigation and comment threads for every post
    Build {
        /// Write JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_default_audience() {
        let cli = Cli::try_parse_from(["blogforge", "tags"]).unwrap();
        match cli.command {
            Commands::Tags { audience } => assert_eq!(audience, Audience::Regular),
            other => panic!("Expected Tags, got {:?}", other),
        }
    }

    #[test]
    fn test_tags_til_audience() {
        let cli = Cli::try_parse_from(["blogforge", "tags", "--audience", "til"]).unwrap();
        match cli.command {
            Commands::Tags { audience } => assert_eq!(audience, Audience::TodayLearned),
            other => panic!("Expected Tags, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_audience_rejected() {
        assert!(Cli::try_parse_from(["blogforge", "tags", "--audience", "drafts"]).is_err());
    }

    #[test]
    fn test_init_allowed_tags() {
        let cli =
            Cli::try_parse_from(["blogforge", "init", "site", "--allowed-tags", "Rust,Systems"])
                .unwrap();
        match cli.command {
            Commands::Init { path, allowed_tags } => {
                assert_eq!(path, PathBuf::from("site"));
                assert_eq!(
                    allowed_tags,
                    Some(vec!["Rust".to_string(), "Systems".to_string()])
                );
            }
            other => panic!("Expected Init, got {:?}", other),
        }
    }
}
