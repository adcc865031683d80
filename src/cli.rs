use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Gym dashboard form engine - inspect and check the dashboard's form schemas
#[derive(Parser, Debug, Clone)]
#[command(name = "gymdash", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "GYMDASH_CONFIG", default_value = "gymdash.toml")]
    pub config: PathBuf,

    /// Directory holding extra schema files
    #[arg(long, env = "GYMDASH_SCHEMAS_DIR")]
    pub schemas_dir: Option<PathBuf>,

    /// Page size for paginated selects
    #[arg(long, env = "GYMDASH_PAGE_SIZE")]
    pub page_size: Option<usize>,

    /// Search debounce in milliseconds
    #[arg(long, env = "GYMDASH_DEBOUNCE_MS")]
    pub debounce_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List the built-in screens and any loaded schema files
    List,

    /// Print a screen's schema as JSON
    Schema {
        /// Screen name (members, blogs, meals, exercises, categories) or schema file stem
        name: String,
    },

    /// Check that a schema file parses and is well formed
    Check {
        path: PathBuf,
    },

    /// Validate a JSON record against a schema and print the field errors
    Validate {
        /// Screen name or schema file stem
        schema: String,

        /// JSON object of field values
        #[arg(short, long)]
        data: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["gymdash", "list"]);
        assert_eq!(cli.config, PathBuf::from("gymdash.toml"));
        assert!(cli.schemas_dir.is_none());
        assert!(cli.page_size.is_none());
        assert!(cli.debounce_ms.is_none());
        assert_eq!(cli.command, Command::List);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "gymdash",
            "--config",
            "custom.toml",
            "--schemas-dir",
            "forms/",
            "--page-size",
            "25",
            "--debounce-ms",
            "150",
            "validate",
            "meals",
            "--data",
            "meal.json",
        ]);
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
        assert_eq!(cli.schemas_dir, Some(PathBuf::from("forms/")));
        assert_eq!(cli.page_size, Some(25));
        assert_eq!(cli.debounce_ms, Some(150));
        assert_eq!(
            cli.command,
            Command::Validate {
                schema: "meals".to_string(),
                data: PathBuf::from("meal.json"),
            }
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["gymdash"]).is_err());
    }
}
