use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2026-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "workbench", version = get_version())]
#[command(about = "Markdown outlines and user-data profiles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (defaults to $WORKBENCH_HOME, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the heading outline of a markdown file
    #[command(alias = "o")]
    Outline {
        file: PathBuf,

        /// List symbols flat instead of as a tree
        #[arg(long)]
        flat: bool,

        /// Print symbols as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a markdown table of contents
    Toc {
        file: PathBuf,

        /// Deepest heading level to include (defaults to config toc-depth)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
        depth: Option<u8>,
    },

    /// Find the section a #fragment link points to
    Lookup { file: PathBuf, fragment: String },

    /// Manage user-data profiles
    #[command(subcommand, alias = "p")]
    Profile(ProfileCommand),

    /// Get or set configuration
    Config {
        /// Configuration key (toc-depth, default-profile-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// List profiles and the workspaces using them
    #[command(alias = "ls")]
    List,

    /// Create a named profile
    #[command(alias = "n")]
    Create {
        name: String,

        /// Resources to share with the default profile (e.g. settings,keybindings)
        #[arg(long, value_name = "LIST")]
        use_default: Option<String>,

        /// Associate a workspace with the new profile
        #[arg(short, long)]
        workspace: Option<String>,
    },

    /// Remove a named profile
    #[command(alias = "rm")]
    Remove { name: String },

    /// Rename a profile
    Rename { name: String, new_name: String },

    /// Replace the resources a profile shares with the default profile
    Flags {
        name: String,

        /// Comma separated resources; empty string clears them
        list: String,
    },

    /// Make a workspace use a profile
    Use {
        name: String,

        #[arg(short, long)]
        workspace: String,
    },

    /// Return a workspace to the default profile
    Unset { workspace: String },

    /// Drop every workspace association
    Reset,

    /// Show which profile a workspace uses
    Show { workspace: String },
}
