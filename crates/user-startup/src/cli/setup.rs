use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, with git hash and commit date for non-release builds.
/// Format for releases: "v0.2.0"
/// Format for dev builds: "v0.2.0\ndev: abc1234 2026-01-15 14:30"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{}\ndev: {} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "user-startup",
    bin_name = "user-startup",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Run commands automatically when you log in", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Directory holding registry.json and config.toml
    #[arg(
        long,
        global = true,
        env = "USER_STARTUP_HOME",
        value_name = "DIR",
        help_heading = "Options"
    )]
    pub config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register a command to run at login
    #[command(alias = "a", display_order = 1)]
    Add {
        /// Name used as the entry id instead of one derived from the command
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Append the command's standard output to this file
        #[arg(long, value_name = "PATH")]
        stdout: Option<PathBuf>,

        /// Append the command's standard error to this file
        #[arg(long, value_name = "PATH")]
        stderr: Option<PathBuf>,

        /// The command line (words are joined with spaces)
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// List registered commands
    #[command(aliases = ["l", "ls"], display_order = 2)]
    List,

    /// Unregister a command and delete its login item
    #[command(aliases = ["r", "rm"], display_order = 3)]
    Remove {
        /// Id shown by `list`
        id: String,
    },

    /// Open the registry folder in the file browser
    #[command(alias = "o", display_order = 4)]
    Open {
        /// Open the folder holding the OS login items instead
        #[arg(long)]
        artifacts: bool,
    },

    /// Repair login items that drifted from the registry
    #[command(display_order = 5)]
    Doctor {
        /// Rewrite every login item, not only missing ones
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_joins_trailing_words() {
        let cli = Cli::try_parse_from(["user-startup", "add", "syncthing", "-no-browser"]).unwrap();
        match cli.command {
            Some(Commands::Add { command, name, .. }) => {
                assert_eq!(command, vec!["syncthing", "-no-browser"]);
                assert_eq!(name, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn add_options_before_command() {
        let cli = Cli::try_parse_from([
            "user-startup",
            "a",
            "--name",
            "sync",
            "--stdout",
            "/tmp/out.log",
            "syncthing",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Add { name, stdout, .. }) => {
                assert_eq!(name.as_deref(), Some("sync"));
                assert_eq!(stdout, Some(PathBuf::from("/tmp/out.log")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn aliases_resolve() {
        for (alias, expect_list) in [("l", true), ("ls", true), ("list", true)] {
            let cli = Cli::try_parse_from(["user-startup", alias]).unwrap();
            assert_eq!(matches!(cli.command, Some(Commands::List)), expect_list);
        }
        for alias in ["r", "rm", "remove"] {
            let cli = Cli::try_parse_from(["user-startup", alias, "abc"]).unwrap();
            assert!(matches!(cli.command, Some(Commands::Remove { ref id }) if id == "abc"));
        }
        let cli = Cli::try_parse_from(["user-startup", "o", "--artifacts"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Open { artifacts: true })));
    }

    #[test]
    fn add_requires_a_command() {
        assert!(Cli::try_parse_from(["user-startup", "add"]).is_err());
    }

    #[test]
    fn no_subcommand_parses_to_none() {
        let cli = Cli::try_parse_from(["user-startup", "-v"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.verbose);
    }
}
