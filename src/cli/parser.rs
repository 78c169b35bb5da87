use crate::config::StorageKind;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rPaycheck
#[derive(Parser)]
#[command(
    name = "rpaycheck",
    version = env!("CARGO_PKG_VERSION"),
    about = "Estimate your net paycheck from worked hours, with a deduction multiplier that calibrates itself",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the JSON history file path
    #[arg(global = true, long = "history-file")]
    pub history_file: Option<String>,

    /// Override the history backend
    #[arg(global = true, long = "storage", value_enum)]
    pub storage: Option<StorageKind>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Estimate a paycheck, optionally calibrating with the actual net pay
    #[command(visible_alias = "calc")]
    Estimate {
        /// Hours worked (HH:MM, or HH.MM where .MM are minutes)
        hours: String,

        /// Actual net pay received, used to calibrate future estimates
        #[arg(long = "net", value_name = "AMOUNT", allow_negative_numbers = true)]
        net: Option<f64>,

        /// Print the result as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show or manage the calibration history
    History {
        #[arg(long = "print", help = "Print the stored multipliers and their mean")]
        print: bool,

        #[arg(long = "reset", help = "Delete every stored multiplier")]
        reset: bool,

        #[arg(
            long = "export",
            value_name = "FILE",
            help = "Export the history as a JSON array"
        )]
        export: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f', requires = "export")]
        force: bool,
    },
}
