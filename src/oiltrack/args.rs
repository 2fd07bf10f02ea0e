use clap::{Parser, Subcommand};
use oiltrack::config::Backend;

#[derive(Parser, Debug)]
#[command(name = "oiltrack", version)]
#[command(about = "Keep track of oil changes across a fleet of vehicles", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage backend for this run (file, memory, firestore); overrides config
    #[arg(short, long, global = true)]
    pub backend: Option<Backend>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List vehicles with their maintenance status
    #[command(alias = "ls")]
    List,

    /// Add a vehicle
    #[command(alias = "n")]
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Change one or more fields of a vehicle
    #[command(alias = "e")]
    Edit {
        /// Index from `list` (e.g. 2) or record id
        selector: String,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Remove one or more vehicles
    #[command(alias = "rm")]
    Remove {
        /// Indexes from `list` or record ids
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Show the maintenance status of one vehicle
    #[command(alias = "s")]
    Status {
        /// Index from `list` (e.g. 2) or record id
        selector: String,
    },

    /// Keep the list on screen, reloading it periodically (Ctrl-C to quit)
    Watch {
        /// Seconds between reloads (defaults to refresh-interval-secs)
        #[arg(short, long)]
        interval: Option<u64>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., backend, firestore.project-id)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the data directory and a default config
    Init,
}

/// Vehicle fields as typed by the user; checked by the engine on submit.
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Make and model, e.g. "Toyota Hilux"
    #[arg(long, alias = "make")]
    pub label: Option<String>,

    /// Date of the last oil change (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Current odometer reading in km
    #[arg(long, allow_hyphen_values = true)]
    pub mileage: Option<String>,

    /// Odometer reading at which the next change is due, in km
    #[arg(long, allow_hyphen_values = true)]
    pub due: Option<String>,
}
