//! CLI frontend for Multiverse Inventories world groups.

mod commands;
mod logging;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mvi",
    about = "Inspect and edit world groups and their shared player data",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write default settings and create the default group if none exist
    Init {
        /// Data directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// List all world groups
    List {
        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show detailed information about a group
    Info {
        /// Group name (case-insensitive)
        group: String,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Create a new group
    Create {
        /// Group name
        group: String,

        /// Worlds in the group (at least one)
        #[arg(required = true)]
        worlds: Vec<String>,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Delete a group
    Delete {
        /// Group name
        group: String,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Rename a group
    Rename {
        /// Current group name
        group: String,

        /// New group name
        new_name: String,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Add a world to a group
    AddWorld {
        /// Group name
        group: String,

        /// World to add
        world: String,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Remove a world from a group
    RemoveWorld {
        /// Group name
        group: String,

        /// World to remove
        world: String,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Replace what a group shares (e.g. inventory, stats, all)
    Shares {
        /// Group name
        group: String,

        /// Share tokens; none clears the group's shares
        tokens: Vec<String>,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Set or clear a group's spawn world
    Spawn {
        /// Group name
        group: String,

        /// Spawn world; omit to clear the spawn configuration
        world: Option<String>,

        /// Spawn priority (lowest, low, normal, high, highest, monitor)
        #[arg(short, long)]
        priority: Option<String>,

        /// Take precedence over the host's own spawn handling
        #[arg(long = "override")]
        overriding: bool,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show a player's stored profile within a group
    Profile {
        /// Group name
        group: String,

        /// Player name (case-insensitive)
        player: String,

        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Load every group, report problems, and run consistency checks
    Check {
        /// Data directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Encode potion effect records (type:amplifier:duration[:flags])
    EncodePotions {
        /// One record per effect
        #[arg(required = true)]
        records: Vec<String>,
    },

    /// Decode an encoded potion effect list
    DecodePotions {
        /// Encoded effect list
        encoded: String,

        /// Print the effects as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { dir } => commands::init::run(&dir),
        Commands::List { dir } => commands::list::run(&dir),
        Commands::Info { group, dir } => commands::info::run(&dir, &group),
        Commands::Create { group, worlds, dir } => commands::edit::create(&dir, &group, &worlds),
        Commands::Delete { group, dir } => commands::edit::delete(&dir, &group),
        Commands::Rename {
            group,
            new_name,
            dir,
        } => commands::edit::rename(&dir, &group, &new_name),
        Commands::AddWorld { group, world, dir } => commands::edit::add_world(&dir, &group, &world),
        Commands::RemoveWorld { group, world, dir } => {
            commands::edit::remove_world(&dir, &group, &world)
        }
        Commands::Shares { group, tokens, dir } => commands::shares::run(&dir, &group, &tokens),
        Commands::Spawn {
            group,
            world,
            priority,
            overriding,
            dir,
        } => commands::spawn::run(&dir, &group, world, priority.as_deref(), overriding),
        Commands::Profile { group, player, dir } => commands::profile::run(&dir, &group, &player),
        Commands::Check { dir } => commands::check::run(&dir),
        Commands::EncodePotions { records } => commands::potions::encode(&records),
        Commands::DecodePotions { encoded, json } => commands::potions::decode(&encoded, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
