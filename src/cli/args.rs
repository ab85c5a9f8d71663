// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to TOML config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL for client commands, overrides the config file
    #[arg(short, long, value_name = "URL", global = true)]
    pub server: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(long, value_name = "PATH")]
        database: Option<PathBuf>,
    },

    /// Work with notes on the server
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Register a student
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Course number (1-4)
        #[arg(long)]
        course: String,

        /// Group name from the course catalog
        #[arg(long)]
        group: String,
    },

    /// List registered students
    Students,

    /// Show or change the grade list
    Grades {
        #[command(subcommand)]
        command: GradesCommand,
    },
    /// Create or inspect the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum NotesCommand {
    /// List notes as tiles
    List,

    /// Show one note
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Create a note
    Add {
        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        text: String,

        /// Icon glyph from the selector set
        #[arg(long)]
        icon: Option<String>,
    },

    /// Change fields of an existing note
    Edit {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        icon: Option<String>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum GradesCommand {
    /// Print grades, average and count
    Show,

    /// Append a grade (1-10)
    Add {
        #[arg(value_name = "VALUE", allow_negative_numbers = true)]
        value: i64,
    },

    /// Remove the most recent grade
    Remove,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigCommand {
    /// Write a config file with default values (at --config or the default location)
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}
