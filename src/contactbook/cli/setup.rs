use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contactbook", bin_name = "contactbook", version)]
#[command(about = "Personal contact directory for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Address book file to use instead of the configured one
    #[arg(short, long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new contact
    #[command(alias = "a")]
    Add {
        /// First name
        #[arg(long)]
        first: String,

        /// Last name
        #[arg(long)]
        last: String,

        /// Mobile number, e.g. "+39 344 555 4466"
        #[arg(long)]
        phone: String,

        /// Email address (optional)
        #[arg(long, default_value = "")]
        email: String,
    },

    /// List all contacts
    #[command(alias = "ls")]
    List,

    /// Search contacts by name
    #[command(alias = "s")]
    Search {
        /// Part of the name to look for
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },

    /// Edit a contact (only the given fields change)
    #[command(alias = "e")]
    Edit {
        /// Name query selecting exactly one contact
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// New first name
        #[arg(long)]
        first: Option<String>,

        /// New last name
        #[arg(long)]
        last: Option<String>,

        /// New mobile number
        #[arg(long)]
        phone: Option<String>,

        /// New email address
        #[arg(long, conflicts_with = "clear_email")]
        email: Option<String>,

        /// Remove the email address
        #[arg(long)]
        clear_email: bool,
    },

    /// Delete a contact
    #[command(alias = "rm")]
    Delete {
        /// Name query selecting exactly one contact
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (book-file, confirm-delete)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Start the interactive session (default)
    Shell,
}
