use clap::{Parser, Subcommand};

/// Command-line interface definition for rzinesync
/// Fanzine issue lists (LST files) and the remote files behind them
#[derive(Parser)]
#[command(
    name = "rzinesync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Edit fanzine issue lists (LST) and keep their remote directory in sync",
    long_about = None
)]
pub struct Cli {
    /// Override the remote store root directory
    #[arg(global = true, long = "remote")]
    pub remote: Option<String>,

    /// Override the journal file holding the pending deltas
    #[arg(global = true, long = "journal")]
    pub journal: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and working directories
    Init,

    /// Show the configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Render an LST file as a table
    Show {
        /// LST file
        file: String,
    },

    /// Load and re-save an LST file, reporting anything that does not survive
    Check {
        /// LST file
        file: String,

        #[arg(long = "write", help = "Rewrite the file in canonical form")]
        write: bool,
    },

    /// Export the issue table of an LST file
    Export {
        /// LST file
        file: String,

        #[arg(long, help = "Export format: csv or json")]
        format: String,

        #[arg(long = "file", value_name = "OUT", help = "Output file")]
        out: String,

        #[arg(long, help = "Overwrite the output file without asking")]
        force: bool,
    },

    /// Decode or encode a single packed first-column cell
    Cell {
        #[command(subcommand)]
        action: CellAction,
    },

    /// Queue file operations for a remote directory
    Delta {
        #[arg(long, value_name = "REMOTE_DIR", help = "Remote directory the deltas apply to")]
        dir: String,

        #[command(subcommand)]
        action: DeltaAction,
    },

    /// Apply the pending deltas of a remote directory and publish its LST
    Upload {
        #[arg(long, value_name = "REMOTE_DIR")]
        dir: String,

        #[arg(long, value_name = "FILE", help = "LST file to publish after the deltas")]
        lst: Option<String>,

        #[arg(long = "keep-going", help = "Continue with the other deltas after a failure")]
        keep_going: bool,
    },

    /// Print the upload log
    Log {
        #[arg(long = "print", help = "Print the upload log")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum CellAction {
    /// Packed cell -> identifier and display text
    Decode { packed: String },

    /// Identifier and display text -> packed cell
    Encode {
        identifier: String,
        #[arg(default_value = "")]
        text: String,
    },
}

#[derive(Subcommand)]
pub enum DeltaAction {
    /// Upload a new local file
    Add {
        file: String,
        #[arg(long = "as", value_name = "NAME", help = "Remote name (default: local file name)")]
        as_name: Option<String>,
    },

    /// Delete a remote file
    Del { name: String },

    /// Rename a remote file
    Rename { old: String, new: String },

    /// Overwrite a remote file with a local one
    Replace { old: String, file: String },

    /// List the pending deltas
    List,

    /// Discard every pending delta
    Clear,
}
