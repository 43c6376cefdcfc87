use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "calc")]
#[command(author, version, about = "Step-by-step paper arithmetic")]
#[command(propagate_version = true)]
pub struct Cli {
    /// History file (defaults to ~/.calc_history.json)
    #[arg(long, global = true, env = "CALC_HISTORY")]
    pub history: Option<PathBuf>,

    /// Do not read or write the history file
    #[arg(long, global = true)]
    pub no_history: bool,

    /// Decimal separator used for results (',' or '.')
    #[arg(long, global = true, env = "CALC_SEPARATOR")]
    pub separator: Option<char>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate an expression such as 123,45+67 or 1234/5
    Eval {
        /// Expression as typed on the keypad
        expr: String,

        /// Show every product and remainder row of a long division
        #[arg(long)]
        expanded: bool,

        /// Print the structured result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prime factorization ladder
    Factor {
        /// Whole number to decompose
        n: String,

        #[arg(long)]
        json: bool,
    },

    /// Exact integer square root
    Sqrt {
        /// Radicand
        n: String,

        #[arg(long)]
        json: bool,
    },

    /// Inspect or clear remembered calculations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List entries, newest first
    #[command(alias = "ls")]
    List,

    /// Replay the layout of one entry (by list number or input text)
    Show {
        entry: String,
    },

    /// Remove every entry
    Clear,
}
