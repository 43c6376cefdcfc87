//! # Paper Calculator CLI
//!
//! Terminal front end for `calc_core`: evaluates an expression and prints
//! the layout a student would write on paper.
//!
//! ```text
//! $ calc eval 999+1
//!   111
//!    999
//! +    1
//! ------
//!   1000
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod commands;
mod render;

use cli::{Cli, Commands, HistoryAction};
use commands::Session;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let session = Session::new(cli.history, cli.no_history, cli.separator);

    match cli.command {
        Commands::Eval { expr, expanded, json } => session.eval(&expr, expanded, json),
        Commands::Factor { n, json } => session.factor(&n, json),
        Commands::Sqrt { n, json } => session.sqrt(&n, json),
        Commands::History { action } => match action {
            HistoryAction::List => session.history_list(),
            HistoryAction::Show { entry } => session.history_show(&entry),
            HistoryAction::Clear => session.history_clear(),
        },
    }
}
