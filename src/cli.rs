//! Command line front end for the `matcha` binary.

use std::io;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::{
    api::ApiError,
    checkout::{CheckoutError, SummaryError},
    config::{ClientConfig, LoggingConfig},
    context::{AddError, AppContext, AppInitError},
};

pub mod item_spec;
pub mod menu;
pub mod order;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "matcha",
    about = "Browse the café menu and place pre-orders",
    long_about = None
)]
pub struct Cli {
    /// Backend and pricing settings.
    #[command(flatten)]
    pub client: ClientConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load configuration from `.env`, the environment, and arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot be parsed.
    pub fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the menu grouped by category
    Menu(menu::MenuArgs),

    /// Build a cart and submit it as a pre-order
    Order(order::OrderArgs),
}

/// Failures surfaced by a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The session could not be set up.
    #[error(transparent)]
    Init(#[from] AppInitError),

    /// The menu could not be fetched.
    #[error("could not load the menu: {0}")]
    Menu(#[from] ApiError),

    /// One of the `--item` values could not be added.
    #[error("item {position}: {source}")]
    Add {
        /// 1-based position among the `--item` arguments.
        position: usize,
        /// Why the add was refused.
        #[source]
        source: AddError,
    },

    /// Checkout failed.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The summary could not be written.
    #[error("could not print the order summary")]
    Summary(#[from] SummaryError),

    /// JSON output could not be encoded.
    #[error("could not encode JSON output")]
    Json(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("could not write output")]
    Io(#[from] io::Error),
}

/// Runs a parsed command line against the configured backend.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure.
pub async fn run(cli: Cli, out: impl io::Write) -> Result<(), CliError> {
    let mut context = AppContext::from_config(&cli.client)?;

    run_command(&mut context, cli.command, out).await
}

/// Runs one command against an existing context.
///
/// # Errors
///
/// Returns a [`CliError`] describing the first failure.
pub async fn run_command(
    context: &mut AppContext,
    command: Command,
    out: impl io::Write,
) -> Result<(), CliError> {
    match command {
        Command::Menu(args) => menu::run(context, args, out).await,
        Command::Order(args) => order::run(context, args, out).await,
    }
}
