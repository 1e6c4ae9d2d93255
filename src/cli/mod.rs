//! CLI module for the storefront API

pub mod serve;

use clap::{Parser, Subcommand};

/// Storefront API - multi-tenant catalog and order backend with metered
/// API-key subscriptions
#[derive(Parser)]
#[command(name = "storefront-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
