//! UniNav - Pedestrian navigation for campus users.
//!
//! Resolves free-text or coordinate locations, plans walking routes through
//! an external routing provider, tracks each user's live position against
//! the active destination and emails panic alerts to a responder.
//!
//! Architecture:
//! - `routing` talks to the geocoding/routing provider
//! - `session` holds per-user navigation state and live tracking
//! - `alert` composes and delivers panic reports over SMTP
//! - `server` exposes all of it over HTTP, keyed by a session cookie

mod alert;
mod cli;
mod config;
mod logging;
mod models;
mod routing;
mod server;
mod session;

use anyhow::Result;
use clap::Parser;

use cli::{execute, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let cli = Cli::parse();
    execute(cli).await
}
