//! CLI argument definitions.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// UniNav - Pedestrian campus navigation with live tracking and panic alerts
#[derive(Parser, Debug)]
#[command(name = "uninav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Open the app in a browser once listening
        #[arg(long)]
        open: bool,

        /// Directory of UI files served for unmatched paths
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Resolve a place name or "lat,lon" to a coordinate
    Resolve {
        /// Location text
        #[arg(trailing_var_arg = true, required = true)]
        location: Vec<String>,
    },

    /// Plan a walking route between two locations
    Route {
        /// Starting point (place name or "lat,lon")
        from: String,

        /// Destination (place name or "lat,lon")
        to: String,
    },
}
