//! CLI command execution.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::routing::{self, GraphHopperClient};
use crate::server::{self, ServeOptions};

use super::args::{Cli, Commands};

/// Execute the CLI command.
pub async fn execute(cli: Cli) -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            open,
            static_dir,
        } => {
            config.log();
            let options = ServeOptions {
                host,
                port,
                open,
                static_dir,
            };
            server::start_server(&config, options).await
        }
        Commands::Resolve { location } => resolve_location(&config, &location.join(" ")).await,
        Commands::Route { from, to } => plan_route(&config, &from, &to).await,
    }
}

async fn resolve_location(config: &Config, text: &str) -> Result<()> {
    let provider = GraphHopperClient::new(&config.provider)?;
    let coordinate = routing::resolve(&provider, text)
        .await
        .with_context(|| format!("Could not resolve \"{text}\""))?;

    println!("{coordinate}");
    Ok(())
}

async fn plan_route(config: &Config, from: &str, to: &str) -> Result<()> {
    let provider = GraphHopperClient::new(&config.provider)?;
    let (origin, destination) = tokio::try_join!(
        routing::resolve(&provider, from),
        routing::resolve(&provider, to)
    )
    .context("Could not recognize one of the locations")?;

    let route = routing::plan(&provider, origin, destination)
        .await
        .context("Error fetching directions")?;

    println!("{origin} -> {destination}");
    println!(
        "{} km, about {} min on foot",
        route.distance_km, route.duration_min
    );
    println!();
    for (i, step) in route.instructions.iter().enumerate() {
        println!("{:>3}. {step}", i + 1);
    }
    Ok(())
}
