//! UniNav HTTP server.
//!
//! Sessions are identified by the `uninav_session` cookie, issued on first
//! contact. Handlers get the key from request extensions and keep all
//! navigation state in the shared [`SessionStore`].
//!
//! Endpoints:
//! - POST /login - Store display name and contact email
//! - POST /route - Resolve two locations and plan a walking route
//! - GET /route - Geometry of the last planned route
//! - POST /position - Record a live position sample
//! - GET /position - Last recorded position
//! - POST /save_location - Record a position given as "lat,lon"
//! - POST /alert - Send a panic alert to the responder
//! - DELETE /session - Forget the current session
//! - GET /health - Liveness check
//! - Anything else - Static UI files, when a directory is configured

mod error;
mod handlers;
mod identity;
mod types;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::alert::{AlertDispatcher, SmtpMailer};
use crate::config::Config;
use crate::routing::{GraphHopperClient, RoutingProvider};
use crate::session::SessionStore;

/// Shared server state.
pub struct ServerState {
    pub sessions: SessionStore,
    pub provider: Arc<dyn RoutingProvider>,
    pub alerts: AlertDispatcher,
}

/// Options for `uninav serve`.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    pub host: IpAddr,
    pub port: u16,
    pub open: bool,
    pub static_dir: Option<PathBuf>,
}

/// Build the application router.
pub fn router(state: Arc<ServerState>, static_dir: Option<PathBuf>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login))
        .route("/route", post(handlers::plan_route).get(handlers::last_route))
        .route(
            "/position",
            post(handlers::save_position).get(handlers::current_position),
        )
        .route("/save_location", post(handlers::save_location))
        .route("/alert", post(handlers::send_alert))
        .route("/session", delete(handlers::end_session));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(middleware::from_fn(identity::session_layer))
        .with_state(state)
}

/// Start the server and run until Ctrl-C.
pub async fn start_server(config: &Config, options: ServeOptions) -> Result<()> {
    let provider = GraphHopperClient::new(&config.provider)?;
    let mailer = SmtpMailer::new(&config.alerts);

    let state = Arc::new(ServerState {
        sessions: SessionStore::new(config.session_ttl),
        provider: Arc::new(provider),
        alerts: AlertDispatcher::new(config.alerts.clone(), Arc::new(mailer)),
    });

    if let Some(dir) = &options.static_dir {
        if !dir.is_dir() {
            log::warn!("Static directory {} does not exist", dir.display());
        }
    }
    let app = router(state, options.static_dir);

    let addr = SocketAddr::new(options.host, options.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("UniNav server listening on http://{addr}");

    if options.open {
        let browse = if options.host.is_unspecified() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), options.port)
        } else {
            addr
        };
        if let Err(e) = open::that(format!("http://{browse}")) {
            log::warn!("Could not open browser: {e}");
        }
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("UniNav server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
