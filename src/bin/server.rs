use std::{
    env::{self, VarError},
    fs::OpenOptions,
    net::SocketAddr,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack_rs::{AppState, build_router, graceful_shutdown, parse_port_or_default};

/// The Fintrack API and dashboard server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. Falls back to the
    /// environment variable `DATABASE_PATH`.
    #[arg(long)]
    db_path: Option<String>,

    /// The port to serve from. Falls back to the environment variable
    /// `PORT`, then to 5000.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let db_path = args.db_path.unwrap_or_else(|| match env::var("DATABASE_PATH") {
        Ok(path) => path,
        Err(VarError::NotPresent) => {
            tracing::error!(
                "No database path given. Pass --db-path or set the \
                 environment variable 'DATABASE_PATH'."
            );
            std::process::exit(1);
        }
        Err(error) => {
            tracing::error!("Could not read the environment variable 'DATABASE_PATH': {error}");
            std::process::exit(1);
        }
    });

    let port = args
        .port
        .unwrap_or_else(|| parse_port_or_default("PORT", 5000));
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let connection = Connection::open(&db_path)
        .unwrap_or_else(|error| panic!("Could not open the database at '{db_path}': {error}"));
    let state = match AppState::new(connection) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize the database: {error}");
            std::process::exit(1);
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .unwrap();
}

fn setup_logging() {
    let stdout_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
