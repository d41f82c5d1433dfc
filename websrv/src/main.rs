// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{env::current_exe, num::NonZeroU64, sync::Arc, time::Duration};

use tokio::{join, signal, sync::mpsc, time::sleep};
use warp::{Filter, http::StatusCode};

use minstrel_repo_sqlite::{initialize_database, run_migrations};
use minstrel_storage_sqlite::connection::{
    create_connection_pool,
    gatekeeper::{Config as GatekeeperConfig, Gatekeeper as DatabaseConnectionGatekeeper},
    get_pooled_connection,
};
use minstrel_websrv_warp_sqlite::handle_rejection;

mod env;
mod routes;
mod seed;

const WEB_SERVER_LISTENING_DELAY: Duration = Duration::from_millis(250);

const DATABASE_CONNECTION_ACQUIRE_READ_TIMEOUT_MILLIS: NonZeroU64 =
    NonZeroU64::new(10_000).unwrap();

const DATABASE_CONNECTION_ACQUIRE_WRITE_TIMEOUT_MILLIS: NonZeroU64 =
    NonZeroU64::new(30_000).unwrap();

fn provision_database(
    database_url: &str,
    connection_pool_size: std::num::NonZeroU32,
) -> anyhow::Result<DatabaseConnectionGatekeeper> {
    log::info!("Commissioning SQLite database: {database_url}");

    // The maximum size of the pool defines the maximum number of
    // allowed readers while writers require exclusive access.
    log::info!("Creating connection pool of max. size {connection_pool_size}");
    let connection_pool = create_connection_pool(database_url, connection_pool_size)?;

    log::info!("Initializing database");
    initialize_database(&mut *get_pooled_connection(&connection_pool)?)?;

    if env::parse_database_migrate_schema_on_startup() {
        log::info!("Migrating database schema");
        run_migrations(&mut *get_pooled_connection(&connection_pool)?)
            .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    }

    Ok(DatabaseConnectionGatekeeper::new(
        connection_pool,
        GatekeeperConfig {
            acquire_read_timeout_millis: DATABASE_CONNECTION_ACQUIRE_READ_TIMEOUT_MILLIS,
            acquire_write_timeout_millis: DATABASE_CONNECTION_ACQUIRE_WRITE_TIMEOUT_MILLIS,
        },
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let started_at = jiff::Timestamp::now();

    env::init_environment();

    env::init_tracing_and_logging()?;

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let endpoint_addr = env::parse_endpoint_addr();
    log::info!("Endpoint address: {endpoint_addr}");

    let database_url = env::parse_database_url();
    let database_connection_pool_size = env::parse_database_connection_pool_size();
    let shared_connection_gatekeeper = Arc::new(provision_database(
        &database_url,
        database_connection_pool_size,
    )?);

    if let Some(seed_file) = env::parse_database_seed_file() {
        seed::import_seed_file(&shared_connection_gatekeeper, &seed_file).await?;
    }

    log::info!("Creating service routes");

    // POST /shutdown
    let (server_shutdown_tx, mut server_shutdown_rx) = mpsc::unbounded_channel::<()>();
    let shutdown_filter = {
        let server_shutdown_tx = server_shutdown_tx.clone();
        warp::post()
            .and(warp::path("shutdown"))
            .and(warp::path::end())
            .map(move || {
                server_shutdown_tx
                    .send(())
                    .map(|()| StatusCode::ACCEPTED)
                    .unwrap_or_else(|_| {
                        log::warn!("Failed to forward shutdown request");
                        StatusCode::BAD_GATEWAY
                    })
            })
    };

    // GET /about
    let about_json = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
        "version": env!("CARGO_PKG_VERSION"),
        "instance": {
            "startedAt": started_at.to_string(),
            "networking": {
                "endpointAddress": endpoint_addr.to_string(),
            },
            "database": {
                "url": database_url,
                "connectionPoolSize": database_connection_pool_size.get(),
            },
        },
    });
    let about_filter = warp::get()
        .and(warp::path("about"))
        .and(warp::path::end())
        .map(move || warp::reply::json(&about_json));

    let api_filters = warp::path("api").and(routes::api::create_filters(Arc::clone(
        &shared_connection_gatekeeper,
    )));

    let all_filters = api_filters.or(shutdown_filter).or(about_filter);

    log::info!("Initializing server");

    let server = warp::serve(
        all_filters
            .with(warp::cors().allow_any_origin())
            .recover(handle_rejection),
    );

    log::info!("Starting");

    let (socket_addr, server_listener) =
        server.bind_with_graceful_shutdown(endpoint_addr, async move {
            tokio::select! {
                _ = server_shutdown_rx.recv() => {}
                _ = signal::ctrl_c() => {}
            }
            log::info!("Stopping");
        });

    let server_listening = async move {
        // Give the server some time to become ready and start listening
        // before announcing the actual endpoint address, i.e. when using
        // an ephemeral port. The delay might need to be tuned depending
        // on how long the startup actually takes. Unfortunately warp does
        // not provide any signal when the server has started listening.
        sleep(WEB_SERVER_LISTENING_DELAY).await;

        // -> stderr
        log::info!("Listening on {socket_addr}");
        // -> stdout
        println!("{socket_addr}");
    };

    join!(server_listener, server_listening);

    shared_connection_gatekeeper.decommission();

    log::info!("Stopped");

    Ok(())
}
