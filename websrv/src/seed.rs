// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use minstrel_backend_webapi_json as api;
use minstrel_storage_sqlite::connection::gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper;

/// Import music records from a JSON seed file into an empty store.
///
/// The file must contain an array of music records. A non-empty store
/// is left untouched.
pub(crate) async fn import_seed_file(
    shared_connection_gatekeeper: &DatabaseConnectionGatekeeper,
    file_path: &Path,
) -> anyhow::Result<()> {
    log::info!(
        "Importing music records from seed file: {}",
        file_path.display()
    );
    let file = File::open(file_path)
        .with_context(|| format!("failed to open seed file: {}", file_path.display()))?;
    let request_body: api::music::import::RequestBody =
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to parse seed file: {}", file_path.display()))?;
    let imported = shared_connection_gatekeeper
        .spawn_blocking_write_task(move |mut pooled_connection| {
            api::music::import::handle_request(&mut pooled_connection, request_body)
        })
        .await??;
    log::info!("Imported {imported} music record(s) from seed file");
    Ok(())
}
