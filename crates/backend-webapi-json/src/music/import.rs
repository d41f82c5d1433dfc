// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;
use semval::prelude::*;

use minstrel_core::music::Music;
use minstrel_repo::music::MusicRepo as _;
use minstrel_repo_sqlite::{Connection as RepoConnection, DbConnection};

use crate::{Error, Result};

pub type RequestBody = Vec<minstrel_core_json::music::Music>;

/// Number of imported records.
pub type ResponseBody = u64;

/// Import records into an empty collection.
///
/// Administrative path for provisioning a fresh database, not exposed
/// through the HTTP API. A non-empty collection is left untouched and
/// reported as zero imported records. All records are validated before
/// any of them is inserted and the whole import happens in a single
/// transaction.
pub fn handle_request(
    connection: &mut DbConnection,
    request_body: RequestBody,
) -> Result<ResponseBody> {
    let created_at = jiff::Timestamp::now().as_millisecond();
    let records = request_body
        .into_iter()
        .map(|music| {
            let music = Music::from(music);
            if let Err(context) = music.validate() {
                return Err(Error::BadRequest(anyhow::anyhow!(
                    "invalid music record \"{music}\": {context:?}"
                )));
            }
            Ok(music)
        })
        .collect::<Result<Vec<_>>>()?;
    connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        if repo.count_music()? > 0 {
            log::info!("Skipping import into non-empty collection");
            return Ok(0);
        }
        let mut imported = 0;
        for music in &records {
            repo.insert_music(created_at, music)?;
            imported += 1;
        }
        log::info!("Imported {imported} music record(s)");
        Ok(imported)
    })
}
