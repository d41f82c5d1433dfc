// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use minstrel_core_json::music::Music;
use minstrel_repo::music::MusicRepo as _;
use minstrel_repo_sqlite::{Connection as RepoConnection, DbConnection};

use crate::{DataBody, Error, Result};

pub type ResponseBody = DataBody<Vec<Music>>;

/// Load the whole collection in stable ordering.
pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        let data = repo
            .load_all_music()?
            .into_iter()
            .map(|(_, music)| music.into())
            .collect();
        Ok(DataBody { data })
    })
}
