// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::Connection as _;

use minstrel_core_json::music::Music;
use minstrel_repo::music::MusicRepo as _;
use minstrel_repo_sqlite::{Connection as RepoConnection, DbConnection};

use crate::{DataBody, Error, Result};

pub type ResponseBody = DataBody<Music>;

/// Load a uniformly random record from the collection.
pub fn handle_request(connection: &mut DbConnection) -> Result<ResponseBody> {
    connection.transaction::<_, Error, _>(|connection| {
        let mut repo = RepoConnection::new(connection);
        let (_, music) = repo.load_music_random()?;
        Ok(DataBody { data: music.into() })
    })
}
