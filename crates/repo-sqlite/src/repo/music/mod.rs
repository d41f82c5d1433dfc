// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::dsl::count_star;
use rand::RngExt as _;

use minstrel_core::music::Music;
use minstrel_repo::{
    RepoError, RepoResult, TimestampMillis,
    music::{MusicRepo, RecordHeader, RecordId},
};

use crate::{
    db::music::{models::*, schema::*},
    prelude::*,
};

fn load_music_at_offset(
    connection: &mut DbConnection,
    offset: i64,
) -> RepoResult<(RecordHeader, Music)> {
    music::table
        .order_by(music::row_id.asc())
        .offset(offset)
        .first::<QueryableRecord>(connection)
        .map_err(repo_error)
        .map(Into::into)
}

impl MusicRepo for Connection<'_> {
    fn insert_music(
        &mut self,
        created_at: TimestampMillis,
        created_music: &Music,
    ) -> RepoResult<RecordId> {
        let insertable = InsertableRecord::bind(created_at, created_music);
        let query = diesel::insert_into(music::table)
            .values(&insertable)
            .returning(music::row_id);
        let row_id = query.get_result::<RowId>(self.as_mut()).map_err(repo_error)?;
        Ok(row_id.into())
    }

    fn count_music(&mut self) -> RepoResult<u64> {
        music::table
            .select(count_star())
            .first::<i64>(self.as_mut())
            .map_err(repo_error)
            .map(|count| count as u64)
    }

    fn load_all_music(&mut self) -> RepoResult<Vec<(RecordHeader, Music)>> {
        music::table
            .order_by(music::row_id.asc())
            .load::<QueryableRecord>(self.as_mut())
            .map_err(repo_error)
            .map(|records| records.into_iter().map(Into::into).collect())
    }

    fn load_music_at(&mut self, position: u64) -> RepoResult<(RecordHeader, Music)> {
        let count = self.count_music()?;
        if count == 0 {
            return Err(RepoError::EmptyCollection);
        }
        // Out-of-range positions wrap around instead of failing.
        let offset = position % count;
        load_music_at_offset(self.as_mut(), offset as i64)
    }

    fn load_music_random(&mut self) -> RepoResult<(RecordHeader, Music)> {
        let count = self.count_music()?;
        if count == 0 {
            return Err(RepoError::EmptyCollection);
        }
        let offset = rand::rng().random_range(0..count);
        load_music_at_offset(self.as_mut(), offset as i64)
    }
}

#[cfg(test)]
mod tests;
