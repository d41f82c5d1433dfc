// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use minstrel_core::music::Music;

use crate::{RepoResult, TimestampMillis};

record_id_newtype!(RecordId);

pub type RecordHeader = crate::RecordHeader<RecordId>;

/// Repository of music records.
///
/// The collection has a stable ordering by ascending record id,
/// i.e. insertion order. All load operations refer to positions
/// within this ordering.
pub trait MusicRepo {
    /// Insert a new record.
    ///
    /// Only used by the administrative import path, never exposed
    /// through the HTTP API.
    fn insert_music(
        &mut self,
        created_at: TimestampMillis,
        created_music: &Music,
    ) -> RepoResult<RecordId>;

    fn count_music(&mut self) -> RepoResult<u64>;

    /// Load the whole collection in stable ordering.
    fn load_all_music(&mut self) -> RepoResult<Vec<(RecordHeader, Music)>>;

    /// Load the record at the given position in the stable ordering.
    ///
    /// Out-of-range positions wrap around, i.e. the effective position
    /// is `position % count`. Every non-negative position maps to a
    /// valid record unless the collection is empty, which fails with
    /// [`RepoError::EmptyCollection`](crate::RepoError::EmptyCollection).
    fn load_music_at(&mut self, position: u64) -> RepoResult<(RecordHeader, Music)>;

    /// Load a uniformly random record from the collection.
    ///
    /// Fails with [`RepoError::EmptyCollection`](crate::RepoError::EmptyCollection)
    /// when the collection is empty.
    fn load_music_random(&mut self) -> RepoResult<(RecordHeader, Music)>;
}
