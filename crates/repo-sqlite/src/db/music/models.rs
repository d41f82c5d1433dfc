// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;

use minstrel_core::music::Music;
use minstrel_repo::music::RecordHeader;

use super::schema::music;
use crate::prelude::{RowId, TimestampMillis};

#[derive(Debug, Queryable)]
pub(crate) struct QueryableRecord {
    pub(crate) row_id: RowId,
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) cover: String,
    pub(crate) douban: String,
    pub(crate) mp3: String,
    pub(crate) ogg: String,
}

impl From<QueryableRecord> for (RecordHeader, Music) {
    fn from(from: QueryableRecord) -> Self {
        let QueryableRecord {
            row_id,
            row_created_ms,
            row_updated_ms,
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        } = from;
        let header = RecordHeader {
            id: row_id.into(),
            created_at: row_created_ms,
            updated_at: row_updated_ms,
        };
        let music = Music {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        };
        (header, music)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = music)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) row_created_ms: TimestampMillis,
    pub(crate) row_updated_ms: TimestampMillis,
    pub(crate) title: &'a str,
    pub(crate) author: &'a str,
    pub(crate) cover: &'a str,
    pub(crate) douban: &'a str,
    pub(crate) mp3: &'a str,
    pub(crate) ogg: &'a str,
}

impl<'a> InsertableRecord<'a> {
    pub(crate) fn bind(created_at: TimestampMillis, created_music: &'a Music) -> Self {
        let Music {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        } = created_music;
        Self {
            row_created_ms: created_at,
            row_updated_ms: created_at,
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        }
    }
}
