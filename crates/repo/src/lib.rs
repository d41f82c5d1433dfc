// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Storage-agnostic repository types and traits.

use thiserror::Error;

#[macro_use]
mod macros;

pub mod music;

/// Untyped row identifier of the underlying storage.
pub type RecordId = i64;

/// Timestamp in milliseconds since the Unix epoch.
pub type TimestampMillis = i64;

/// Storage bookkeeping data of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader<Id> {
    pub id: Id,
    pub created_at: TimestampMillis,
    pub updated_at: TimestampMillis,
}

#[derive(Error, Debug)]
pub enum RepoError {
    /// The repository does not contain any records.
    #[error("empty collection")]
    EmptyCollection,

    #[error("not found")]
    NotFound,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
