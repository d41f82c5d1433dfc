// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Synchronous request handlers of the JSON/HTTP web API.
//!
//! Each operation lives in its own module and executes a single
//! database transaction on the borrowed connection.

use serde::Serialize;
use thiserror::Error;

use minstrel_repo::RepoError;

pub mod music;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    DatabaseTransaction(#[from] diesel::result::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Envelope around the payload of successful responses.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize, PartialEq, Eq))]
pub struct DataBody<T> {
    pub data: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_data_body_envelope() {
        let body = DataBody { data: "hello" };
        assert_eq!(
            serde_json::json!({ "data": "hello" }),
            serde_json::to_value(body).unwrap()
        );
    }
}
