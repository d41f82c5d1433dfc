// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Glue between the warp server, the blocking database tasks, and the
//! synchronous request handlers.

use std::{
    convert::Infallible, error::Error as StdError, result::Result as StdResult,
};

use serde::Serialize;
use thiserror::Error;
use warp::{
    Reply,
    http::StatusCode,
    reject::{self, InvalidHeader, InvalidQuery, MethodNotAllowed, Reject, Rejection},
};

use minstrel_backend_webapi_json as api;
use minstrel_repo::RepoError;
use minstrel_storage_sqlite::{
    self as db,
    connection::{PooledConnection, gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper},
};

mod reply;
pub use reply::ApiReply;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("not found")]
    NotFound,

    /// The store does not contain any music records.
    #[error("no music records available")]
    EmptyCollection,

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        use api::Error::*;
        match err {
            BadRequest(err) => Self::BadRequest(err),
            Repository(err) => match err {
                RepoError::EmptyCollection => Self::EmptyCollection,
                RepoError::NotFound => Self::NotFound,
                RepoError::Other(err) => Self::Other(err),
            },
            DatabaseTransaction(err) => Self::Other(err.into()),
            Other(err) => Self::Other(err),
        }
    }
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        use db::Error::*;
        match err {
            Database(err) => Self::Other(err.into()),
            DatabaseConnection(err) => Self::Other(err.into()),
            DatabaseConnectionPool(err) => Self::Other(err.into()),
            TaskScheduling(err) => Self::Other(err.into()),
            TaskTimeout { reason } => Self::Timeout { reason },
            Other(err) => Self::Other(err),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

fn after_blocking_task_finished<T, E1, E2>(
    res: StdResult<StdResult<T, E1>, E2>,
) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

pub async fn spawn_blocking_read_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_read_task(handler).await)
}

pub async fn spawn_blocking_write_task<H, T, E>(
    gatekeeper: &DatabaseConnectionGatekeeper,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(PooledConnection) -> StdResult<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<Error> + Send + 'static,
{
    after_blocking_task_finished(gatekeeper.spawn_blocking_write_task(handler).await)
}

/// Render a normalized handler reply, rejecting on serialization failure.
pub fn json_reply<T: Serialize>(reply: ApiReply<T>) -> StdResult<warp::reply::Response, Rejection> {
    reply.into_json_response().map_err(reject_on_error)
}

/// An API error serializable to JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponseBody {
    code: u16,
    message: String,
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_string()
}

#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let message;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = status_code_to_string(code);
    } else if let Some(err) = reject.find::<InvalidHeader>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = err
            .source()
            .map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<Error>() {
        match err {
            Error::BadRequest(err) => {
                code = StatusCode::BAD_REQUEST;
                message = err.to_string();
            }
            Error::NotFound => {
                code = StatusCode::NOT_FOUND;
                message = status_code_to_string(code);
            }
            Error::EmptyCollection => {
                code = StatusCode::NOT_FOUND;
                message = err.to_string();
            }
            Error::Timeout { reason } => {
                code = StatusCode::REQUEST_TIMEOUT;
                message = reason.clone();
            }
            Error::Serialization(err) => {
                code = StatusCode::INTERNAL_SERVER_ERROR;
                message = err.to_string();
            }
            Error::Other(err) => {
                code = StatusCode::INTERNAL_SERVER_ERROR;
                message = err.to_string();
            }
        }
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // This must have the least priority, because most rejections
        // contain a MethodNotAllowed element!
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = err.to_string();
    } else {
        log::error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = format!("{reject:?}");
    }

    let json_reply = warp::reply::json(&ErrorResponseBody {
        code: code.as_u16(),
        message,
    });

    Ok(warp::reply::with_status(json_reply, code))
}
