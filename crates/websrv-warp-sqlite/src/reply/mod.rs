// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::Serialize;
use warp::{
    http::{StatusCode, header},
    reply::Response,
};

use crate::{Error, Result};

/// Normalized return value of an API request handler.
///
/// Handlers either produce a data value that becomes a JSON body,
/// a data value with an explicit status code, or a response that
/// has already been built elsewhere.
#[derive(Debug)]
pub enum ApiReply<T> {
    /// Serialize the value as JSON body with status 200.
    Data(T),

    /// Serialize the value as JSON body with the given status.
    DataWithStatus(T, StatusCode),

    /// Pass through an already-built response unchanged.
    Raw(Response),
}

fn json_response<T: Serialize>(data: &T, status: StatusCode) -> Result<Response> {
    let body = serde_json::to_vec(data).map_err(Error::Serialization)?;
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    Ok(response)
}

impl<T: Serialize> ApiReply<T> {
    /// Convert into an HTTP response with a JSON body.
    ///
    /// A [`Raw`](Self::Raw) reply is returned unchanged, without
    /// reinterpreting its body or content type. Serialization failures
    /// surface as [`Error::Serialization`].
    pub fn into_json_response(self) -> Result<Response> {
        match self {
            Self::Data(data) => json_response(&data, StatusCode::OK),
            Self::DataWithStatus(data, status) => json_response(&data, status),
            Self::Raw(response) => Ok(response),
        }
    }
}
