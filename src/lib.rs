// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Facade crate that re-exports the sub-crates of the workspace.
//!
//! The individual components are gated by features to avoid pulling
//! native dependencies like SQLite into builds that only need the
//! portable domain model.

pub use minstrel_core as core;

#[cfg(feature = "json")]
pub use minstrel_core_json as core_json;

#[cfg(feature = "repo")]
pub use minstrel_repo as repo;

#[cfg(feature = "sqlite")]
pub use minstrel_repo_sqlite as repo_sqlite;

#[cfg(feature = "sqlite")]
pub use minstrel_storage_sqlite as storage_sqlite;

#[cfg(feature = "backend")]
pub use minstrel_backend_webapi_json as backend_webapi_json;
