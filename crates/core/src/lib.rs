// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core domain model, independent of any storage or serialization format.

pub mod music;

pub use music::{Music, MusicInvalidity};
