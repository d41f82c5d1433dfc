// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde::{Deserialize, Serialize};

mod _core {
    pub(super) use minstrel_core::music::*;
}

/// JSON representation of a music record.
///
/// The field names are part of the public API and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
#[serde(deny_unknown_fields)]
pub struct Music {
    title: String,
    author: String,
    cover: String,
    douban: String,
    mp3: String,
    ogg: String,
}

impl From<Music> for _core::Music {
    fn from(from: Music) -> Self {
        let Music {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        } = from;
        Self {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        }
    }
}

impl From<_core::Music> for Music {
    fn from(from: _core::Music) -> Self {
        let _core::Music {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        } = from;
        Self {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        }
    }
}
