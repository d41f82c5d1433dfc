// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use semval::prelude::*;
use url::Url;

/// A single music track with its presentation metadata.
///
/// All fields are mandatory. The four URL fields are kept as plain
/// strings and only checked for well-formedness during validation,
/// i.e. when records enter the system through the import path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Music {
    pub title: String,

    pub author: String,

    /// URL of a cover image.
    pub cover: String,

    /// URL of the external page describing the track.
    pub douban: String,

    /// URL of the MP3 encoding.
    pub mp3: String,

    /// URL of the Ogg/Vorbis encoding of the same track.
    pub ogg: String,
}

impl fmt::Display for Music {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { title, author, .. } = self;
        write!(f, "{title} - {author}")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MusicInvalidity {
    TitleEmpty,
    AuthorEmpty,
    CoverUrlInvalid,
    DoubanUrlInvalid,
    Mp3UrlInvalid,
    OggUrlInvalid,
}

fn is_invalid_url(url: &str) -> bool {
    Url::parse(url).is_err()
}

impl Validate for Music {
    type Invalidity = MusicInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let Self {
            title,
            author,
            cover,
            douban,
            mp3,
            ogg,
        } = self;
        ValidationContext::new()
            .invalidate_if(title.trim().is_empty(), Self::Invalidity::TitleEmpty)
            .invalidate_if(author.trim().is_empty(), Self::Invalidity::AuthorEmpty)
            .invalidate_if(is_invalid_url(cover), Self::Invalidity::CoverUrlInvalid)
            .invalidate_if(is_invalid_url(douban), Self::Invalidity::DoubanUrlInvalid)
            .invalidate_if(is_invalid_url(mp3), Self::Invalidity::Mp3UrlInvalid)
            .invalidate_if(is_invalid_url(ogg), Self::Invalidity::OggUrlInvalid)
            .into()
    }
}

#[cfg(test)]
mod tests;
