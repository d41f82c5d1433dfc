// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn valid_music() -> Music {
    Music {
        title: "music_a".into(),
        author: "author_a".into(),
        cover: "http://www.example.com/a.jpg".into(),
        douban: "http://music.douban.com/a".into(),
        mp3: "http://www.example.com/a.mp3".into(),
        ogg: "http://www.example.com/a.ogg".into(),
    }
}

#[test]
fn validate_valid_music() {
    assert!(valid_music().validate().is_ok());
}

#[test]
fn validate_blank_title() {
    let music = Music {
        title: " ".into(),
        ..valid_music()
    };
    assert!(music.validate().is_err());
}

#[test]
fn validate_empty_author() {
    let music = Music {
        author: String::new(),
        ..valid_music()
    };
    assert!(music.validate().is_err());
}

#[test]
fn validate_malformed_cover_url() {
    let music = Music {
        cover: "not a url".into(),
        ..valid_music()
    };
    assert!(music.validate().is_err());
}

#[test]
fn validate_malformed_stream_urls() {
    let music = Music {
        mp3: "/relative/path/a.mp3".into(),
        ogg: String::new(),
        ..valid_music()
    };
    assert!(music.validate().is_err());
}

#[test]
fn display_contains_title_and_author() {
    let music = valid_music();
    let displayed = music.to_string();
    assert!(displayed.contains(&music.title));
    assert!(displayed.contains(&music.author));
}
