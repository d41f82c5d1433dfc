// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use test_log::test;

use minstrel_core::music::Music;
use minstrel_repo::{RepoError, TimestampMillis, music::MusicRepo};

use crate::{DbConnection, tests::*};

const CREATED_AT: TimestampMillis = 1_700_000_000_000;

struct Fixture {
    db: DbConnection,
}

impl Fixture {
    fn new() -> TestResult<Self> {
        let db = establish_connection()?;
        Ok(Self { db })
    }
}

fn sample_music(suffix: char) -> Music {
    Music {
        title: format!("music_{suffix}"),
        author: format!("author_{suffix}"),
        cover: format!("http://www.example.com/{suffix}.jpg"),
        douban: format!("http://music.douban.com/{suffix}"),
        mp3: format!("http://www.example.com/{suffix}.mp3"),
        ogg: format!("http://www.example.com/{suffix}.ogg"),
    }
}

#[test]
fn insert_music_roundtrip() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let music = sample_music('a');
    db.insert_music(CREATED_AT, &music)?;

    let all = db.load_all_music()?;
    assert_eq!(1, all.len());
    let (header, loaded) = &all[0];
    assert_eq!(CREATED_AT, header.created_at);
    assert_eq!(CREATED_AT, header.updated_at);
    assert_eq!(&music, loaded);
    Ok(())
}

#[test]
fn load_all_music_in_insertion_order() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let first = sample_music('a');
    let second = sample_music('b');
    let first_id = db.insert_music(CREATED_AT, &first)?;
    let second_id = db.insert_music(CREATED_AT, &second)?;
    assert!(first_id < second_id);

    assert_eq!(2, db.count_music()?);
    let all = db.load_all_music()?;
    assert_eq!(
        vec![first, second],
        all.into_iter().map(|(_, music)| music).collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn load_music_at_position_in_range() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let first = sample_music('a');
    let second = sample_music('b');
    db.insert_music(CREATED_AT, &first)?;
    db.insert_music(CREATED_AT, &second)?;

    assert_eq!(first, db.load_music_at(0)?.1);
    assert_eq!(second, db.load_music_at(1)?.1);
    Ok(())
}

#[test]
fn load_music_at_position_out_of_range_wraps_around() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let first = sample_music('a');
    let second = sample_music('b');
    db.insert_music(CREATED_AT, &first)?;
    db.insert_music(CREATED_AT, &second)?;

    // position % count
    assert_eq!(first, db.load_music_at(2)?.1);
    assert_eq!(second, db.load_music_at(3)?.1);
    assert_eq!(first, db.load_music_at(10_000)?.1);
    assert_eq!(second, db.load_music_at(10_001)?.1);
    Ok(())
}

#[test]
fn load_music_at_position_from_empty_collection_fails() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.load_music_at(0),
        Err(RepoError::EmptyCollection)
    ));
    Ok(())
}

#[test]
fn load_music_random_from_empty_collection_fails() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    assert!(matches!(
        db.load_music_random(),
        Err(RepoError::EmptyCollection)
    ));
    Ok(())
}

#[test]
fn load_music_random_reaches_every_record() -> TestResult<()> {
    let mut fixture = Fixture::new()?;
    let mut db = crate::Connection::new(&mut fixture.db);

    let first = sample_music('a');
    let second = sample_music('b');
    db.insert_music(CREATED_AT, &first)?;
    db.insert_music(CREATED_AT, &second)?;

    let mut first_loaded = false;
    let mut second_loaded = false;
    // Both records must eventually be loaded. The probability that one
    // of them is missed in all iterations is less than 2^-63.
    for _ in 0..64 {
        let (_, loaded) = db.load_music_random()?;
        if loaded == first {
            first_loaded = true;
        } else if loaded == second {
            second_loaded = true;
        } else {
            panic!("loaded music that has never been inserted: {loaded:?}");
        }
        if first_loaded && second_loaded {
            break;
        }
    }
    assert!(first_loaded);
    assert!(second_loaded);
    Ok(())
}
