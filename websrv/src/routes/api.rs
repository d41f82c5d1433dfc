// SPDX-FileCopyrightText: Copyright (C) 2025-2026 The minstrel authors
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::Arc;

use warp::{Filter, Reply, filters::BoxedFilter};

use minstrel_backend_webapi_json as api;
use minstrel_storage_sqlite::connection::gatekeeper::Gatekeeper as DatabaseConnectionGatekeeper;
use minstrel_websrv_warp_sqlite::{self as websrv, ApiReply};

pub(crate) fn create_filters(
    shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>,
) -> BoxedFilter<(impl Reply,)> {
    let shared_connection_gatekeeper =
        warp::any().map(move || Arc::clone(&shared_connection_gatekeeper));

    log::info!("Creating API routes");

    let music_path = warp::path("music");

    let music_load_next = warp::get()
        .and(music_path)
        .and(warp::path("next"))
        .and(warp::path::param::<u64>())
        .and(warp::path::end())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |position,
                  shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::music::load_next::handle_request(&mut pooled_connection, position)
                    },
                )
                .await
                .and_then(|response_body| websrv::json_reply(ApiReply::Data(response_body)))
            },
        );

    let music_load_random = warp::get()
        .and(music_path)
        .and(warp::path("random"))
        .and(warp::path::end())
        .and(shared_connection_gatekeeper.clone())
        .and_then(
            move |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::music::load_random::handle_request(&mut pooled_connection)
                    },
                )
                .await
                .and_then(|response_body| websrv::json_reply(ApiReply::Data(response_body)))
            },
        );

    let music_load_all = warp::get()
        .and(music_path)
        .and(warp::path::end())
        .and(shared_connection_gatekeeper)
        .and_then(
            move |shared_connection_gatekeeper: Arc<DatabaseConnectionGatekeeper>| async move {
                websrv::spawn_blocking_read_task(
                    &shared_connection_gatekeeper,
                    move |mut pooled_connection| {
                        api::music::load_all::handle_request(&mut pooled_connection)
                    },
                )
                .await
                .and_then(|response_body| websrv::json_reply(ApiReply::Data(response_body)))
            },
        );

    music_load_next
        .or(music_load_random)
        .or(music_load_all)
        .boxed()
}

#[cfg(test)]
mod tests {
    use std::num::{NonZeroU32, NonZeroU64};

    use warp::http::{StatusCode, header::CONTENT_TYPE};

    use minstrel_storage_sqlite::connection::{
        create_connection_pool,
        gatekeeper::{Config as GatekeeperConfig, Gatekeeper},
        get_pooled_connection,
    };
    use minstrel_websrv_warp_sqlite::handle_rejection;

    use super::*;

    const ACQUIRE_TIMEOUT_MILLIS: NonZeroU64 = NonZeroU64::new(10_000).unwrap();

    fn music_json(suffix: char) -> serde_json::Value {
        serde_json::json!({
            "title": format!("music_{suffix}"),
            "author": format!("author_{suffix}"),
            "cover": format!("http://www.example.com/{suffix}.jpg"),
            "douban": format!("http://music.douban.com/{suffix}"),
            "mp3": format!("http://www.example.com/{suffix}.mp3"),
            "ogg": format!("http://www.example.com/{suffix}.ogg"),
        })
    }

    async fn provision_gatekeeper(
        seed: &[serde_json::Value],
    ) -> anyhow::Result<Arc<Gatekeeper>> {
        // A pool of max. size 1 keeps all requests on the same in-memory
        // database connection.
        let connection_pool = create_connection_pool(":memory:", NonZeroU32::MIN)?;
        {
            let mut connection = get_pooled_connection(&connection_pool)?;
            minstrel_repo_sqlite::initialize_database(&mut connection)?;
            minstrel_repo_sqlite::run_migrations(&mut connection)
                .map_err(|err| anyhow::anyhow!(err.to_string()))?;
        }
        let gatekeeper = Arc::new(Gatekeeper::new(
            connection_pool,
            GatekeeperConfig {
                acquire_read_timeout_millis: ACQUIRE_TIMEOUT_MILLIS,
                acquire_write_timeout_millis: ACQUIRE_TIMEOUT_MILLIS,
            },
        ));
        if !seed.is_empty() {
            let request_body: api::music::import::RequestBody =
                serde_json::from_value(serde_json::Value::Array(seed.to_vec()))?;
            let expected = request_body.len() as u64;
            let imported = gatekeeper
                .spawn_blocking_write_task(move |mut pooled_connection| {
                    api::music::import::handle_request(&mut pooled_connection, request_body)
                })
                .await??;
            assert_eq!(expected, imported);
        }
        Ok(gatekeeper)
    }

    #[tokio::test]
    async fn load_next_music() -> anyhow::Result<()> {
        let seeded = [music_json('c'), music_json('d')];
        let gatekeeper = provision_gatekeeper(&seeded).await?;
        let filters = create_filters(gatekeeper);

        let response = warp::test::request()
            .path("/music/next/1")
            .reply(&filters)
            .await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert!(seeded.contains(&body["data"]));
        Ok(())
    }

    #[tokio::test]
    async fn load_next_music_with_position_out_of_range() -> anyhow::Result<()> {
        let seeded = [music_json('c'), music_json('d')];
        let gatekeeper = provision_gatekeeper(&seeded).await?;
        let filters = create_filters(gatekeeper);

        let response = warp::test::request()
            .path("/music/next/10000")
            .reply(&filters)
            .await;
        assert_eq!(StatusCode::OK, response.status());
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert!(seeded.contains(&body["data"]));
        Ok(())
    }

    #[tokio::test]
    async fn load_random_music() -> anyhow::Result<()> {
        let seeded = [music_json('c'), music_json('d')];
        let gatekeeper = provision_gatekeeper(&seeded).await?;
        let filters = create_filters(gatekeeper);

        let response = warp::test::request()
            .path("/music/random")
            .reply(&filters)
            .await;
        assert_eq!(StatusCode::OK, response.status());
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert!(seeded.contains(&body["data"]));
        Ok(())
    }

    #[tokio::test]
    async fn load_all_music_in_stable_order() -> anyhow::Result<()> {
        let seeded = [music_json('c'), music_json('d')];
        let gatekeeper = provision_gatekeeper(&seeded).await?;
        let filters = create_filters(gatekeeper);

        let response = warp::test::request().path("/music").reply(&filters).await;
        assert_eq!(StatusCode::OK, response.status());
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert_eq!(serde_json::Value::from(seeded.to_vec()), body["data"]);
        Ok(())
    }

    #[tokio::test]
    async fn load_random_music_from_empty_store() -> anyhow::Result<()> {
        let gatekeeper = provision_gatekeeper(&[]).await?;
        let filters = create_filters(gatekeeper).recover(handle_rejection);

        let response = warp::test::request()
            .path("/music/random")
            .reply(&filters)
            .await;
        assert_eq!(StatusCode::NOT_FOUND, response.status());
        // The error response is still well-formed JSON.
        let body: serde_json::Value = serde_json::from_slice(response.body())?;
        assert_eq!(StatusCode::NOT_FOUND.as_u16(), body["code"]);
        Ok(())
    }
}
