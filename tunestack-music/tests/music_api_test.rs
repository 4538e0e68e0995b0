/// Integration tests for the Music Service HTTP API

mod common;

use axum::http::StatusCode;
use common::TestContext;
use serde_json::json;
use tunestack_music::models::song::Song;

#[tokio::test]
async fn test_create_then_fetch_returns_same_song() {
    let ctx = TestContext::new().await.unwrap();

    let created = ctx
        .create("/songs", json!({"title": "X", "artist": "Y"}))
        .await;
    let id = created["id"].as_i64().expect("generated id");
    assert_eq!(created["title"], "X");
    assert_eq!(created["artist"], "Y");
    assert!(created["album"].is_null());
    assert!(created["duration_seconds"].is_null());

    let (status, fetched) = ctx.send("GET", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_song_validation() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .send(
            "POST",
            "/songs",
            Some(json!({"title": "", "artist": "Y", "duration_seconds": 0})),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["duration_seconds", "title"]);

    // Missing required field is rejected by the JSON extractor
    let (status, _) = ctx
        .send("POST", "/songs", Some(json!({"title": "X"})))
        .await;
    assert!(status.is_client_error());

    assert_eq!(Song::count(&ctx.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_changes_only_supplied_fields() {
    let ctx = TestContext::new().await.unwrap();
    let created = ctx
        .create(
            "/songs",
            json!({
                "title": "Blue in Green",
                "artist": "Miles Davis",
                "album": "Kind of Blue",
                "release_year": 1959
            }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = ctx
        .send(
            "PUT",
            &format!("/songs/{id}"),
            Some(json!({"genre": "Jazz", "duration_seconds": 337})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["genre"], "Jazz");
    assert_eq!(updated["duration_seconds"], 337);
    assert_eq!(updated["title"], created["title"]);
    assert_eq!(updated["album"], created["album"]);
    assert_eq!(updated["release_year"], created["release_year"]);
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, _) = ctx
        .send("PUT", "/songs/999", Some(json!({"genre": "Jazz"})))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_with_null_clears_field() {
    let ctx = TestContext::new().await.unwrap();
    let created = ctx
        .create(
            "/songs",
            json!({"title": "Naima", "artist": "John Coltrane", "album": "Giant Steps", "genre": "Jazz"}),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = ctx
        .send("PUT", &format!("/songs/{id}"), Some(json!({"album": null})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["album"].is_null());
    assert_eq!(updated["genre"], "Jazz");

    let (status, updated) = ctx
        .send("PUT", &format!("/songs/{id}"), Some(json!({"duration_seconds": 0})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(updated["details"][0]["field"], "duration_seconds");
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.send("GET", "/songs/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");

    let (status, body) = ctx.send("POST", "/songs", Some(json!({"title": "X"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    let (status, body) = ctx
        .send("PUT", "/songs/1", Some(json!({"duration_seconds": "long"})))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"][0]["field"], "body");

    let (status, body) = ctx.send("GET", "/songs?limit=many", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_list_songs_with_artist_filter_and_paging() {
    let ctx = TestContext::new().await.unwrap();
    for (title, artist) in [
        ("So What", "Miles Davis"),
        ("Naima", "John Coltrane"),
        ("Freddie Freeloader", "Miles Davis"),
    ] {
        ctx.create("/songs", json!({"title": title, "artist": artist}))
            .await;
    }

    let (status, all) = ctx.send("GET", "/songs", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, miles) = ctx.send("GET", "/songs?artist=Miles%20Davis", None).await;
    let titles: Vec<&str> = miles
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["So What", "Freddie Freeloader"]);

    let (_, page) = ctx.send("GET", "/songs?limit=1&offset=1", None).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["title"], "Naima");
}

#[tokio::test]
async fn test_delete_song() {
    let ctx = TestContext::new().await.unwrap();
    let created = ctx
        .create("/songs", json!({"title": "X", "artist": "Y"}))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = ctx.send("DELETE", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Song {id} deleted successfully"));

    let (status, _) = ctx.send("GET", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx.send("DELETE", &format!("/songs/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_artist_endpoints() {
    let ctx = TestContext::new().await.unwrap();

    let artist = ctx
        .create(
            "/artists",
            json!({"name": "Nina Simone", "country": "US"}),
        )
        .await;
    let id = artist["id"].as_i64().unwrap();

    let (status, _) = ctx
        .send("POST", "/artists", Some(json!({"name": "nina simone"})))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, fetched) = ctx.send("GET", &format!("/artists/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, artist);

    let (_, list) = ctx.send("GET", "/artists", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = ctx.send("DELETE", &format!("/artists/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ctx.send("GET", &format!("/artists/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_album_endpoints() {
    let ctx = TestContext::new().await.unwrap();

    let album = ctx
        .create(
            "/albums",
            json!({"title": "A Love Supreme", "artist": "John Coltrane", "release_year": 1965}),
        )
        .await;
    ctx.create("/albums", json!({"title": "Kind of Blue", "artist": "Miles Davis"}))
        .await;
    let id = album["id"].as_i64().unwrap();

    let (status, fetched) = ctx.send("GET", &format!("/albums/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, album);

    let (_, filtered) = ctx
        .send("GET", "/albums?artist=John%20Coltrane", None)
        .await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);

    let (status, _) = ctx.send("DELETE", &format!("/albums/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = ctx.send("DELETE", &format!("/albums/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_banner_and_health() {
    let ctx = TestContext::new().await.unwrap();

    let (status, banner) = ctx.send("GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(banner["service"], "Music Service");

    let (status, health) = ctx.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");

    let (status, doc) = ctx.send("GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/songs/{id}"]["put"].is_object());
}
