//! End-to-end discovery scenarios against a scripted fake upstream.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use common::{service, test_config, FakeUpstream};
use randomedia_core::{Error, ScriptedSampler};
use serde_json::json;

fn location(name: &str) -> serde_json::Value {
    json!({
        "country": ["ee"],
        "display_name": name,
        "icon": format!("https://icons.example/{name}.png"),
        "url": format!("https://{name}.example/watch/9"),
        "id": format!("{name}-id"),
    })
}

#[tokio::test]
async fn movie_skips_candidates_without_collection() {
    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "movie/latest", json!({"id": 500000}))
            .route("utelly", "idlookup", |req| {
                Ok(match req.query_value("source_id") {
                    Some("87") => json!({
                        "id": 9,
                        "collection": {"id": 9, "locations": [location("netflix"), location("hbo")]}
                    }),
                    other => json!({"id": other, "collection": null}),
                })
            })
            .json(
                "tmdb",
                "movie/9",
                json!({
                    "id": 9,
                    "adult": false,
                    "imdb_id": "tt0000009",
                    "overview": "A film.",
                    "title": "Nine",
                    "status": "Released",
                    "original_language": "en",
                    "release_date": "1999-09-09"
                }),
            ),
    );
    let svc = service(&test_config(), &upstream);
    let mut sampler = ScriptedSampler::new([12, 87]);

    let payload = svc.random_movie(&mut sampler).await.unwrap();

    assert_eq!(payload.movie_info.tmdb_id, 9);
    assert_eq!(payload.movie_info.title.as_deref(), Some("Nine"));
    assert_eq!(payload.movie_info.language.as_deref(), Some("en"));
    assert_eq!(payload.streaming_info.len(), 2);
    assert_eq!(
        payload.streaming_info[0].streaming_name.as_deref(),
        Some("netflix")
    );

    let lookups = upstream.requests_to("utelly");
    assert_eq!(lookups.len(), 2);
    assert_eq!(lookups[0].query_value("source_id"), Some("12"));
    assert_eq!(lookups[1].query_value("source_id"), Some("87"));
    assert_eq!(lookups[1].query_value("country"), Some("EE"));
    assert_eq!(sampler.drawn(), 2);
}

#[tokio::test]
async fn show_is_enriched_with_trailers() {
    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "tv/latest", json!({"id": 1000}))
            .json(
                "tmdb",
                "tv/5",
                json!({
                    "id": 5,
                    "name": "Foo",
                    "first_air_date": "2020-05-01",
                    "number_of_episodes": 10,
                    "number_of_seasons": 1,
                    "status": "Ended",
                    "in_production": false
                }),
            )
            .json(
                "youtube",
                "search",
                json!({"items": [
                    {"id": {"videoId": "aaa"}, "snippet": {"title": "Foo Trailer", "channelTitle": "Studio", "description": "Official"}},
                    {"id": {"videoId": "bbb"}, "snippet": {"title": "Foo Teaser", "channelTitle": "Fans", "description": "Teaser"}}
                ]}),
            ),
    );
    let svc = service(&test_config(), &upstream);
    let mut sampler = ScriptedSampler::new([5]);

    let payload = svc.random_show(&mut sampler).await.unwrap();

    assert_eq!(payload.data.name, "Foo");
    assert_eq!(payload.data.release_year, Some(2020));
    assert_eq!(payload.trailers.len(), 2);
    assert_eq!(
        payload.trailers[0].url.as_deref(),
        Some("https://www.youtube.com/watch?v=aaa")
    );
    assert_eq!(
        payload.trailers[1].url.as_deref(),
        Some("https://www.youtube.com/watch?v=bbb")
    );

    let searches = upstream.requests_to("youtube");
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].query_value("q"), Some("Foo trailer 2020"));
}

#[tokio::test]
async fn artist_resamples_after_search_error() {
    let upstream = Arc::new(
        FakeUpstream::new()
            .route("spotify", "search", |req| {
                Ok(match req.query_value("offset") {
                    Some("1499") => json!({"error": {"status": 400, "message": "Invalid offset"}}),
                    _ => json!({"artists": {"total": 1500, "items": [{
                        "id": "art3",
                        "name": "The Threes",
                        "external_urls": {"spotify": "https://open.spotify.com/artist/art3"},
                        "followers": {"total": 4242}
                    }]}}),
                })
            })
            .json(
                "seatgeek",
                "events",
                json!({"events": [{
                    "id": 77,
                    "title": "The Threes Live",
                    "datetime_utc": "2026-12-01T20:00:00",
                    "type": "concert",
                    "venue": {"address": "1 Main St"},
                    "url": "https://seatgeek.com/e/77"
                }]}),
            ),
    );
    let svc = service(&test_config(), &upstream);
    let mut sampler = ScriptedSampler::new([1499, 3]);

    let payload = svc.random_artist(&mut sampler).await.unwrap();

    assert_eq!(upstream.requests_to("spotify").len(), 2);
    assert_eq!(payload.artist.name, "The Threes");
    assert_eq!(payload.artist.followers, Some(4242));
    assert_eq!(payload.events.len(), 1);
    assert_eq!(payload.events[0].address.as_deref(), Some("1 Main St"));

    let events = upstream.requests_to("seatgeek");
    assert_eq!(events[0].query_value("q"), Some("The Threes"));
}

#[tokio::test]
async fn stops_after_exactly_k_attempts() {
    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "movie/latest", json!({"id": 100}))
            .route("utelly", "idlookup", |req| {
                Ok(match req.query_value("source_id") {
                    Some("3") => json!({"id": 3, "collection": {"id": "c3", "locations": []}}),
                    _ => json!({}),
                })
            })
            .json("tmdb", "movie/3", json!({"id": 3, "title": "Three"})),
    );
    let svc = service(&test_config(), &upstream);
    let mut sampler = ScriptedSampler::new([1, 2, 3, 4, 5]);

    let payload = svc.random_movie(&mut sampler).await.unwrap();

    assert_eq!(payload.movie_info.tmdb_id, 3);
    assert!(payload.streaming_info.is_empty());
    assert_eq!(upstream.requests_to("utelly").len(), 3);
    assert_eq!(sampler.drawn(), 3);
}

#[tokio::test]
async fn exhausted_discovery_skips_detail_and_enrichment() {
    let mut config = test_config();
    config.discovery.max_attempts = 4;

    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "movie/latest", json!({"id": 100}))
            .json("tmdb", "tv/latest", json!({"id": 100}))
            .json("utelly", "idlookup", json!({"collection": null}))
            .json("spotify", "search", json!({"artists": {"items": []}})),
    );
    let svc = service(&config, &upstream);

    let err = svc
        .random_movie(&mut ScriptedSampler::new([1, 2]))
        .await
        .unwrap_err();
    assert_matches!(err, Error::Exhausted { attempts: 4, .. });
    assert_eq!(upstream.requests_to("utelly").len(), 4);

    // Unrouted tv/{id} answers 404 every time
    let err = svc
        .random_show(&mut ScriptedSampler::new([7]))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        Error::Exhausted { attempts: 4, ref last_failure, .. } if last_failure.is_some()
    );

    let err = svc
        .random_artist(&mut ScriptedSampler::new([10]))
        .await
        .unwrap_err();
    assert_matches!(err, Error::Exhausted { attempts: 4, .. });

    assert!(upstream.requests_to("youtube").is_empty());
    assert!(upstream.requests_to("seatgeek").is_empty());
    assert!(upstream
        .requests_to("tmdb")
        .iter()
        .all(|r| r.path.ends_with("latest") || r.path.starts_with("tv/")));
}

#[tokio::test]
async fn enrichment_failure_is_lenient_by_default() {
    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "tv/latest", json!({"id": 10}))
            .json("tmdb", "tv/4", json!({"id": 4, "name": "Quiet"})),
    );
    let svc = service(&test_config(), &upstream);

    let payload = svc
        .random_show(&mut ScriptedSampler::new([4]))
        .await
        .unwrap();

    assert_eq!(payload.data.name, "Quiet");
    assert!(payload.trailers.is_empty());
    assert_eq!(upstream.requests_to("youtube").len(), 1);
}

#[tokio::test]
async fn strict_enrichment_surfaces_failure() {
    let mut config = test_config();
    config.enrichment.strict = true;

    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "tv/latest", json!({"id": 10}))
            .json("tmdb", "tv/4", json!({"id": 4, "name": "Quiet"})),
    );
    let svc = service(&config, &upstream);

    let err = svc
        .random_show(&mut ScriptedSampler::new([4]))
        .await
        .unwrap_err();
    assert_matches!(err, Error::UpstreamStatus { status: 404, .. });
}

#[tokio::test]
async fn malformed_upstream_aborts_discovery() {
    let upstream = Arc::new(
        FakeUpstream::new()
            .json("tmdb", "movie/latest", json!({"id": 100}))
            .route("utelly", "idlookup", |req| {
                Err(Error::malformed(req.upstream, "expected JSON"))
            }),
    );
    let svc = service(&test_config(), &upstream);

    let err = svc
        .random_movie(&mut ScriptedSampler::new([1, 2, 3]))
        .await
        .unwrap_err();

    assert_matches!(err, Error::MalformedUpstream { .. });
    assert_eq!(upstream.requests_to("utelly").len(), 1);
}
