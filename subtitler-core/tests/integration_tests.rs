//! Integration tests for subtitler-core
//!
//! Builds the manager from configuration against mock upstreams and drives
//! aggregate search and download through the public API.
//!
//! Run with: cargo test --test integration_tests

use subtitler_core::{
    bootstrap::init_manager, models::ContentKind, Config, PostFilters, ProviderContext, ProviderError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(subx: &MockServer, opensubtitles: &MockServer) -> Config {
    let mut config = Config::default();

    config.providers.subx.base_url = format!("{}/api", subx.uri());
    config.providers.subx.api_key = "subx-key".to_string();

    config.providers.opensubtitles.enabled = true;
    config.providers.opensubtitles.base_url = opensubtitles.uri();
    config.providers.opensubtitles.api_key = "os-key".to_string();
    config.providers.opensubtitles.username = "user".to_string();
    config.providers.opensubtitles.password = "pass".to_string();

    config
}

async fn mount_subx_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/subtitles/search"))
        .and(header("authorization", "Bearer subx-key"))
        .and(query_param("title", "dune"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {"id": "a1", "title": "Dune (2021)", "description": "BluRay 1080p de RARBG"},
                {"id": "a2", "title": "Dune (2021)", "description": "WEB-DL 720p"}
            ]
        })))
        .mount(server)
        .await;
}

async fn mount_opensubtitles_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/subtitles"))
        .and(header("api-key", "os-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "total_count": 1,
            "data": [{
                "id": "77",
                "attributes": {
                    "language": "en",
                    "release": "Dune.2021.1080p.BluRay.x264-SPARKS",
                    "feature_details": {"title": "Dune", "year": 2021},
                    "files": [{"file_id": 4242}]
                }
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_aggregate_search_merges_providers() {
    let subx = MockServer::start().await;
    let opensubtitles = MockServer::start().await;
    mount_subx_search(&subx).await;
    mount_opensubtitles_search(&opensubtitles).await;

    let manager = init_manager(&config_for(&subx, &opensubtitles)).unwrap();
    let results = manager
        .search(&ProviderContext::new(), None, "dune", &PostFilters::default())
        .await;

    assert_eq!(results.len(), 3);
    // Key order: opensubtitles before subx
    assert_eq!(results[0].provider, "opensubtitles");
    assert_eq!(results[0].id, 4242);
    assert_eq!(results[0].year, 2021);
    assert_eq!(results[0].kind, ContentKind::Movie);
    assert_eq!(results[1].provider, "subx");
    assert_eq!(results[1].external_id.as_deref(), Some("a1"));
    assert_eq!(results[2].external_id.as_deref(), Some("a2"));
}

#[tokio::test]
async fn test_failing_provider_leaves_others_intact() {
    let subx = MockServer::start().await;
    let opensubtitles = MockServer::start().await;
    mount_subx_search(&subx).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&opensubtitles)
        .await;

    let manager = init_manager(&config_for(&subx, &opensubtitles)).unwrap();

    for _ in 0..3 {
        let results = manager
            .search(&ProviderContext::new(), None, "dune", &PostFilters::default())
            .await;
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|s| s.provider == "subx"));
    }
}

#[tokio::test]
async fn test_filters_and_provider_selection() {
    let subx = MockServer::start().await;
    let opensubtitles = MockServer::start().await;
    mount_subx_search(&subx).await;
    mount_opensubtitles_search(&opensubtitles).await;

    let manager = init_manager(&config_for(&subx, &opensubtitles)).unwrap();

    let filters = PostFilters {
        quality: Some("BluRay".to_string()),
        resolution: Some("1080p".to_string()),
        ..PostFilters::default()
    };
    let results = manager.search(&ProviderContext::new(), None, "dune", &filters).await;
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|s| s.quality.contains(&"BluRay".to_string())));

    let only_subx = manager
        .search(&ProviderContext::new(), Some("subx"), "dune", &filters)
        .await;
    assert_eq!(only_subx.len(), 1);
    assert_eq!(only_subx[0].group, vec!["RARBG".to_string()]);

    let unknown = manager
        .search(&ProviderContext::new(), Some("addic7ed"), "dune", &PostFilters::default())
        .await;
    assert!(unknown.is_empty());
}

#[tokio::test]
async fn test_download_through_manager() {
    let subx = MockServer::start().await;
    let opensubtitles = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/subtitles/a1/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/srt")
                .set_body_string("1\n00:00:01,000 --> 00:00:02,000\nHola\n"),
        )
        .mount(&subx)
        .await;

    let manager = init_manager(&config_for(&subx, &opensubtitles)).unwrap();

    let download = manager.download(&ProviderContext::new(), "subx", "a1").await.unwrap();
    assert_eq!(download.filename, "a1.srt");
    assert_eq!(download.content_type, "text/srt");

    let mut sink = Vec::new();
    let written = download.write_to(&mut sink).await.unwrap();
    assert_eq!(written, sink.len() as u64);
    assert!(sink.ends_with(b"Hola\n"));

    let err = manager.download(&ProviderContext::new(), "subdivx", "1").await.unwrap_err();
    assert!(matches!(err, ProviderError::Disabled(_)));
}
