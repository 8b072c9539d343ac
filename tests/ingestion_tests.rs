//! Ingestion tests against a mock HTTP upstream.

use anyhow::Result;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mobility_analysis::config::AppConfig;
use mobility_analysis::error::IngestionError;
use mobility_analysis::ingestion::IngestionClient;

fn client_for(dir: &tempfile::TempDir) -> Result<IngestionClient> {
    let config = AppConfig {
        ingestion_root: dir.path().to_path_buf(),
        ..Default::default()
    };
    Ok(IngestionClient::new(&config)?)
}

#[tokio::test]
async fn fetch_writes_the_response_body_verbatim() -> Result<()> {
    let server = MockServer::start().await;
    let body = r#"[{"stationcode":"16107","is_installed":"OUI"}]"#;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let client = client_for(&dir)?;
    let dest = dir.path().join("2025-06-01").join("feed.json");
    let url = Url::parse(&format!("{}/feed", server.uri()))?;

    client.fetch_to(url, &dest).await?;

    assert_eq!(std::fs::read_to_string(&dest)?, body);
    Ok(())
}

#[tokio::test]
async fn upstream_error_status_is_surfaced() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir()?;
    let client = client_for(&dir)?;
    let dest = dir.path().join("2025-06-01").join("feed.json");
    let url = Url::parse(&format!("{}/feed", server.uri()))?;

    let result = client.fetch_to(url, &dest).await;
    assert!(matches!(
        result,
        Err(IngestionError::UpstreamStatus { status: 503, .. })
    ));

    // No file is left behind for a failed fetch.
    assert!(!dest.exists());
    Ok(())
}
