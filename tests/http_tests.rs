//! `WikiClient` against a mock HTTP server.

use station_scrap::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKYO_PATH: &str = "/wiki/%E6%9D%B1%E4%BA%AC%E9%A7%85";

async fn client_for(server: &MockServer) -> WikiClient {
    let config = Config {
        wiki_url: server.uri(),
        ..Config::default()
    };
    WikiClient::new(&config).unwrap()
}

#[tokio::test]
async fn fetches_encoded_article_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TOKYO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>東京駅</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let html = client.fetch("/wiki/東京駅").await.unwrap();
    assert_eq!(html, "<p>東京駅</p>");
}

#[tokio::test]
async fn error_status_is_a_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.fetch("/wiki/Nowhere").await.unwrap_err();
    assert!(err.is_fetch());
    assert!(matches!(err, Error::FetchStatus { status: 404, ref identifier } if identifier == "/wiki/Nowhere"));
}

#[tokio::test]
async fn extract_over_http() {
    let server = MockServer::start().await;
    let body = r#"<table class="infobox bordered">
        <tr><th>東京駅</th></tr>
        <tr><td>北緯35度40分52秒 東経139度46分2秒</td></tr>
        <tr><td>乗車人員 462,589人/日</td></tr>
        <tr><td><a href="/wiki/%E6%9C%89%E6%A5%BD%E7%94%BA%E9%A7%85">有楽町</a> ◄ ► <a href="/wiki/%E7%A5%9E%E7%94%B0%E9%A7%85_(%E6%9D%B1%E4%BA%AC%E9%83%BD)">神田</a></td></tr>
      </table>"#;
    Mock::given(method("GET"))
        .and(path(TOKYO_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let record = extract(&client, "/wiki/東京駅", &Markers::default())
        .await
        .unwrap();

    assert_eq!(record.name.as_deref(), Some("東京駅"));
    assert_eq!(record.passengers, 462_589);
    let loc = record.location.unwrap();
    assert!((loc.lat - 35.681111).abs() < 1e-5);
    assert!((loc.lng - 139.767222).abs() < 1e-5);
    assert!(record.outbound_links.contains("/wiki/有楽町駅"));
    assert!(record.outbound_links.contains("/wiki/神田駅_(東京都)"));
}
