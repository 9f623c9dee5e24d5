//! Retrieval fallback chain against mock targets and relays

use serde_json::json;
use sitelens::config::UserAgentConfig;
use sitelens::retrieval::{build_http_client, Backend, Retrieve, Retriever};
use sitelens::AuditError;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "<html><head><title>Hallo</title></head><body><h1>Hallo</h1></body></html>";

fn retriever(backends: Vec<Backend>, timeout: Duration) -> Retriever {
    let client = build_http_client(&UserAgentConfig::default()).expect("client builds");
    Retriever::new(client, backends, timeout)
}

fn endpoint(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{}", server.uri(), route)).expect("valid endpoint")
}

#[tokio::test]
async fn test_direct_success_keeps_headers() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .insert_header("content-type", "text/html")
                .insert_header("X-Robots-Tag", "noindex"),
        )
        .expect(1)
        .mount(&target)
        .await;

    let retriever = retriever(vec![Backend::Direct], Duration::from_secs(5));
    let page = retriever
        .retrieve(&format!("{}/", target.uri()))
        .await
        .expect("direct retrieval succeeds");

    assert_eq!(page.status_code, 200);
    assert_eq!(page.served_by, "direct");
    assert_eq!(page.header("x-robots-tag"), Some("noindex"));
    assert!(page.body.contains("<title>Hallo</title>"));
}

#[tokio::test]
async fn test_direct_error_falls_back_to_first_party_relay() {
    let target = MockServer::start().await;
    let relay = MockServer::start().await;
    let target_url = format!("{}/pagina", target.uri());

    Mock::given(method("GET"))
        .and(path("/pagina"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&target)
        .await;

    Mock::given(method("GET"))
        .and(path("/relay"))
        .and(query_param("url", target_url.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 200,
            "statusText": "OK",
            "contents": PAGE,
            "headers": { "X-Robots-Tag": "nofollow", "Content-Type": "text/html" }
        })))
        .expect(1)
        .mount(&relay)
        .await;

    let retriever = retriever(
        vec![
            Backend::Direct,
            Backend::FirstPartyRelay {
                endpoint: endpoint(&relay, "/relay"),
            },
        ],
        Duration::from_secs(5),
    );

    let page = retriever.retrieve(&target_url).await.expect("relay succeeds");

    assert_eq!(page.served_by, "first-party-relay");
    assert_eq!(page.status_code, 200);
    assert_eq!(page.header("X-Robots-Tag"), Some("nofollow"));
    assert_eq!(page.body, PAGE);
}

#[tokio::test]
async fn test_relay_error_envelope_falls_through_to_public_relay() {
    let relay = MockServer::start().await;
    let target_url = "https://example.com/verdwenen";

    Mock::given(method("GET"))
        .and(path("/relay"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "fetch failed",
            "message": "blocked by origin"
        })))
        .expect(1)
        .mount(&relay)
        .await;

    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("url", target_url))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contents": "<html><title>Niet gevonden</title></html>",
            "status": { "http_code": 404 }
        })))
        .expect(1)
        .mount(&relay)
        .await;

    let retriever = retriever(
        vec![
            Backend::FirstPartyRelay {
                endpoint: endpoint(&relay, "/relay"),
            },
            Backend::AllOrigins {
                endpoint: endpoint(&relay, "/get"),
            },
        ],
        Duration::from_secs(5),
    );

    let page = retriever.retrieve(target_url).await.expect("all-origins succeeds");

    // The relayed target status is reported verbatim
    assert_eq!(page.served_by, "all-origins");
    assert_eq!(page.status_code, 404);
    assert!(page.headers.is_empty());
}

#[tokio::test]
async fn test_missing_contents_advances_to_code_tabs() {
    let relay = MockServer::start().await;
    let target_url = "https://example.com/";

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": {} })))
        .mount(&relay)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/proxy"))
        .and(query_param("quest", target_url))
        .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
        .expect(1)
        .mount(&relay)
        .await;

    let retriever = retriever(
        vec![
            Backend::AllOrigins {
                endpoint: endpoint(&relay, "/get"),
            },
            Backend::CodeTabs {
                endpoint: endpoint(&relay, "/v1/proxy"),
            },
        ],
        Duration::from_secs(5),
    );

    let page = retriever.retrieve(target_url).await.expect("code-tabs succeeds");

    assert_eq!(page.served_by, "code-tabs");
    assert_eq!(page.body, PAGE);
}

#[tokio::test]
async fn test_timeout_advances_to_next_backend() {
    let target = MockServer::start().await;
    let relay = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&target)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(PAGE)
                .insert_header("x-served", "proxy"),
        )
        .expect(1)
        .mount(&relay)
        .await;

    let retriever = retriever(
        vec![
            Backend::Direct,
            Backend::CorsProxy {
                endpoint: endpoint(&relay, "/"),
            },
        ],
        Duration::from_millis(300),
    );

    let page = retriever
        .retrieve(&format!("{}/", target.uri()))
        .await
        .expect("cors-proxy succeeds");

    assert_eq!(page.served_by, "cors-proxy");
    assert_eq!(page.header("x-served"), Some("proxy"));
}

#[tokio::test]
async fn test_all_backends_failing() {
    let target = MockServer::start().await;
    let relay = MockServer::start().await;
    let target_url = format!("{}/", target.uri());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&target)
        .await;

    Mock::given(method("GET"))
        .and(path("/relay"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&relay)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/proxy"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&relay)
        .await;

    let retriever = retriever(
        vec![
            Backend::Direct,
            Backend::FirstPartyRelay {
                endpoint: endpoint(&relay, "/relay"),
            },
            Backend::CodeTabs {
                endpoint: endpoint(&relay, "/v1/proxy"),
            },
        ],
        Duration::from_secs(5),
    );

    match retriever.retrieve(&target_url).await {
        Err(AuditError::RetrievalFailed { url, tried }) => {
            assert_eq!(url, target_url);
            assert_eq!(tried, vec!["direct", "first-party-relay", "code-tabs"]);
        }
        other => panic!("expected RetrievalFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_url_makes_no_requests() {
    let relay = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&relay)
        .await;

    let retriever = retriever(
        vec![Backend::FirstPartyRelay {
            endpoint: endpoint(&relay, "/relay"),
        }],
        Duration::from_secs(5),
    );

    let result = retriever.retrieve("javascript:alert(1)").await;
    assert!(matches!(result, Err(AuditError::InvalidUrl { .. })));
}
