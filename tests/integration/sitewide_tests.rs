//! Page analysis and sitewide runs against a mock site

use sitelens::config::{Config, RelayEntry};
use sitelens::sitewide::{MSG_CANONICAL_MISSING, MSG_META_MISSING};
use sitelens::{AuditError, AuditSession};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A session that only fetches directly, with a short attempt timeout
fn direct_session() -> AuditSession {
    let mut config = Config::default();
    config.retrieval.relays = Vec::<RelayEntry>::new();
    config.retrieval.timeout_secs = 5;
    config.cache.sweep_probability = 0.0;

    AuditSession::from_config(&config).expect("session builds")
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_analyze_page_end_to_end() {
    let server = MockServer::start().await;
    let url = format!("{}/diensten", server.uri());

    let html = format!(
        r#"<html><head>
            <title>Onze diensten voor zoekmachineoptimalisatie</title>
            <meta name="description" content="{}">
            <link rel="canonical" href="{}">
        </head><body>
            <h1>Links Onze diensten</h1>
            <img src="/img/team.jpg">
            <a href="/contact">Contact</a>
            <a href="https://elders.example.org/">Partner</a>
        </body></html>"#,
        "d".repeat(130),
        url
    );
    mount_page(&server, "/diensten", html).await;

    let report = direct_session()
        .analyze_page(&url, Some("diensten"))
        .await
        .expect("page analyzes");

    let facts = &report.facts;
    assert_eq!(facts.status.code, 200);
    assert!(facts.title.is_optimal);
    assert_eq!(facts.title.has_keyword, Some(true));
    assert_eq!(facts.h1.texts, vec!["Onze diensten"]);
    assert!(facts.canonical.is_self_referencing);
    assert_eq!(facts.images.missing_alt[0].filename, "team.jpg");
    assert_eq!(facts.links.internal, 1);
    assert_eq!(facts.links.external, 1);

    // Only the image alt criterion fails
    assert_eq!(report.score, 90);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].message, "1 afbeelding(en) zonder alt-tekst");
}

#[tokio::test]
async fn test_cache_hit_skips_second_request() {
    let server = MockServer::start().await;
    let url = format!("{}/", server.uri());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Home", "")))
        .expect(1)
        .mount(&server)
        .await;

    let session = direct_session();
    let first = session.analyze_page(&url, None).await.expect("first");
    let second = session.analyze_page(&url, None).await.expect("second");

    assert_eq!(first.score, second.score);
    assert_eq!(session.cached_pages(), 1);
}

#[tokio::test]
async fn test_analyze_unreachable_page_fails() {
    let server = MockServer::start().await;
    let url = format!("{}/weg", server.uri());

    let result = direct_session().analyze_page(&url, None).await;

    match result {
        Err(AuditError::RetrievalFailed { tried, .. }) => assert_eq!(tried, vec!["direct"]),
        other => panic!("expected RetrievalFailed, got {:?}", other.map(|r| r.score)),
    }
}

#[tokio::test]
async fn test_sitewide_run_with_failing_page() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            r#"<h1>Home</h1>
               <a href="/over-ons">Over ons</a>
               <a href="/kapot">Kapot</a>
               <a href="/over-ons?utm_source=nieuwsbrief">Over ons</a>
               <a href="https://elders.example.org/">Extern</a>"#,
        ),
    )
    .await;
    mount_page(
        &server,
        "/over-ons",
        html_page("Over ons", r#"<h1>Over ons</h1><a href="/">Home</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/kapot"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = direct_session()
        .run_sitewide(&base, None, 10, false)
        .await
        .expect("run completes");

    let urls: Vec<&str> = result.pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/", base),
            format!("{}/over-ons", base),
            format!("{}/kapot", base),
        ]
    );

    assert_eq!(result.total_pages, 3);
    assert_eq!(result.successful_pages, 2);
    assert_eq!(result.pages[2].score, 0);
    assert!(result.pages[2].error.is_some());

    // Both successful pages lack a meta description and a canonical tag
    let meta = result
        .issues
        .iter()
        .find(|i| i.message == MSG_META_MISSING)
        .expect("meta issue");
    assert_eq!(meta.count, 2);
    let canonical = result
        .issues
        .iter()
        .find(|i| i.message == MSG_CANONICAL_MISSING)
        .expect("canonical issue");
    assert_eq!(canonical.count, 2);

    assert!(result.issues.len() <= 10);
    assert!(!result.recommendations.is_empty());
    assert!(result.recommendations.len() <= 5);
}

#[tokio::test]
async fn test_sitewide_respects_max_pages() {
    let server = MockServer::start().await;

    let links: String = (1..=8)
        .map(|i| format!("<a href=\"/p{}\">p</a>", i))
        .collect();
    mount_page(&server, "/", html_page("Home", &links)).await;
    for i in 1..=8 {
        mount_page(&server, &format!("/p{}", i), html_page("Pagina", "")).await;
    }

    let result = direct_session()
        .run_sitewide(&server.uri(), None, 3, false)
        .await
        .expect("run completes");

    assert_eq!(result.total_pages, 3);
    assert_eq!(result.successful_pages, 3);
}
