//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the MediaWiki Action API and
//! run full crawls end-to-end through `WikiClient`.

use philosophy_crawler::config::{ApiConfig, Config};
use philosophy_crawler::crawler::{CrawlOptions, CrawlOutcome, Crawler};
use philosophy_crawler::wiki::{ArticleSource, FetchOutcome, WikiClient};
use philosophy_crawler::CrawlError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server
fn create_test_client(server: &MockServer) -> WikiClient {
    let config = Config {
        api: ApiConfig {
            endpoint: format!("{}/w/api.php", server.uri()),
            timeout_secs: 5,
        },
        ..Config::default()
    };
    WikiClient::from_config(&config).expect("Failed to build client")
}

fn anchor(title: &str, text: &str) -> String {
    format!(
        r#"<a href="/wiki/{}" title="{}">{}</a>"#,
        title.replace(' ', "_"),
        title,
        text
    )
}

/// Mounts an `action=parse` response for `title`
async fn mount_article(server: &MockServer, title: &str, html: String, disambiguation: bool) {
    let properties = if disambiguation {
        json!({ "disambiguation": "" })
    } else {
        json!({})
    };

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "parse"))
        .and(query_param("page", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "parse": {
                "title": title,
                "pageid": 1,
                "text": html,
                "properties": properties,
            }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_reaches_philosophy() {
    let server = MockServer::start().await;

    // Rock: proper noun, parenthetical and citation links come before the
    // first eligible one.
    mount_article(
        &server,
        "Rock (geology)",
        format!(
            "<div class=\"mw-parser-output\"><p>In {}, a <b>rock</b> (from {}){} is any \
             naturally occurring {} of {}.</p></div>",
            anchor("Geology", "Geology"),
            anchor("Old English", "old english"),
            "<sup class=\"reference\"><a href=\"#cite_note-1\">[1]</a></sup>",
            anchor("Solid", "solid"),
            anchor("Mineral", "minerals"),
        ),
        false,
    )
    .await;

    mount_article(
        &server,
        "Solid",
        format!(
            "<p><b>Solid</b> is one of the four fundamental {}.</p>",
            anchor("State of matter", "states of matter")
        ),
        false,
    )
    .await;

    mount_article(
        &server,
        "State of matter",
        format!(
            "<p>In {}, a state of matter is one of the distinct forms of {}.</p>",
            anchor("Physics", "physics"),
            anchor("Matter", "matter")
        ),
        false,
    )
    .await;

    mount_article(
        &server,
        "Physics",
        format!("<p>Physics is the {} of matter.</p>", anchor("Philosophy", "philosophy")),
        false,
    )
    .await;

    let client = create_test_client(&server);
    let crawler = Crawler::new(client, CrawlOptions::default());

    let mut streamed = Vec::new();
    let report = crawler
        .crawl(Some("Rock (geology)".to_string()), |title| {
            streamed.push(title.to_string())
        })
        .await
        .expect("Crawl failed");

    assert_eq!(
        report.path,
        vec![
            "Rock (geology)",
            "Solid",
            "State of matter",
            "Physics",
            "Philosophy"
        ]
    );
    assert_eq!(report.outcome, CrawlOutcome::ReachedTarget);
    assert_eq!(streamed, report.path);
}

#[tokio::test]
async fn test_disambiguation_page_follows_first_option() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Mercury",
        format!(
            "<p><b>Mercury</b> may refer to:</p><ul><li>{}, a planet</li><li>{}, an element</li></ul>",
            anchor("Mercury (planet)", "Mercury (planet)"),
            anchor("Mercury (element)", "Mercury (element)"),
        ),
        true,
    )
    .await;

    mount_article(
        &server,
        "Mercury (planet)",
        format!("<p>Mercury is a {}.</p>", anchor("Philosophy", "philosophy")),
        false,
    )
    .await;

    let client = create_test_client(&server);
    let crawler = Crawler::new(client, CrawlOptions::default());

    let report = crawler
        .crawl(Some("Mercury".to_string()), |_| {})
        .await
        .expect("Crawl failed");

    assert_eq!(
        report.path,
        vec!["Mercury", "Mercury (planet)", "Philosophy"]
    );
}

#[tokio::test]
async fn test_cycle_over_http() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Chicken",
        format!("<p>A chicken comes from an {}.</p>", anchor("Egg", "egg")),
        false,
    )
    .await;
    mount_article(
        &server,
        "Egg",
        format!("<p>An egg comes from a {}.</p>", anchor("Chicken", "chicken")),
        false,
    )
    .await;

    let client = create_test_client(&server);
    let crawler = Crawler::new(client, CrawlOptions::default());

    let report = crawler
        .crawl(Some("Chicken".to_string()), |_| {})
        .await
        .expect("Crawl failed");

    assert_eq!(report.path, vec!["Chicken", "Egg"]);
    assert_eq!(report.outcome, CrawlOutcome::Cycle);
}

#[tokio::test]
async fn test_random_start() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("list", "random"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "batchcomplete": true,
            "query": { "random": [ { "id": 42, "ns": 0, "title": "Lonely stub" } ] }
        })))
        .mount(&server)
        .await;

    mount_article(
        &server,
        "Lonely stub",
        "<p>This article has no links.</p>".to_string(),
        false,
    )
    .await;

    let client = create_test_client(&server);
    let crawler = Crawler::new(client, CrawlOptions::default());

    let report = crawler.crawl(None, |_| {}).await.expect("Crawl failed");

    assert_eq!(report.path, vec!["Lonely stub"]);
    assert_eq!(report.outcome, CrawlOutcome::DeadEnd);
}

#[tokio::test]
async fn test_missing_page_aborts_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("action", "parse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {
                "code": "missingtitle",
                "info": "The page you specified doesn't exist."
            }
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let crawler = Crawler::new(client, CrawlOptions::default());

    let result = crawler.crawl(Some("Nowhere".to_string()), |_| {}).await;

    assert!(matches!(result, Err(CrawlError::MissingPage(title)) if title == "Nowhere"));
}

#[tokio::test]
async fn test_server_error_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = create_test_client(&server);

    let result = client.fetch_article("Anything").await;

    assert!(matches!(result, Err(CrawlError::Http { .. })));
}

#[tokio::test]
async fn test_fetch_article_returns_rendered_html() {
    let server = MockServer::start().await;

    mount_article(
        &server,
        "Rock",
        "<p>A <a href=\"/wiki/Stone\" title=\"Stone\">stone</a>.</p>".to_string(),
        false,
    )
    .await;

    let client = create_test_client(&server);

    match client.fetch_article("Rock").await.expect("Fetch failed") {
        FetchOutcome::Article(article) => {
            assert_eq!(article.title, "Rock");
            assert!(article.html.contains("title=\"Stone\""));
        }
        other => panic!("Expected article, got {:?}", other),
    }
}
