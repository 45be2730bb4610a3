//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use site_tree::config::{Config, CrawlerConfig};
use site_tree::crawler::{crawl, Coordinator, CrawlPhase};
use site_tree::CrawlError;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration on top of the defaults
fn create_test_config(edit: impl FnOnce(&mut CrawlerConfig)) -> Config {
    let mut crawler = CrawlerConfig {
        workers: Some(2),
        ..CrawlerConfig::default()
    };
    edit(&mut crawler);
    Config { crawler }
}

/// Mounts an HTML page that must be fetched exactly `times` times
async fn mount_page(server: &MockServer, page: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn anchors(hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!("<html><body>{}</body></html>", links)
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        anchors(&[&format!("{}/page1", base_url), "/page2"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", anchors(&["/", "page2"]), 1).await;
    mount_page(&mock_server, "/page2", anchors(&[]), 1).await;

    let seed = format!("{}/", base_url);
    let report = crawl(&seed, create_test_config(|_| {}))
        .await
        .expect("Crawl failed");

    assert_eq!(report.seed, seed);
    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.frontier.len(), 3);

    let mut children: Vec<_> = report.children_of(&seed).collect();
    children.sort();
    assert_eq!(
        children,
        vec![format!("{}/page1", base_url), format!("{}/page2", base_url)]
    );

    // Links back to already known pages are not reported again
    assert_eq!(report.edges.len(), 2);
    assert_eq!(report.frontier.count(&seed), 2);
}

#[tokio::test]
async fn test_coordinator_phases() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", anchors(&[]), 1).await;

    let coordinator = Coordinator::new(&format!("{}/", mock_server.uri()), Config::default())
        .await
        .expect("Failed to create coordinator");
    assert_eq!(coordinator.phase(), CrawlPhase::Init);

    let report = coordinator.run().await.expect("Crawl failed");
    assert_eq!(report.pages_crawled, 1);
    assert!(report.edges.is_empty());
    assert!(report.finished_at >= report.started_at);
}

#[tokio::test]
async fn test_cycle_is_crawled_once() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", anchors(&["/a"]), 1).await;
    mount_page(&mock_server, "/a", anchors(&["/b", "/"]), 1).await;
    mount_page(&mock_server, "/b", anchors(&["/a", "/", "/b"]), 1).await;

    let report = crawl(&format!("{}/", mock_server.uri()), create_test_config(|_| {}))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.edges.len(), 2);
    assert_eq!(report.frontier.duplicates(), 4);
}

#[tokio::test]
async fn test_limit_to_domain() {
    let mock_server = MockServer::start().await;
    let external = MockServer::start().await;
    let external_url = format!("http://localhost:{}/ext", external.address().port());

    mount_page(&mock_server, "/", anchors(&["/inside", &external_url]), 1).await;
    mount_page(&mock_server, "/inside", anchors(&[]), 1).await;
    mount_page(&external, "/ext", anchors(&[]), 0).await;

    let config = create_test_config(|c| c.limit_to_domain = true);
    let report = crawl(&format!("{}/", mock_server.uri()), config)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert!(report.edges.iter().all(|e| e.child != external_url));
    assert_eq!(report.frontier.count(&external_url), 0);
}

#[tokio::test]
async fn test_external_links_followed_without_limit() {
    let mock_server = MockServer::start().await;
    let external = MockServer::start().await;
    let external_url = format!("http://localhost:{}/ext", external.address().port());

    mount_page(&mock_server, "/", anchors(&[&external_url]), 1).await;
    mount_page(&external, "/ext", anchors(&[]), 1).await;

    let report = crawl(&format!("{}/", mock_server.uri()), create_test_config(|_| {}))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.edges[0].child, external_url);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", anchors(&["/public", "/private"]), 1).await;
    mount_page(&mock_server, "/public", anchors(&["/private"]), 1).await;
    mount_page(&mock_server, "/private", anchors(&[]), 0).await;

    let config = create_test_config(|c| {
        c.robots = true;
        c.workers = Some(8);
    });
    let report = crawl(&format!("{}/", mock_server.uri()), config)
        .await
        .expect("Crawl failed");

    let private = format!("{}/private", mock_server.uri());
    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.blocked, vec![private.clone()]);
    assert_eq!(report.frontier.count(&private), 2);
}

#[tokio::test]
async fn test_missing_robots_txt_allows_everything() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", anchors(&["/private"]), 1).await;
    mount_page(&mock_server, "/private", anchors(&[]), 1).await;

    let config = create_test_config(|c| c.robots = true);
    let report = crawl(&format!("{}/", mock_server.uri()), config)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 2);
    assert!(report.blocked.is_empty());
}

#[tokio::test]
async fn test_robots_txt_server_error_is_fatal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", anchors(&["/a"]), 0).await;

    let config = create_test_config(|c| c.robots = true);
    let result = crawl(&format!("{}/", mock_server.uri()), config).await;

    assert!(matches!(result, Err(CrawlError::Robots { .. })));
}

#[tokio::test]
async fn test_crawl_delay_throttles_dispatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nCrawl-delay: 0.2"))
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "/", anchors(&["/a", "/b", "/c"]), 1).await;
    for page in ["/a", "/b", "/c"] {
        mount_page(&mock_server, page, anchors(&[]), 1).await;
    }

    let config = create_test_config(|c| c.robots = true);
    let started = Instant::now();
    let report = crawl(&format!("{}/", mock_server.uri()), config)
        .await
        .expect("Crawl failed");

    // Two sleeps: before the second and third dispatch from the seed page
    assert!(started.elapsed() >= Duration::from_millis(400));
    assert_eq!(report.pages_crawled, 4);
}

#[tokio::test]
async fn test_single_depth() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", anchors(&["/a", "/b", "/a"]), 1).await;
    mount_page(&mock_server, "/a", anchors(&["/c"]), 0).await;
    mount_page(&mock_server, "/b", anchors(&[]), 0).await;

    let config = create_test_config(|c| c.single_depth = true);
    let report = crawl(&format!("{}/", mock_server.uri()), config)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.edges.len(), 2);
}

#[tokio::test]
async fn test_fetch_errors_do_not_stop_the_crawl() {
    let mock_server = MockServer::start().await;

    mount_page(&mock_server, "/", anchors(&["/missing", "/ok"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(anchors(&["/never"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", anchors(&["/deeper"]), 1).await;
    mount_page(&mock_server, "/deeper", anchors(&[]), 1).await;
    mount_page(&mock_server, "/never", anchors(&[]), 0).await;

    let report = crawl(&format!("{}/", mock_server.uri()), create_test_config(|_| {}))
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 4);
    assert_eq!(report.edges.len(), 3);
}

#[tokio::test]
async fn test_many_workers() {
    let mock_server = MockServer::start().await;

    let pages: Vec<String> = (0..12).map(|i| format!("/page{}", i)).collect();
    let hrefs: Vec<&str> = pages.iter().map(String::as_str).collect();
    mount_page(&mock_server, "/", anchors(&hrefs), 1).await;
    for page in &pages {
        mount_page(&mock_server, page, anchors(&["/", "/page0"]), 1).await;
    }

    let config = create_test_config(|c| c.workers = Some(4));
    let report = crawl(&format!("{}/", mock_server.uri()), config)
        .await
        .expect("Crawl failed");

    assert_eq!(report.pages_crawled, 13);
    assert_eq!(report.frontier.len(), 13);
    assert_eq!(report.edges.len(), 12);
}

#[tokio::test]
async fn test_unresolvable_seed() {
    let result = crawl("/relative/path", create_test_config(|_| {})).await;
    assert!(matches!(result, Err(CrawlError::UrlError(_))));
}
