use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sift_server::{build_app, ServerConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn seed_corpus(dir: &Path) -> ServerConfig {
    let corpus = dir.join("pages");
    fs::create_dir_all(&corpus).unwrap();
    fs::write(
        corpus.join("page1.html"),
        "<html><head><title>Fox one</title></head><body>The quick brown fox</body></html>",
    )
    .unwrap();
    fs::write(
        corpus.join("page2.html"),
        "<html><head><title>Fox two</title></head><body>quick quick fox jumps</body></html>",
    )
    .unwrap();
    fs::write(dir.join("stopwords.txt"), "the\nand\n").unwrap();
    ServerConfig {
        corpus_dir: corpus,
        stopwords: dir.join("stopwords.txt"),
        query_log: dir.join("output.txt"),
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, body)
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let dir = TempDir::new().unwrap();
    let app = build_app(seed_corpus(dir.path())).unwrap();

    let (status, body) = get(app, "/search?q=quick").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"], 2);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["doc_id"], "page2.html");
    assert_eq!(results[0]["score"], 2);
    assert_eq!(results[1]["doc_id"], "page1.html");
    assert_eq!(results[1]["score"], 1);
    assert!(results[0]["snippet"]
        .as_str()
        .unwrap()
        .contains("<mark>quick</mark>"));
}

#[tokio::test]
async fn empty_query_returns_no_results() {
    let dir = TempDir::new().unwrap();
    let app = build_app(seed_corpus(dir.path())).unwrap();

    let (status, body) = get(app, "/search?q=").await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["total_hits"], 0);
    assert!(json["results"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn queries_are_appended_to_the_log() {
    let dir = TempDir::new().unwrap();
    let config = seed_corpus(dir.path());
    let log_path = config.query_log.clone();
    let app = build_app(config).unwrap();

    let _ = get(app.clone(), "/search?q=fox").await;
    let _ = get(app, "/search?q=unobtainium").await;

    let log = fs::read_to_string(log_path).unwrap();
    assert!(log.contains("Query: fox\n"));
    assert!(log.contains("page2.html (score: 2)"));
    assert!(log.contains("Query: unobtainium\nNo matches found.\n"));
}

#[tokio::test]
async fn doc_endpoint_serves_corpus_pages_only() {
    let dir = TempDir::new().unwrap();
    let app = build_app(seed_corpus(dir.path())).unwrap();

    let (status, body) = get(app.clone(), "/doc/page1.html").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("quick brown fox"));

    // Traversal outside the corpus root fails closed.
    let (status, _) = get(app.clone(), "/doc/../stopwords.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(app, "/doc/missing.html").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rebuild_requires_admin_token() {
    let dir = TempDir::new().unwrap();
    let app = build_app(seed_corpus(dir.path())).unwrap();

    let req = Request::post("/rebuild").body(Body::empty()).unwrap();
    let resp = tower::ServiceExt::oneshot(app, req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_stopword_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = seed_corpus(dir.path());
    config.stopwords = dir.path().join("absent.txt");
    assert!(build_app(config).is_err());
}
