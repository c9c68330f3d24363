//! End-to-end HTTP tests against a server with mocked upstreams.

mod common;

use serde_json::json;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::TestClient;

const ADD_INPUT: &str = "def add(a,b):\n return a+b";

#[tokio::test]
async fn test_health_and_banner() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let health = client.health().await.expect("Health check should succeed");
    assert_eq!(health.status, "ok");

    let banner = client.root().await.unwrap();
    assert_eq!(banner, "Backend Running!");
}

#[tokio::test]
async fn test_ready_reports_components() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let ready = client.ready().await.expect("Ready should succeed");
    assert_eq!(ready.status, "ok");
    assert_eq!(ready.components.http, "ready");
    assert_eq!(ready.components.embedding, "ready");
    assert_eq!(ready.components.embedder_mode, "stub");
    assert_eq!(ready.components.threshold, 50.0);
}

#[tokio::test]
async fn test_check_plagiarism_add_example() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/check_plagiarism",
            json!({"input_code": ADD_INPUT, "fetched_code": "def add(a,b):\n return a + b", "is_code": true}),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.plagcheck_status, "ok");
    assert_eq!(reply.body["status"], "Plagiarised");
    assert_eq!(reply.body["semantic_similarity"], 100.0);
    assert_eq!(reply.body["lexical_similarity"], 42.86);
    assert_eq!(reply.body["structural_similarity"], 100.0);
    assert_eq!(reply.body["final_plagiarism_score"], 82.86);
}

#[tokio::test]
async fn test_threshold_is_configurable() {
    let server = spawn_test_server(TestServerConfig {
        threshold: 90.0,
        ..Default::default()
    })
    .await
    .expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/check_plagiarism",
            json!({"input_code": ADD_INPUT, "fetched_code": "def add(a,b):\n return a + b"}),
        )
        .await
        .unwrap();

    assert_eq!(reply.body["final_plagiarism_score"], 82.86);
    assert_eq!(reply.body["status"], "Original");
}

#[tokio::test]
async fn test_search_github_ranks_fetched_files() {
    let config = TestServerConfig::default()
        .with_broken_code_file("https://github.com/x/gone/blob/main/a.py")
        .with_code_file(
            "https://github.com/x/loose/blob/main/b.py",
            "def add(first, second):\n    total = first + second\n    return total\n",
        )
        .with_code_file(
            "https://github.com/x/exact/blob/main/c.py",
            "def add(a,b):\n return a+b\n\nadd(1, 2)\n",
        );
    let server = spawn_test_server(config).await.expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/search_github_code",
            json!({"input_code": ADD_INPUT, "github_token": "ghp_x"}),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["source"], "https://github.com/x/exact/blob/main/c.py");
    assert_eq!(reply.body["fetched_code"], "def add(a,b):\n return a+b\n");
    assert_eq!(reply.body["confidence"], 100.0);
}

#[tokio::test]
async fn test_search_github_upstream_failure() {
    let server = spawn_test_server(TestServerConfig {
        code_search_failure: Some((403, "API rate limit exceeded".to_string())),
        ..Default::default()
    })
    .await
    .expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/search_github_code",
            json!({"input_code": ADD_INPUT, "github_token": "ghp_x"}),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 502);
    assert_eq!(reply.plagcheck_status, "upstream_error");
    assert_eq!(reply.body["code"], 502);
    assert_eq!(reply.body["details"], "API rate limit exceeded");
}

#[tokio::test]
async fn test_generate_report_gate_on_short_words() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/generate_report",
            json!({"text1": "the cat sat", "text2": "the dog sat"}),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["highlighted_text1"], "the cat sat");
    assert_eq!(reply.body["highlighted_text2"], "the dog sat");
    assert_eq!(reply.body["lexical_similarity"], 50.0);
    assert_eq!(reply.body["structural_similarity"], 0.0);
}

#[tokio::test]
async fn test_deplagiarize_code() {
    let server = spawn_test_server(
        TestServerConfig::default()
            .with_chat_reply("Here:\n```\ndef plus(x, y):\n    return x + y\n```"),
    )
    .await
    .expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/deplagiarize",
            json!({"input_text": ADD_INPUT, "mode": "code", "openrouter_api_key": "sk"}),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    assert_eq!(
        reply.body["deplagiarized_text"],
        "def plus(x, y):\n    return x + y"
    );
}

#[tokio::test]
async fn test_check_article() {
    let server = spawn_test_server(
        TestServerConfig::default()
            .with_article(Some("Origin"), Some("https://example.org/a"), "rust is a systems language")
            .with_article(None, None, "   "),
    )
    .await
    .expect("Server should start");
    let client = TestClient::new(server.url());

    let reply = client
        .post_json(
            "/check_article",
            json!({"article_text": "Rust is a systems language", "tavily_api_key": "tvly"}),
        )
        .await
        .unwrap();

    assert_eq!(reply.status, 200);
    let matches = reply.body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["url"], "https://example.org/a");
    assert_eq!(matches[0]["similarity"], 100.0);
    assert_eq!(matches[1]["title"], "No title");
    assert_eq!(matches[1]["url"], "No URL");
    assert_eq!(matches[1]["similarity"], 0.0);
}

#[tokio::test]
async fn test_missing_inputs_are_bad_requests() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .expect("Server should start");
    let client = TestClient::new(server.url());

    for (path, body) in [
        ("/check_plagiarism", json!({})),
        ("/search_github_code", json!({"github_token": "t"})),
        ("/generate_report", json!({"text1": "a"})),
        ("/deplagiarize", json!({"mode": "text"})),
        ("/check_article", json!({"tavily_api_key": "k"})),
    ] {
        let reply = client.post_json(path, body).await.unwrap();
        assert_eq!(reply.status, 400, "{path}");
        assert_eq!(reply.plagcheck_status, "invalid_request", "{path}");
        assert_eq!(reply.body["code"], 400, "{path}");
    }
}
