//! Integration tests for the API client, against a mocked HTTP server.
//!
//! The blocking operations drive the shared runtime themselves, so these
//! tests are plain `#[test]` functions; the mock server is set up through
//! `runtime::block_on` on that same runtime.

use std::time::Duration;

use courier_core::{NotificationHub, runtime};
use courier_http::{ApiClient, FetchOutcome, HttpClient, JsonObject};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn mock_server_with(mocks: Vec<Mock>) -> MockServer {
    runtime::block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    })
}

fn json_mock(request_path: &str, body: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path(request_path.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
}

#[test]
fn fetch_decodes_a_json_object() {
    init_tracing();
    let server = mock_server_with(vec![json_mock("/users/1", r#"{"id":1,"name":"Ada"}"#)]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    let user = api.fetch("/users/1").expect("fetch");

    assert_eq!(user.get("id"), Some(&serde_json::json!(1)));
    assert_eq!(user.get("name"), Some(&serde_json::json!("Ada")));
}

#[test]
fn fetch_of_invalid_json_is_a_decode_error() {
    init_tracing();
    let server = mock_server_with(vec![json_mock("/broken", "not json")]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    let err = api.fetch("/broken").unwrap_err();

    assert!(err.is_decode(), "expected decode error, got {err}");
    assert!(!err.is_network());
}

#[test]
fn fetch_of_a_top_level_array_is_a_decode_error() {
    init_tracing();
    let server = mock_server_with(vec![json_mock("/list", "[1,2,3]")]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    let err = api.fetch("/list").unwrap_err();

    assert!(err.is_decode(), "expected decode error, got {err}");
}

#[test]
fn fetch_of_an_empty_object_succeeds() {
    init_tracing();
    let server = mock_server_with(vec![json_mock("/empty", "{}")]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    let object = api.fetch("/empty").expect("fetch");

    assert!(object.is_empty());
}

#[test]
fn fetch_decodes_regardless_of_http_status() {
    init_tracing();
    let server = mock_server_with(vec![
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"missing"}"#)),
    ]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    let object = api.fetch("/missing").expect("fetch");

    assert_eq!(object.get("error"), Some(&serde_json::json!("missing")));
}

#[test]
fn post_transmits_the_encoded_body_verbatim() {
    init_tracing();
    let server = mock_server_with(vec![
        Mock::given(method("POST"))
            .and(path("/session"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string("key1=value1&key2=value2"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ok":true}"#))
            .expect(1),
    ]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    let object = api.post("/session", "key1=value1&key2=value2").expect("post");

    assert_eq!(object.get("ok"), Some(&serde_json::json!(true)));
    runtime::block_on(server.verify());
}

#[test]
fn timeouts_classify_as_network_errors() {
    init_tracing();
    let server = mock_server_with(vec![
        Mock::given(method("GET")).and(path("/slow")).respond_with(
            ResponseTemplate::new(200)
                .set_body_string("{}")
                .set_delay(Duration::from_secs(5)),
        ),
    ]);

    let transport = HttpClient::builder()
        .timeout(Duration::from_millis(100))
        .build()
        .expect("transport");
    let api = ApiClient::builder(server.uri())
        .http_client(transport)
        .build()
        .expect("build");

    let err = api.fetch("/slow").unwrap_err();
    assert!(err.is_network(), "expected network error, got {err}");
    assert!(!err.is_decode());
}

#[test]
fn parsed_data_reflects_the_last_response() {
    init_tracing();
    let server = mock_server_with(vec![
        json_mock("/a", r#"{"which":"a"}"#),
        json_mock("/b", r#"{"which":"b"}"#),
    ]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    assert!(api.parsed_data().is_none());

    api.fetch("/a").expect("fetch a");
    let b = api.fetch("/b").expect("fetch b");

    assert_eq!(api.parsed_data(), Some(b));
}

#[test]
fn async_fetch_publishes_the_same_object_as_a_blocking_fetch() {
    init_tracing();
    let server = mock_server_with(vec![json_mock("/users/1", r#"{"id":1,"name":"Ada"}"#)]);

    let hub = NotificationHub::<FetchOutcome>::new();
    let watcher = hub.watch("profile");

    let api = ApiClient::builder(server.uri())
        .subscription(hub.clone(), "profile")
        .build()
        .expect("build");

    let blocking: JsonObject = api.fetch("/users/1").expect("blocking fetch");

    api.fetch_async("/users/1");
    let outcome = watcher
        .recv_timeout(Duration::from_secs(5))
        .expect("completion notification");

    match outcome {
        FetchOutcome::Completed(object) => assert_eq!(object, blocking),
        FetchOutcome::Failed(message) => panic!("async fetch failed: {message}"),
    }
}

#[test]
fn clients_with_different_tags_do_not_cross_deliver() {
    init_tracing();
    let server = mock_server_with(vec![
        json_mock("/alpha", r#"{"who":"alpha"}"#),
        json_mock("/beta", r#"{"who":"beta"}"#),
    ]);

    let hub = NotificationHub::<FetchOutcome>::new();
    let alpha_watcher = hub.watch("alpha");
    let beta_watcher = hub.watch("beta");

    let alpha = ApiClient::builder(server.uri())
        .subscription(hub.clone(), "alpha")
        .build()
        .expect("build alpha");
    let beta = ApiClient::builder(server.uri())
        .subscription(hub.clone(), "beta")
        .build()
        .expect("build beta");

    alpha.fetch_async("/alpha");
    beta.fetch_async("/beta");

    let alpha_outcome = alpha_watcher
        .recv_timeout(Duration::from_secs(5))
        .expect("alpha completion");
    let beta_outcome = beta_watcher
        .recv_timeout(Duration::from_secs(5))
        .expect("beta completion");

    assert_eq!(
        alpha_outcome.object().and_then(|o| o.get("who")),
        Some(&serde_json::json!("alpha"))
    );
    assert_eq!(
        beta_outcome.object().and_then(|o| o.get("who")),
        Some(&serde_json::json!("beta"))
    );

    // One completion each; nothing leaked across tags.
    assert!(alpha_watcher.recv_timeout(Duration::from_millis(200)).is_none());
    assert!(beta_watcher.recv_timeout(Duration::from_millis(200)).is_none());
}

#[test]
fn async_failures_publish_a_failed_outcome() {
    init_tracing();
    let server = mock_server_with(vec![json_mock("/broken", "not json")]);

    let hub = NotificationHub::<FetchOutcome>::new();
    let watcher = hub.watch("broken-screen");

    let api = ApiClient::builder(server.uri())
        .subscription(hub.clone(), "broken-screen")
        .build()
        .expect("build");

    api.fetch_async("/broken");
    let outcome = watcher
        .recv_timeout(Duration::from_secs(5))
        .expect("failure notification");

    assert!(outcome.is_failed(), "expected Failed, got {outcome:?}");
}

#[test]
fn async_post_round_trips_through_the_hub() {
    init_tracing();
    let server = mock_server_with(vec![
        Mock::given(method("POST"))
            .and(path("/session"))
            .and(body_string("user=ada&pin=1234"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"session":"ok"}"#)),
    ]);

    let hub = NotificationHub::<FetchOutcome>::new();
    let watcher = hub.watch("login");

    let api = ApiClient::builder(server.uri())
        .subscription(hub.clone(), "login")
        .build()
        .expect("build");

    api.post_async("/session", "user=ada&pin=1234");
    let outcome = watcher
        .recv_timeout(Duration::from_secs(5))
        .expect("completion notification");

    assert_eq!(
        outcome.object().and_then(|o| o.get("session")),
        Some(&serde_json::json!("ok"))
    );
}

#[test]
fn async_call_without_a_subscription_is_dropped() {
    init_tracing();
    let server = mock_server_with(vec![
        json_mock("/anything", "{}").expect(0), // must never be hit
    ]);

    let api = ApiClient::builder(server.uri()).build().expect("build");
    api.fetch_async("/anything");

    // Give a misbehaving implementation a moment to actually send.
    std::thread::sleep(Duration::from_millis(200));
    runtime::block_on(server.verify());
}
