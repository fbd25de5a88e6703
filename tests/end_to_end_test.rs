//! End-to-end: completion client -> chat proxy -> mocked upstream.

mod common;

use mediator::config::{CHAT_ROUTE, PROXY_URL_ENV_VAR, Settings, UPSTREAM_URL_ENV_VAR};
use mediator::llm::wire::CREDENTIAL_ENV_VAR;
use mediator::llm::{CompletionClient, CompletionRequest, Route, request_completion};
use mediator::mediation::{analyze, render_report};
use mediator::server::AppState;
use mediator::{Audience, PromptConfiguration, Tone};
use serde_json::json;
use serial_test::serial;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_proxy_without_server_credential_yields_mock() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let proxy = common::spawn_proxy(AppState::new(common::upstream_url(&upstream), None, "gpt-5.1")).await;
    let client = CompletionClient::new(Route::Proxy(proxy), None);

    let result = client
        .request(CompletionRequest::new("sys", "hello"))
        .await
        .unwrap();

    assert!(result.was_mocked);
}

#[tokio::test]
async fn test_full_mediation_through_proxy() {
    let upstream = MockServer::start().await;
    let model_output = r#"Sure! ```json
{"sentiment":"concerned","value_tags":["safety","fairness"],"fallacy":"none","rewrite":"Could we agree on crossing guards first?","consensus_stub":"Everyone wants children safe.","minority_note":"none"}
```"#;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::completion_body(model_output)))
        .expect(1)
        .mount(&upstream)
        .await;

    let proxy = common::spawn_proxy(AppState::new(
        common::upstream_url(&upstream),
        Some("server-key".to_string()),
        "gpt-5.1",
    ))
    .await;
    let client = CompletionClient::new(Route::Proxy(proxy), None);
    let config = PromptConfiguration::new(Tone::Gentle, Audience::Citizen).with_profile("parent of two");

    let analysis = analyze(&client, &config, "The school road is a death trap!", None, "gpt-5.1")
        .await
        .unwrap();

    assert!(!analysis.completion.was_mocked);
    assert_eq!(analysis.completion.raw_payload, Some(json!({"content": model_output})));
    let fields = analysis.fields.as_ref().unwrap();
    assert_eq!(fields.sentiment(), Some("concerned"));
    assert_eq!(fields.value_tags(), vec!["safety", "fairness"]);

    let report = render_report(&analysis);
    assert!(report.contains("safety, fairness"));
    assert!(!report.contains("[mock]"));
}

#[tokio::test]
async fn test_proxy_upstream_failure_reaches_client() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Incorrect API key provided"))
        .mount(&upstream)
        .await;

    let proxy = common::spawn_proxy(AppState::new(
        common::upstream_url(&upstream),
        Some("bad-key".to_string()),
        "gpt-5.1",
    ))
    .await;
    let client = CompletionClient::new(Route::Proxy(proxy), None);

    let err = client
        .request(CompletionRequest::new("sys", "hello"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.to_string().contains("Incorrect API key provided"));
}

#[tokio::test]
#[serial]
async fn test_request_completion_without_any_configuration_is_mocked() {
    let settings = temp_env::with_vars(
        [
            (CREDENTIAL_ENV_VAR, None::<&str>),
            (PROXY_URL_ENV_VAR, None),
            (UPSTREAM_URL_ENV_VAR, None),
        ],
        Settings::from_env,
    );

    let result = request_completion(&settings, CompletionRequest::new("sys", "hello"))
        .await
        .unwrap();

    assert!(result.was_mocked);
    assert!(!result.text.is_empty());
}

#[tokio::test]
#[serial]
async fn test_request_completion_prefers_configured_proxy() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::completion_body("via proxy")))
        .expect(1)
        .mount(&upstream)
        .await;
    let proxy = common::spawn_proxy(AppState::new(
        common::upstream_url(&upstream),
        Some("server-key".to_string()),
        "gpt-5.1",
    ))
    .await;
    assert!(proxy.ends_with(CHAT_ROUTE));

    let settings = temp_env::with_vars(
        [
            (CREDENTIAL_ENV_VAR, None::<&str>),
            (PROXY_URL_ENV_VAR, Some(proxy.as_str())),
        ],
        Settings::from_env,
    );

    let result = request_completion(&settings, CompletionRequest::new("sys", "hello"))
        .await
        .unwrap();

    assert_eq!(result.text, "via proxy");
    assert!(!result.was_mocked);
}
