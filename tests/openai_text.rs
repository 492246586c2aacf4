use promptcraft::ai::gpt::OpenAiTextModel;
use promptcraft::{RemoteError, TextModel};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn model(server: &MockServer) -> OpenAiTextModel {
    let url = format!("{}/v1/chat/completions", server.uri());
    OpenAiTextModel::new(reqwest::Client::new(), "k", "gpt-test", &url)
}

#[tokio::test]
async fn sends_payload_and_returns_first_choice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer k"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-test",
            "messages": [{ "role": "user", "content": "describe a fox" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"  a red fox in snow \n"}}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let text = model(&server).generate_text("describe a fox").await.unwrap();
    assert_eq!(text, "a red fox in snow");
}

#[tokio::test]
async fn error_status_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let err = model(&server).generate_text("x").await.unwrap_err();
    match err {
        RemoteError::Status { status, body } => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn missing_choices_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"choices":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = model(&server).generate_text("x").await.unwrap_err();
    assert!(matches!(err, RemoteError::MissingContent));
}

#[tokio::test]
async fn unreachable_endpoint_is_transport_error() {
    let model = OpenAiTextModel::new(
        reqwest::Client::new(),
        "k",
        "gpt-test",
        "http://127.0.0.1:9/v1/chat/completions",
    );
    let err = model.generate_text("x").await.unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}
