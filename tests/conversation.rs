use folio::{
    config::Config, constants::FALLBACK_REPLY, render, ContextBuilder, ConversationSession,
    Fragment, GeminiClient, Profile, Sender, SendOutcome, SessionState, Span,
};
use serde_json::json;
use std::sync::Arc;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn session_against(server: &MockServer) -> ConversationSession {
    let config = Config {
        api_key: "test-api-key".to_string(),
        base_url: server.uri(),
        ..Config::default()
    };
    let client = GeminiClient::new(&config).unwrap();
    ConversationSession::new(Profile::bundled().unwrap(), Arc::new(client))
}

#[tokio::test]
async fn visitor_question_gets_rendered_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "**React** is great" }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_against(&server);
    session.open();
    let before = session.len();

    let outcome = session.send("What are your skills?").await;
    assert_eq!(outcome, SendOutcome::Answered);
    assert_eq!(session.state(), SessionState::Idle);

    let transcript = session.transcript();
    assert_eq!(transcript.len(), before + 2);

    let question = &transcript[before];
    assert_eq!(question.sender(), Sender::Visitor);
    assert_eq!(question.text(), "What are your skills?");

    let answer = &transcript[before + 1];
    assert_eq!(answer.sender(), Sender::Assistant);
    assert_eq!(answer.text(), "**React** is great");

    let fragments: Vec<_> = render(answer.text()).collect();
    assert_eq!(
        fragments,
        vec![Fragment::Paragraph(vec![
            Span::Emphasis("React".to_string()),
            Span::Plain(" is great".to_string()),
        ])]
    );
}

#[tokio::test]
async fn request_carries_profile_context_and_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        })))
        .mount(&server)
        .await;

    let session = session_against(&server);
    session.send("How can I contact you?").await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    let expected = ContextBuilder::new(session.profile()).build_prompt("How can I contact you?");
    assert_eq!(prompt, expected);
    assert!(prompt.contains("EXPERIENCE:\n- Freelance Web Developer at Freelance Web Developer"));
}

#[tokio::test]
async fn failing_endpoint_always_yields_the_same_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let session = session_against(&server);
    let before = session.len();

    for _ in 0..2 {
        assert_eq!(session.send("Tell me about your projects").await, SendOutcome::Fallback);
        let transcript = session.transcript();
        assert_eq!(transcript.last().unwrap().text(), FALLBACK_REPLY);
    }
    assert_eq!(session.len(), before + 4);
}

#[tokio::test]
async fn closing_the_chat_keeps_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "* **Laravel** - backend" }] } }]
        })))
        .mount(&server)
        .await;

    let session = session_against(&server);
    session.open();
    session.send_quick(0).await;
    session.close();
    session.close();
    session.open();

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].text(), "What are your main skills?");
    assert!(matches!(
        render(transcript[2].text()).next(),
        Some(Fragment::Bullet { lead: Some(ref lead), .. }) if lead == "Laravel"
    ));
}
