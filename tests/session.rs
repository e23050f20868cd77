// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end sessions against a local HTTP server

use ttyml::{Error, HttpClient, HttpClientConfig, ScriptedInput, Session};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NS: &str = "https://ttyml.org/2018/05/26";

fn doc(body: &str) -> String {
    format!(r#"<?xml version="1.0"?><ttyml xmlns="{}">{}</ttyml>"#, NS, body)
}

fn ttyml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(doc(body), "text/ttyml")
}

fn session(lines: &[&str]) -> Session<ScriptedInput, Vec<u8>, Vec<u8>> {
    let client = HttpClient::with_config(HttpClientConfig::new().send_terminal_size(false)).unwrap();
    Session::new(
        client,
        ScriptedInput::new(lines.iter().copied()),
        Vec::new(),
        Vec::new(),
    )
}

fn stdout(session: &Session<ScriptedInput, Vec<u8>, Vec<u8>>) -> String {
    String::from_utf8(session.output().clone()).unwrap()
}

fn stderr(session: &Session<ScriptedInput, Vec<u8>, Vec<u8>>) -> String {
    String::from_utf8(session.errors().clone()).unwrap()
}

const FORM_GET: &str = r#"<line>Welcome</line>
<form action="/submit" method="GET">
  <var name="a" value="1"/>
  <prompt name="b">B? </prompt>
</form>"#;

const FORM_POST: &str = r#"<form action="/submit" method="POST">
  <var name="a" value="1"/>
  <prompt name="b">B? </prompt>
</form>"#;

#[tokio::test]
async fn test_single_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("accept", "text/ttyml"))
        .respond_with(ttyml("<line>hello</line>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&[]);
    session.run(&format!("{}/", server.uri())).await.unwrap();

    assert_eq!(stdout(&session), "hello\n");
    assert!(session.input().prompts().is_empty());
}

#[tokio::test]
async fn test_styled_line() {
    let server = MockServer::start().await;
    Mock::given(path("/"))
        .respond_with(ttyml(r#"<line>A<style fg="1" bold="1">B</style>C</line>"#))
        .mount(&server)
        .await;

    let mut session = session(&[]);
    session.run(&server.uri()).await.unwrap();

    assert_eq!(stdout(&session), "A\x1b[1;31mB\x1b[mC\n");
}

#[tokio::test]
async fn test_form_get() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ttyml(FORM_GET))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/submit"))
        .and(query_param("a", "1"))
        .and(query_param("b", "two words"))
        .respond_with(ttyml("<line>done</line>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&["two words"]);
    session
        .run(&format!("{}/x?q=old", server.uri()))
        .await
        .unwrap();

    assert_eq!(stdout(&session), "Welcome\ndone\n");
    assert_eq!(session.input().prompts(), ["B? "]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].url.query(), Some("a=1&b=two%20words"));
    assert!(requests[1].body.is_empty());
}

#[tokio::test]
async fn test_form_post() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(ttyml(FORM_POST))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("a=1&b=two%20words"))
        .respond_with(ttyml("<line>posted</line>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&["  two words\t"]);
    session
        .run(&format!("{}/x?q=old", server.uri()))
        .await
        .unwrap();

    assert_eq!(stdout(&session), "posted\n");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[1].url.path(), "/submit");
    assert_eq!(requests[1].url.query(), None);
}

#[tokio::test]
async fn test_filter_retry() {
    let server = MockServer::start().await;
    Mock::given(path("/"))
        .respond_with(ttyml(
            r#"<form action="/n"><prompt name="n" filter-regex="[0-9]+" filter-message="digits only">N: </prompt></form>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(path("/n"))
        .and(query_param("n", "42"))
        .respond_with(ttyml("<line>ok</line>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&["abc", "", "42"]);
    session.run(&format!("{}/", server.uri())).await.unwrap();

    assert_eq!(stderr(&session), "digits only\n");
    assert_eq!(session.input().prompts(), ["N: ", "N: ", "N: "]);
    assert_eq!(stdout(&session), "ok\n");
}

#[tokio::test]
async fn test_default_rejection_message() {
    let server = MockServer::start().await;
    Mock::given(path("/"))
        .respond_with(ttyml(
            r#"<form><prompt name="y" filter-regex="y|n"/></form>"#,
        ))
        .mount(&server)
        .await;

    let mut session = session(&["maybe"]);
    session.run(&format!("{}/", server.uri())).await.unwrap();

    assert_eq!(stderr(&session), "Invalid input.  Must match 'y|n'\n");
}

#[tokio::test]
async fn test_unsupported_media_type_is_fatal_at_start() {
    let server = MockServer::start().await;
    Mock::given(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .mount(&server)
        .await;

    let mut session = session(&[]);
    let err = session.run(&format!("{}/", server.uri())).await.unwrap_err();

    assert!(matches!(err, Error::UnsupportedMediaType(_)));
    assert_eq!(stdout(&session), "");
}

#[tokio::test]
async fn test_failed_submission_asks_again() {
    let server = MockServer::start().await;
    Mock::given(path("/x"))
        .respond_with(ttyml(FORM_GET))
        .mount(&server)
        .await;
    Mock::given(path("/submit"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html></html>", "text/html"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(path("/submit"))
        .and(query_param("b", "second"))
        .respond_with(ttyml("<line>done</line>"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session(&["first", "second"]);
    session
        .run(&format!("{}/x", server.uri()))
        .await
        .unwrap();

    assert_eq!(
        stderr(&session),
        "Error: server responded with unsupported content type 'text/html'\n"
    );
    assert_eq!(session.input().prompts().len(), 2);
    assert_eq!(stdout(&session), "Welcome\ndone\n");
}

#[tokio::test]
async fn test_malformed_submission_asks_again() {
    let server = MockServer::start().await;
    Mock::given(path("/x"))
        .respond_with(ttyml(FORM_GET))
        .mount(&server)
        .await;
    Mock::given(path("/submit"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(format!(r#"<ttyml xmlns="{}"><line>"#, NS), "text/ttyml"),
        )
        .mount(&server)
        .await;

    let mut session = session(&["first"]);
    session
        .run(&format!("{}/x", server.uri()))
        .await
        .unwrap();

    assert!(stderr(&session).starts_with("Error: malformed document: "));
    assert_eq!(session.input().prompts().len(), 2);
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let server = MockServer::start().await;
    Mock::given(path("/x"))
        .respond_with(ttyml(FORM_GET))
        .mount(&server)
        .await;

    let mut session = session(&[]);
    session
        .run(&format!("{}/x", server.uri()))
        .await
        .unwrap();

    assert_eq!(stdout(&session), "Welcome\n");
    assert_eq!(session.input().prompts(), ["B? "]);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_first_document_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(path("/"))
        .respond_with(ttyml(r#"<line>unclosed"#))
        .mount(&server)
        .await;

    let mut session = session(&[]);
    let err = session.run(&format!("{}/", server.uri())).await.unwrap_err();
    assert!(matches!(err, Error::MalformedDocument(_)));
}
