use async_trait::async_trait;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};

use graph_mailer::{
    credential::StaticTokenCredential, AccessToken, AsyncTransport, BoxError, GraphTransport,
    Message, TokenCredential,
};

/// Accepts a single connection, answers it with the given status and
/// body, and hands back the raw request bytes.
async fn single_response_server(
    status: &'static str,
    body: &'static str,
) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1.0", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            assert_ne!(n, 0, "peer closed before the request was complete");
            request.extend_from_slice(&buf[..n]);

            if let Some(read_to) = expected_len(&request) {
                if request.len() >= read_to {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len(),
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8(request).unwrap()
    });

    (base_url, handle)
}

/// Total request length once the header section is complete, `None`
/// while still reading headers.
fn expected_len(request: &[u8]) -> Option<usize> {
    let headers_end = request
        .windows(4)
        .position(|window| window == b"\r\n\r\n")?
        + 4;

    let headers = String::from_utf8_lossy(&request[..headers_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    Some(headers_end + content_length)
}

fn request_body(request: &str) -> serde_json::Value {
    let body = request.split("\r\n\r\n").nth(1).unwrap();
    serde_json::from_str(body).unwrap()
}

fn message() -> Message {
    Message::builder()
        .from("nobody@domain.tld".parse().unwrap())
        .to("hei@domain.tld".parse().unwrap())
        .subject("Happy new year")
        .text("Be happy!")
        .build()
        .unwrap()
}

#[tokio::test]
async fn sends_one_authenticated_post() {
    let (base_url, server) = single_response_server("202 Accepted", "").await;

    let mailer = GraphTransport::builder(StaticTokenCredential::new("tok"))
        .user("mailer@domain.tld")
        .save_to_sent_items(true)
        .base_url(base_url)
        .build();

    mailer.send(&message()).await.unwrap();

    let request = server.await.unwrap();
    assert!(
        request.starts_with("POST /v1.0/users/mailer@domain.tld/sendMail HTTP/1.1\r\n"),
        "unexpected request line: {request}"
    );
    assert!(
        request.to_lowercase().contains("authorization: bearer tok\r\n"),
        "missing authorization header: {request}"
    );

    let body = request_body(&request);
    assert_eq!(body["saveToSentItems"], serde_json::json!(true));
    assert_eq!(body["message"]["subject"], serde_json::json!("Happy new year"));
    assert_eq!(
        body["message"]["body"],
        serde_json::json!({"contentType": "Text", "content": "Be happy!"})
    );
    assert_eq!(
        body["message"]["toRecipients"],
        serde_json::json!([{"emailAddress": {"address": "hei@domain.tld"}}])
    );
}

#[tokio::test]
async fn endpoint_falls_back_to_message_sender() {
    let (base_url, server) = single_response_server("202 Accepted", "").await;

    let mailer = GraphTransport::builder(StaticTokenCredential::new("tok"))
        .base_url(base_url)
        .build();

    let message = Message::builder()
        .sender("boss@domain.tld".parse().unwrap())
        .to("hei@domain.tld".parse().unwrap())
        .build()
        .unwrap();

    mailer.send(&message).await.unwrap();

    let request = server.await.unwrap();
    assert!(
        request.starts_with("POST /v1.0/users/boss@domain.tld/sendMail HTTP/1.1\r\n"),
        "unexpected request line: {request}"
    );
}

#[tokio::test]
async fn endpoint_defaults_to_me() {
    let (base_url, server) = single_response_server("202 Accepted", "").await;

    let mailer = GraphTransport::builder(StaticTokenCredential::new("tok"))
        .base_url(base_url)
        .build();

    let message = Message::builder()
        .envelope(
            graph_mailer::Envelope::new(None, vec!["hei@domain.tld".parse().unwrap()]).unwrap(),
        )
        .build()
        .unwrap();

    mailer.send(&message).await.unwrap();

    let request = server.await.unwrap();
    assert!(
        request.starts_with("POST /v1.0/me/sendMail HTTP/1.1\r\n"),
        "unexpected request line: {request}"
    );
}

#[tokio::test]
async fn non_success_status_is_a_response_error() {
    let (base_url, server) =
        single_response_server("400 Bad Request", r#"{"error":{"code":"ErrorInvalidRecipients"}}"#)
            .await;

    let mailer = GraphTransport::builder(StaticTokenCredential::new("tok"))
        .base_url(base_url)
        .build();

    let error = mailer.send(&message()).await.unwrap_err();
    server.await.unwrap();

    assert!(error.is_response());
    assert!(!error.is_credential());
    assert_eq!(error.status(), Some(reqwest::StatusCode::BAD_REQUEST));
    assert!(error.body().unwrap().contains("ErrorInvalidRecipients"));
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    // Bind and drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1.0", listener.local_addr().unwrap());
    drop(listener);

    let mailer = GraphTransport::builder(StaticTokenCredential::new("tok"))
        .base_url(base_url)
        .build();

    let error = mailer.send(&message()).await.unwrap_err();
    assert!(error.is_network());
    assert!(error.status().is_none());
}

struct FailingCredential;

#[async_trait]
impl TokenCredential for FailingCredential {
    async fn token(&self, _scope: &str) -> Result<AccessToken, BoxError> {
        Err("identity provider unreachable".into())
    }
}

#[tokio::test]
async fn credential_failure_aborts_before_any_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/v1.0", listener.local_addr().unwrap());

    let mailer = GraphTransport::builder(FailingCredential)
        .base_url(base_url)
        .build();

    let error = mailer.send(&message()).await.unwrap_err();
    assert!(error.is_credential());
    assert!(error.to_string().contains("identity provider unreachable"));

    // Nothing tried to connect
    let accept = tokio::time::timeout(std::time::Duration::from_millis(50), listener.accept());
    assert!(accept.await.is_err());
}
