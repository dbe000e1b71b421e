use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Url};
use thiserror::Error;

use super::schema::{self, SchemaError};
use super::types::{Event, FetchResult};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("repofeed/", env!("CARGO_PKG_VERSION"));

/// Status and body of one HTTP exchange
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single GET the fetcher needs from the HTTP layer
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status().as_u16();

        // Error bodies are never inspected
        if !response.status().is_success() {
            return Ok(HttpResponse {
                status,
                body: Vec::new(),
            });
        }

        let body = response.bytes().await?.to_vec();
        Ok(HttpResponse { status, body })
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    #[error("non-success response code from Github, status: {0}")]
    Status(u16),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Schema(#[from] SchemaError),
}

impl FetchError {
    fn transport(err: &anyhow::Error) -> Self {
        let message = err.to_string();
        if message.trim().is_empty() {
            FetchError::Transport("Unexpected error".to_string())
        } else {
            FetchError::Transport(message)
        }
    }
}

/// Fetches and validates the public event feed of a repository
pub struct EventsClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl EventsClient {
    pub fn new(base_url: Url, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            base_url,
        }
    }

    /// `{base}/repos/{owner}/{repo}/events`, each name percent-encoded as a
    /// single path segment. A name of `.` or `..` is dropped by URL path
    /// normalization.
    pub fn events_url(&self, owner: &str, repo: &str) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                FetchError::Transport(format!("cannot build request path on {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "events"]);
        Ok(url)
    }

    /// One request, no retries. Every failure is folded into
    /// [`FetchResult::Failure`].
    #[tracing::instrument(name = "EventsClient::fetch_events", skip(self))]
    pub async fn fetch_events(&self, owner: &str, repo: &str) -> FetchResult {
        match self.try_fetch_events(owner, repo).await {
            Ok(events) => {
                tracing::info!("Fetched {} events", events.len());
                FetchResult::Success(events)
            }
            Err(err) => {
                tracing::warn!("Fetching events failed: {}", err);
                FetchResult::Failure(err.to_string())
            }
        }
    }

    async fn try_fetch_events(&self, owner: &str, repo: &str) -> Result<Vec<Event>, FetchError> {
        let url = self.events_url(owner, repo)?;
        tracing::debug!("GET {}", url);

        let response = self
            .transport
            .get(url)
            .await
            .map_err(|err| FetchError::transport(&err))?;

        if !response.is_success() {
            return Err(FetchError::Status(response.status));
        }

        let payload: serde_json::Value = serde_json::from_slice(&response.body)?;
        Ok(schema::parse_events(&payload)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::feed::{format_local_time, render_result, FeedView};
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    /// Replays one canned outcome and records every requested URL
    struct FakeTransport {
        outcome: Mutex<Option<Result<HttpResponse>>>,
        requests: Mutex<Vec<Url>>,
    }

    impl FakeTransport {
        fn respond(status: u16, body: &str) -> Arc<Self> {
            Self::with(Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            }))
        }

        fn fail(err: anyhow::Error) -> Arc<Self> {
            Self::with(Err(err))
        }

        fn with(outcome: Result<HttpResponse>) -> Arc<Self> {
            Arc::new(Self {
                outcome: Mutex::new(Some(outcome)),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Url> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: Url) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(url);
            self.outcome
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(anyhow::anyhow!("no more canned responses")))
        }
    }

    fn client(transport: Arc<FakeTransport>) -> EventsClient {
        EventsClient::new(Url::parse(DEFAULT_API_URL).unwrap(), transport)
    }

    fn rendered_lines(result: &FetchResult) -> Vec<String> {
        match render_result(Some(result)) {
            FeedView::Lines(lines) => lines,
            other => panic!("expected event lines, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_renders_event_line() {
        let transport = FakeTransport::respond(
            200,
            concat!(
                r#"[{"actor":{"login":"alice","url":"u"},"#,
                r#""created_at":"2024-01-01T00:00:00Z","type":"PushEvent"}]"#,
            ),
        );

        let result = client(transport).fetch_events("o", "r").await;

        let FetchResult::Success(events) = &result else {
            panic!("expected success, got {result:?}");
        };
        assert_eq!(events.len(), 1);

        let local = format_local_time(&Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(
            rendered_lines(&result),
            vec![format!("- PushEvent by @alice at {local}")]
        );
    }

    #[tokio::test]
    async fn not_found_reports_status() {
        let transport = FakeTransport::respond(404, r#"{"message":"Not Found"}"#);

        let result = client(transport).fetch_events("o", "missing").await;

        match result {
            FetchResult::Failure(message) => {
                assert!(message.contains("status: 404"), "{message}");
                assert_eq!(message, "non-success response code from Github, status: 404");
            }
            FetchResult::Success(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn non_success_body_is_not_parsed() {
        // A body that would fail validation must not leak into the message
        let transport = FakeTransport::respond(503, "not json at all");

        let result = client(transport).fetch_events("o", "r").await;

        assert_eq!(
            result,
            FetchResult::Failure("non-success response code from Github, status: 503".to_string())
        );
    }

    #[tokio::test]
    async fn missing_login_is_a_validation_failure() {
        let transport = FakeTransport::respond(200, r#"[{"actor":{"url":"u"}}]"#);

        let result = client(transport).fetch_events("o", "r").await;

        match result {
            FetchResult::Failure(message) => assert!(message.contains("actor.login"), "{message}"),
            FetchResult::Success(events) => panic!("expected failure, got {events:?}"),
        }
    }

    #[tokio::test]
    async fn null_type_and_time_render_markers() {
        let transport = FakeTransport::respond(
            200,
            r#"[{"actor":{"login":"bob","url":"u"},"created_at":null,"type":null}]"#,
        );

        let result = client(transport).fetch_events("o", "r").await;

        assert!(result.is_success());
        assert_eq!(rendered_lines(&result), vec!["- null by @bob at unknown time"]);
    }

    #[tokio::test]
    async fn transport_fault_uses_its_message() {
        let transport = FakeTransport::fail(anyhow::anyhow!("dns error: no such host"));

        let result = client(transport).fetch_events("o", "r").await;

        assert_eq!(result, FetchResult::Failure("dns error: no such host".to_string()));
    }

    #[tokio::test]
    async fn transport_fault_without_message_is_unexpected() {
        let transport = FakeTransport::fail(anyhow::anyhow!(""));

        let result = client(transport).fetch_events("o", "r").await;

        assert_eq!(result, FetchResult::Failure("Unexpected error".to_string()));
    }

    #[tokio::test]
    async fn malformed_json_is_a_failure() {
        let transport = FakeTransport::respond(200, "<html>rate limited</html>");

        let result = client(transport).fetch_events("o", "r").await;

        match result {
            FetchResult::Failure(message) => assert!(!message.is_empty()),
            FetchResult::Success(_) => panic!("expected failure"),
        }
    }

    #[tokio::test]
    async fn sends_exactly_one_request_to_events_endpoint() {
        let transport = FakeTransport::respond(500, "");

        let result = client(transport.clone()).fetch_events("rust-lang", "rust").await;

        assert!(!result.is_success());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].as_str(),
            "https://api.github.com/repos/rust-lang/rust/events"
        );
    }

    #[test]
    fn events_url_encodes_each_segment() {
        let client = client(FakeTransport::respond(200, "[]"));

        let url = client.events_url("a/b", "c d").unwrap();

        assert_eq!(url.as_str(), "https://api.github.com/repos/a%2Fb/c%20d/events");
    }

    #[test]
    fn events_url_drops_dot_segments() {
        let client = client(FakeTransport::respond(200, "[]"));

        let url = client.events_url("..", "x").unwrap();

        assert_eq!(url.as_str(), "https://api.github.com/repos/x/events");
    }

    #[test]
    fn events_url_keeps_base_path() {
        let client = EventsClient::new(
            Url::parse("https://ghe.example.com/api/v3").unwrap(),
            FakeTransport::respond(200, "[]"),
        );

        let url = client.events_url("o", "r").unwrap();

        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/o/r/events");
    }

    #[test]
    fn status_range_is_2xx() {
        let response = |status| HttpResponse {
            status,
            body: Vec::new(),
        };
        assert!(response(200).is_success());
        assert!(response(204).is_success());
        assert!(response(299).is_success());
        assert!(!response(199).is_success());
        assert!(!response(304).is_success());
        assert!(!response(404).is_success());
    }

    /// Serves one canned HTTP/1.1 reply on a loopback port and hands back the
    /// raw request head
    async fn serve_once(reply: &'static str) -> (Url, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|window| window == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&head).to_lowercase()
        });
        let url = Url::parse(&format!("http://{addr}/repos/o/r/events")).unwrap();
        (url, handle)
    }

    fn loopback_transport() -> ReqwestTransport {
        ReqwestTransport::with_client(Client::builder().no_proxy().build().unwrap())
    }

    #[tokio::test]
    async fn reqwest_transport_skips_error_body() {
        let (url, server) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 5\r\nConnection: close\r\n\r\nnope!",
        )
        .await;

        let response = loopback_transport().get(url).await.unwrap();
        server.await.unwrap();

        assert_eq!(response.status, 404);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn reqwest_transport_reads_success_body_and_sends_headers() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 2\r\n\
             Connection: close\r\n\r\n[]",
        )
        .await;

        let response = loopback_transport().get(url).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"[]");
        assert!(request.starts_with("get /repos/o/r/events http/1.1\r\n"));
        assert!(request.contains("\r\naccept: application/vnd.github+json\r\n"));
        assert!(request.contains(&format!("\r\nuser-agent: {}\r\n", USER_AGENT.to_lowercase())));
    }
}
