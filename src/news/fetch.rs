use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use reqwest::{Client, StatusCode};
use std::io::Write;

const AUTH_FAILURE: &str = "The request was bad.";
const GENERIC_FAILURE: &str = "Something went wrong.";

/// Every Top Stories call has the form `<base><category>.json?api-key=<key>`.
/// Nothing is percent-encoded; categories come from a fixed list and keys are
/// plain hex.
pub fn create_url(base: &str, category: &str, api_key: &str) -> String {
    format!("{}{}.json?api-key={}", base, category, api_key)
}

pub fn build_client() -> Result<Client> {
    // No timeout: a stalled request blocks until the transport gives up.
    let client = Client::builder()
        .user_agent("top-stories/0.1")
        .gzip(true)
        .build()?;
    Ok(client)
}

/// Issues one GET. `Ok(None)` means the server answered with a non-200
/// status; the diagnostic has already been written to `out`.
pub async fn get_raw_data<W: Write>(
    client: &Client,
    url: &str,
    out: &mut W,
) -> Result<Option<String>> {
    let resp = client
        .get(url)
        .send()
        .await
        .context("request to Top Stories API failed")?;

    let status = resp.status();
    tracing::debug!(status = status.as_u16(), "top stories response");
    match status {
        StatusCode::OK => {}
        StatusCode::FORBIDDEN => {
            tracing::warn!(status = status.as_u16(), "request rejected");
            writeln!(out, "{}", AUTH_FAILURE)?;
            return Ok(None);
        }
        other => {
            tracing::warn!(status = other.as_u16(), "unexpected status");
            writeln!(out, "{}", GENERIC_FAILURE)?;
            return Ok(None);
        }
    }

    // Stream with a max size limit
    let mut stream = resp.bytes_stream();
    let mut buf: Vec<u8> = Vec::new();
    let max = max_body_bytes();
    while let Some(chunk) = stream.next().await {
        let c = chunk.context("failed to read response body")?;
        if buf.len() + c.len() > max {
            bail!("response too large (>{} bytes)", max);
        }
        buf.extend_from_slice(&c);
    }
    Ok(Some(body_text(buf)))
}

// Invalid UTF-8 is replaced rather than rejected
fn body_text(buf: Vec<u8>) -> String {
    match String::from_utf8(buf) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("response body is not valid UTF-8; replacing invalid bytes");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

fn max_body_bytes() -> usize {
    // 5 MB cap
    5 * 1024 * 1024
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::news::category::CATEGORIES;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves a single canned response on a random local port. The handle
    /// resolves to the request line the client sent.
    pub(crate) async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let (base, handle) = serve(&[(status, body)]).await;
        let handle = tokio::spawn(async move {
            let mut lines = handle.await.unwrap();
            lines.pop().unwrap_or_default()
        });
        (base, handle)
    }

    /// Answers one connection per canned `(status, body)` pair, in order.
    pub(crate) async fn serve(responses: &[(&str, &str)]) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let responses: Vec<String> = responses
            .iter()
            .map(|(status, body)| {
                format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
            })
            .collect();
        let handle = tokio::spawn(async move {
            let mut request_lines = Vec::new();
            for response in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut head = Vec::new();
                let mut byte = [0u8; 1];
                while !head.ends_with(b"\r\n\r\n") {
                    if socket.read(&mut byte).await.unwrap() == 0 {
                        break;
                    }
                    head.push(byte[0]);
                }
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
                let head = String::from_utf8_lossy(&head).into_owned();
                request_lines.push(head.lines().next().unwrap_or_default().to_string());
            }
            request_lines
        });
        (format!("http://{}/svc/topstories/v2/", addr), handle)
    }

    #[test]
    fn url_is_plain_concatenation() {
        let base = "https://api.nytimes.com/svc/topstories/v2/";
        for c in CATEGORIES {
            assert_eq!(
                create_url(base, c, "k3y"),
                format!("{}{}.json?api-key=k3y", base, c)
            );
        }
        assert_eq!(
            create_url(base, "world", "abc"),
            "https://api.nytimes.com/svc/topstories/v2/world.json?api-key=abc"
        );
    }

    #[tokio::test]
    async fn ok_returns_body_verbatim() {
        let body = r#"{"status":"OK","results":[]}"#;
        let (base, server) = serve_once("200 OK", body).await;
        let client = build_client().unwrap();
        let mut out = Vec::new();

        let got = get_raw_data(&client, &create_url(&base, "world", "k"), &mut out)
            .await
            .unwrap();

        assert_eq!(got.as_deref(), Some(body));
        assert!(out.is_empty());
        let request_line = server.await.unwrap();
        assert_eq!(
            request_line,
            "GET /svc/topstories/v2/world.json?api-key=k HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn forbidden_prints_auth_diagnostic() {
        let (base, server) = serve_once("403 Forbidden", "<html>not json</html>").await;
        let client = build_client().unwrap();
        let mut out = Vec::new();

        let got = get_raw_data(&client, &create_url(&base, "arts", "bad"), &mut out)
            .await
            .unwrap();

        assert!(got.is_none());
        assert_eq!(String::from_utf8(out).unwrap(), "The request was bad.\n");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn server_error_prints_generic_diagnostic() {
        let (base, server) = serve_once("500 Internal Server Error", "oops").await;
        let client = build_client().unwrap();
        let mut out = Vec::new();

        let got = get_raw_data(&client, &create_url(&base, "arts", "k"), &mut out)
            .await
            .unwrap();

        assert!(got.is_none());
        assert_eq!(String::from_utf8(out).unwrap(), "Something went wrong.\n");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn oversized_body_is_an_error() {
        let body = "x".repeat(max_body_bytes() + 1024 * 1024);
        let (base, _server) = serve_once("200 OK", &body).await;
        let client = build_client().unwrap();
        let mut out = Vec::new();

        let err = get_raw_data(&client, &create_url(&base, "world", "k"), &mut out)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("too large"));
        assert!(out.is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        assert_eq!(body_text(b"{\"a\":1}".to_vec()), "{\"a\":1}");
        assert_eq!(body_text(vec![b'o', b'k', 0xff]), "ok\u{fffd}");
    }

    #[tokio::test]
    async fn connection_refused_is_an_error() {
        // Bind then drop so the port is very likely closed.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = build_client().unwrap();
        let mut out = Vec::new();
        let url = format!("http://{}/world.json?api-key=k", addr);
        assert!(get_raw_data(&client, &url, &mut out).await.is_err());
        assert!(out.is_empty());
    }
}
