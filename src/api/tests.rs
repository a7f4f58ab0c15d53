use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use super::*;
use crate::catalog::query::Filter;

type CapturedRequests = Arc<Mutex<Vec<String>>>;

struct CannedResponse {
    status_line: &'static str,
    body: String,
}

impl CannedResponse {
    fn ok(body: impl Into<String>) -> Self {
        Self {
            status_line: "200 OK",
            body: body.into(),
        }
    }

    fn status(status_line: &'static str) -> Self {
        Self {
            status_line,
            body: String::new(),
        }
    }
}

fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("client builds")
}

async fn read_request_line(stream: &mut tokio::net::TcpStream) -> Result<String, String> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];
    loop {
        let read = stream.read(&mut chunk).await.map_err(|err| err.to_string())?;
        if read == 0 {
            return Err("Unexpected EOF while reading HTTP request".to_string());
        }
        buffer.extend_from_slice(&chunk[..read]);
        if buffer.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }
    let text = String::from_utf8_lossy(&buffer);
    Ok(text.lines().next().unwrap_or_default().to_string())
}

/// Serve each canned response on its own connection, recording request lines.
async fn spawn_server(responses: Vec<CannedResponse>) -> (String, CapturedRequests) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    let captured: CapturedRequests = Arc::new(Mutex::new(Vec::new()));
    let captured_for_server = Arc::clone(&captured);

    tokio::spawn(async move {
        for response in responses {
            let (mut stream, _) = listener.accept().await.map_err(|err| err.to_string())?;
            let request_line = read_request_line(&mut stream).await?;
            captured_for_server.lock().await.push(request_line);

            let payload = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{}",
                response.status_line,
                response.body.len(),
                response.body
            );
            stream
                .write_all(payload.as_bytes())
                .await
                .map_err(|err| err.to_string())?;
        }
        Ok::<(), String>(())
    });

    (format!("http://{addr}/"), captured)
}

fn envelope_json(ids: &[usize], total: usize, page: usize, size: usize) -> String {
    let content: Vec<_> = ids
        .iter()
        .map(|id| serde_json::json!({"id": id, "name": format!("Player {id}"), "element": "Fire"}))
        .collect();
    let total_pages = total.div_ceil(size);
    serde_json::json!({
        "content": content,
        "totalPages": total_pages,
        "totalElements": total,
        "size": size,
        "number": page,
        "first": page == 0,
        "last": page + 1 >= total_pages,
        "empty": ids.is_empty()
    })
    .to_string()
}

#[test]
fn query_params_skip_blank_name_and_all_filters() {
    let query = QuerySpec {
        name: "  ".to_string(),
        element: Filter::parse("Fire"),
        position: Filter::All,
        gender: Filter::parse("Female"),
        role: Filter::parse("Captain"),
        ..QuerySpec::default()
    };
    let params = page_query_params(&query, PageRequest::new(2, 25));
    assert_eq!(
        params,
        vec![
            ("page", "2".to_string()),
            ("size", "25".to_string()),
            ("element", "Fire".to_string()),
            ("gender", "Female".to_string()),
        ]
    );
}

#[test]
fn construct_api_url_handles_slashes() {
    assert_eq!(
        construct_api_url("http://localhost:8080", CHARACTERS_PATH),
        "http://localhost:8080/api/characters"
    );
    assert_eq!(
        construct_api_url("https://example.org///", "/api/characters/teams"),
        "https://example.org/api/characters/teams"
    );
}

#[tokio::test]
async fn single_record_page_reports_collection_total() {
    let (base_url, captured) =
        spawn_server(vec![CannedResponse::ok(envelope_json(&[1], 37, 0, 1))]).await;

    let page = fetch_characters(
        &test_client(),
        &base_url,
        &QuerySpec::default(),
        PageRequest::new(0, 1),
    )
    .await
    .expect("page fetch succeeds");

    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 37);
    assert_eq!(page.total_pages, 37);
    assert!(page.first);

    let requests = captured.lock().await;
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].starts_with("GET /api/characters?page=0&size=1 "),
        "unexpected request line: {}",
        requests[0]
    );
}

#[tokio::test]
async fn active_filters_are_sent_as_query_parameters() {
    let (base_url, captured) =
        spawn_server(vec![CannedResponse::ok(envelope_json(&[], 0, 0, 25))]).await;
    let query = QuerySpec {
        name: "axel".to_string(),
        element: Filter::parse("Fire"),
        team: Filter::parse("Raimon"),
        ..QuerySpec::default()
    };

    let page = fetch_characters(&test_client(), &base_url, &query, PageRequest::new(0, 25))
        .await
        .expect("page fetch succeeds");
    assert!(page.empty);
    assert_eq!(page.total_pages, 0);

    let requests = captured.lock().await;
    let line = &requests[0];
    assert!(line.contains("page=0&size=25"), "{line}");
    assert!(line.contains("name=axel"), "{line}");
    assert!(line.contains("element=Fire"), "{line}");
    assert!(line.contains("team=Raimon"), "{line}");
    assert!(!line.contains("position="), "{line}");
}

#[tokio::test]
async fn non_success_status_becomes_network_error_with_status_text() {
    let (base_url, _) = spawn_server(vec![CannedResponse::status("503 Service Unavailable")]).await;

    let err = fetch_characters(
        &test_client(),
        &base_url,
        &QuerySpec::default(),
        PageRequest::first(25),
    )
    .await
    .expect_err("503 should fail");

    match err {
        SourceError::Network { status, message } => {
            assert_eq!(status, Some(503));
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected network error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let (base_url, _) = spawn_server(vec![CannedResponse::ok("<html>oops</html>")]).await;

    let err = fetch_characters(
        &test_client(),
        &base_url,
        &QuerySpec::default(),
        PageRequest::first(25),
    )
    .await
    .expect_err("html body should fail");
    assert!(matches!(err, SourceError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn teams_endpoint_returns_names() {
    let (base_url, captured) =
        spawn_server(vec![CannedResponse::ok(r#"["Raimon","Royal Academy","Zeus"]"#)]).await;

    let teams = fetch_teams(&test_client(), &base_url)
        .await
        .expect("teams fetch succeeds");
    assert_eq!(teams, ["Raimon", "Royal Academy", "Zeus"]);

    let requests = captured.lock().await;
    assert!(requests[0].starts_with("GET /api/characters/teams "));
}

#[tokio::test]
async fn refused_connection_is_a_network_error_without_status() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");
    drop(listener);

    let err = fetch_teams(&test_client(), &format!("http://{addr}"))
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, SourceError::Network { status: None, .. }), "{err:?}");
}
