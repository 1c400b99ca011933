//! HTTP adapter for the remote character catalog.
//!
//! Implements [`CatalogClient`] against a Rick and Morty style REST API:
//!
//! - `GET {base}/character/?name={name}` → `{"results": [...]}`, 404 when nothing matches
//! - `GET {base}/character/{id}` → a record, 404 when the id is unknown
//! - `GET {base}/character/{id},{id},...` → a record or an array of records

use crate::catalog::client::{CatalogClient, OneOrMany};
use crate::domain::{CatalogError, CharacterId, CharacterSummary, FinderError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Search response page. Only the first page is used.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    results: Vec<CharacterSummary>,
}

/// `reqwest`-backed catalog client.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError::Config`] if the URL is empty or the HTTP client
    /// cannot be built.
    ///
    /// # Examples
    ///
    /// ```
    /// use character_finder::catalog::HttpCatalogClient;
    /// use std::time::Duration;
    ///
    /// let client = HttpCatalogClient::new("https://rickandmortyapi.com/api/", Duration::from_secs(10))?;
    /// assert_eq!(client.base_url(), "https://rickandmortyapi.com/api");
    /// # Ok::<(), character_finder::FinderError>(())
    /// ```
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(FinderError::Config("catalog base URL is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FinderError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> std::result::Result<T, CatalogError> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(status = %status, url = %response.url(), "catalog responded");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }
        let response = response.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search_by_name(&self, name: &str) -> std::result::Result<Vec<CharacterSummary>, CatalogError> {
        let request = self
            .http
            .get(format!("{}/character/", self.base_url))
            .query(&[("name", name)]);
        let page: SearchPage = self.fetch(request).await?;
        Ok(page.results)
    }

    async fn get_by_id(&self, id: CharacterId) -> std::result::Result<CharacterSummary, CatalogError> {
        let request = self.http.get(format!("{}/character/{id}", self.base_url));
        self.fetch(request).await
    }

    async fn get_by_ids(&self, ids: &[CharacterId]) -> std::result::Result<Vec<CharacterSummary>, CatalogError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let request = self.http.get(format!("{}/character/{joined}", self.base_url));
        let body: OneOrMany<CharacterSummary> = self.fetch(request).await?;
        Ok(body.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    const SUMMER: &str = r#"{
        "id": 3, "name": "Summer Smith", "status": "Alive", "species": "Human",
        "type": "", "gender": "Female",
        "origin": {"name": "Earth (Replacement Dimension)", "url": ""},
        "location": {"name": "Earth (Replacement Dimension)", "url": ""},
        "image": "https://example.invalid/3.jpeg"
    }"#;

    /// Answers one request with `status` and `body`, then reports the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (HttpCatalogClient, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let head = String::from_utf8_lossy(&request);
            let request_line = head.lines().next().unwrap_or_default().to_string();

            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            tx.send(request_line).ok();
        });

        let client = HttpCatalogClient {
            http: reqwest::Client::builder()
                .no_proxy()
                .timeout(Duration::from_secs(5))
                .build()
                .unwrap(),
            base_url: format!("http://{addr}/api"),
        };
        (client, rx)
    }

    #[tokio::test]
    async fn search_404_is_not_found() {
        let (client, request) = serve_once("404 Not Found", r#"{"error":"There is nothing here"}"#).await;

        let outcome = client.search_by_name("Zyx999").await;

        assert_eq!(outcome, Err(CatalogError::NotFound));
        assert_eq!(request.await.unwrap(), "GET /api/character/?name=Zyx999 HTTP/1.1");
    }

    #[tokio::test]
    async fn server_error_is_transient() {
        let (client, _request) = serve_once("500 Internal Server Error", "{}").await;

        let outcome = client.search_by_name("Rick").await;

        assert!(matches!(outcome, Err(CatalogError::Transient(_))), "{outcome:?}");
    }

    #[tokio::test]
    async fn undecodable_body_is_transient() {
        let (client, _request) = serve_once("200 OK", "{\"results\": [").await;

        let outcome = client.search_by_name("Rick").await;

        assert!(matches!(outcome, Err(CatalogError::Transient(_))), "{outcome:?}");
    }

    #[tokio::test]
    async fn search_results_are_decoded() {
        const PAGE: &str = r#"{"info": {"count": 1}, "results": [{
            "id": 3, "name": "Summer Smith", "status": "Alive", "species": "Human",
            "type": "", "gender": "Female",
            "origin": {"name": "Earth", "url": ""}, "location": {"name": "Earth", "url": ""},
            "image": ""
        }]}"#;
        let (client, request) = serve_once("200 OK", PAGE).await;

        let results = client.search_by_name("Summer Smith").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Summer Smith");
        assert_eq!(request.await.unwrap(), "GET /api/character/?name=Summer+Smith HTTP/1.1");
    }

    #[tokio::test]
    async fn single_id_batch_accepts_bare_object() {
        let (client, request) = serve_once("200 OK", SUMMER).await;

        let records = client.get_by_ids(&[3]).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 3);
        assert_eq!(request.await.unwrap(), "GET /api/character/3 HTTP/1.1");
    }

    #[tokio::test]
    async fn multi_id_batch_accepts_array() {
        const PAIR: &str = r#"[
            {"id": 1, "name": "Rick Sanchez", "status": "Alive", "species": "Human", "type": "",
             "gender": "Male", "origin": {"name": "Earth", "url": ""}, "location": {"name": "Earth", "url": ""}, "image": ""},
            {"id": 2, "name": "Morty Smith", "status": "Alive", "species": "Human", "type": "",
             "gender": "Male", "origin": {"name": "Earth", "url": ""}, "location": {"name": "Earth", "url": ""}, "image": ""}
        ]"#;
        let (client, request) = serve_once("200 OK", PAIR).await;

        let records = client.get_by_ids(&[1, 2]).await.unwrap();

        let ids: Vec<_> = records.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(request.await.unwrap(), "GET /api/character/1,2 HTTP/1.1");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let (client, _request) = serve_once("404 Not Found", r#"{"error":"Character not found"}"#).await;

        assert_eq!(client.get_by_id(42).await, Err(CatalogError::NotFound));
    }

    #[test]
    fn rejects_empty_base_url() {
        let err = HttpCatalogClient::new("  /".trim(), Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, FinderError::Config(_)));
    }

    #[test]
    fn search_page_without_results_is_empty() {
        let page: SearchPage = serde_json::from_str(r#"{"info": {"count": 0}}"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[tokio::test]
    async fn empty_id_list_needs_no_request() {
        // Port 9 (discard) is never contacted: an empty list short-circuits.
        let client = HttpCatalogClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        assert_eq!(client.get_by_ids(&[]).await, Ok(vec![]));
    }
}
