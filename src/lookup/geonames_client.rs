use crate::config::ImportConfig;
use crate::error::Result;
use crate::lookup::{GeonameLookup, LookupResponse};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client for the GeoNames `getJSON` endpoint.
pub struct GeonamesClient {
    client: Client,
    base_url: String,
    username: String,
}

impl GeonamesClient {
    pub fn new(base_url: &str, username: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.connect_timeout(timeout).timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.to_string(),
            username: username.to_string(),
        })
    }

    /// Build a client from configuration, failing early when no account is set.
    pub fn from_config(config: &ImportConfig) -> Result<Self> {
        let username = config.require_user()?;
        Self::new(&config.api_url, username, config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn query<'a>(&'a self, geoname_id: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("formatted", "true"),
            ("username", self.username.as_str()),
            ("geonameId", geoname_id),
        ]
    }
}

impl GeonameLookup for GeonamesClient {
    async fn lookup(&self, geoname_id: u32) -> Result<LookupResponse> {
        let id = geoname_id.to_string();
        debug!(geoname_id, url = %self.base_url, "Requesting geoname");

        let response = self
            .client
            .get(&self.base_url)
            .query(&self.query(&id))
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body)?;

        Ok(LookupResponse::new(status_code, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use serde_json::json;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer one HTTP request with `status` and `body`, yielding the request line.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/getJSON", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            String::from_utf8_lossy(&request)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_lookup_sends_query_and_parses_body() -> Result<()> {
        let (url, server) = serve_once("200 OK", r#"{"continentCode":"EU","name":"Europe","geonameId":6255148}"#).await;
        let client = GeonamesClient::new(&url, "demo", Some(Duration::from_secs(5)))?;

        let response = client.lookup(6255148).await?;

        assert_eq!(
            server.await.unwrap(),
            "GET /getJSON?formatted=true&username=demo&geonameId=6255148 HTTP/1.1"
        );
        assert!(response.success);
        assert_eq!(response.status_code, 200);
        assert_eq!(response.payload, json!({"continentCode": "EU", "name": "Europe", "geonameId": 6255148}));
        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_keeps_error_status_and_body() -> Result<()> {
        let (url, server) = serve_once(
            "401 Unauthorized",
            r#"{"status":{"message":"user account not enabled to use the free webservice.","value":10}}"#,
        )
        .await;
        let client = GeonamesClient::new(&url, "demo", None)?;

        let response = client.lookup(6255146).await?;
        server.await.unwrap();

        assert!(!response.success);
        assert_eq!(response.status_code, 401);
        assert_eq!(response.payload["status"]["value"], 10);
        Ok(())
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() -> Result<()> {
        let (url, server) = serve_once("200 OK", "<html>maintenance</html>").await;
        let client = GeonamesClient::new(&url, "demo", None)?;

        let err = client.lookup(6255146).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ImportError::Json(_)));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_service_is_http_error() -> Result<()> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let url = format!("http://{}/getJSON", listener.local_addr()?);
        drop(listener);
        let client = GeonamesClient::new(&url, "demo", Some(Duration::from_secs(5)))?;

        let err = client.lookup(6255146).await.unwrap_err();

        assert!(matches!(err, ImportError::Http(_)));
        Ok(())
    }

    #[test]
    fn test_query_parameters() -> Result<()> {
        let client = GeonamesClient::new("http://api.geonames.org/getJSON", "demo", None)?;
        let query = client.query("6255148");

        assert_eq!(
            query,
            [("formatted", "true"), ("username", "demo"), ("geonameId", "6255148")]
        );
        Ok(())
    }

    #[test]
    fn test_from_config_requires_user() -> Result<()> {
        let config = ImportConfig::from_sources(None, Some(HashMap::new()))?;
        assert!(matches!(
            GeonamesClient::from_config(&config),
            Err(ImportError::MissingCredential(_))
        ));
        Ok(())
    }

    #[test]
    fn test_from_config_uses_api_url() -> Result<()> {
        let env = HashMap::from([
            ("GEONAMES_USER".to_string(), "demo".to_string()),
            ("GEONAMES_API_URL".to_string(), "http://localhost:8080/getJSON".to_string()),
        ]);
        let config = ImportConfig::from_sources(None, Some(env))?;

        let client = GeonamesClient::from_config(&config)?;
        assert_eq!(client.base_url(), "http://localhost:8080/getJSON");
        Ok(())
    }

    #[test]
    fn test_response_success_range() {
        assert!(LookupResponse::new(200, Value::Null).success);
        assert!(!LookupResponse::new(404, Value::Null).success);
        assert!(!LookupResponse::new(503, Value::Null).success);
    }
}
