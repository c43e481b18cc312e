//! HTTP client for the spreadsheet-backed records API
//!
//! One read primitive, one write primitive, no retries. Reads follow the
//! endpoint's JSONP dialect (callback-qualified URL, padded response); writes
//! POST a JSON body and either parse the envelope or, in opaque mode, treat
//! delivery itself as success.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;

use crate::config::{ApiConfig, WriteMode};
use crate::error::{Error, Result};
use crate::types::Collection;

use super::protocol::{strip_jsonp, Action, ApiEnvelope, RequestId, WriteRequest};

/// HTTP client for the records API.
///
/// Cheap to clone would be nice but unnecessary; callers hold it behind the
/// sync layer. Every call is one-shot: one request, one settlement, no
/// retry and no in-flight deduplication.
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    write_mode: WriteMode,
    timeout_secs: u64,
}

impl ApiClient {
    /// Create a new client from configuration.
    ///
    /// Returns an error if the configuration is invalid or missing the
    /// endpoint URL.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;

        let base_url = config
            .base_url
            .clone()
            .ok_or_else(|| Error::Config("api.base_url is required".to_string()))?
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let timeout_secs = config.effective_timeout_secs();
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url,
            write_mode: config.write_mode,
            timeout_secs,
        })
    }

    /// Fetch one collection's rows as a raw envelope.
    ///
    /// `success: false` envelopes become [`Error::Server`]; a request that
    /// exceeds the deadline becomes [`Error::Timeout`].
    pub async fn get(&self, collection: Collection) -> Result<ApiEnvelope> {
        let request_id = RequestId::generate();
        let url = self.read_url(Action::Get, Some(collection), &request_id);

        tracing::debug!(sheet = %collection, request_id = %request_id, "GET collection");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout_secs))?;

        if !status.is_success() {
            return Err(Error::Network(format!(
                "API error ({}): {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let json = strip_jsonp(&body, &request_id)?;
        let envelope: ApiEnvelope = serde_json::from_str(json)?;
        envelope.into_result()
    }

    /// Fetch one collection's rows, deserialized into domain records.
    ///
    /// A missing `data` field yields an empty vec; row order is preserved.
    pub async fn fetch_records<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>> {
        let rows = self.get(collection).await?.into_rows();
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(serde_json::from_value(row)?);
        }
        tracing::debug!(sheet = %collection, count = records.len(), "Loaded records");
        Ok(records)
    }

    /// Check whether the endpoint is reachable and answering.
    ///
    /// Transport failures are reported as `Ok(false)` rather than errors so
    /// callers can poll this without error handling.
    pub async fn health(&self) -> Result<bool> {
        let request_id = RequestId::generate();
        let url = self.read_url(Action::Health, None, &request_id);

        match self.http_client.get(&url).send().await {
            Ok(response) => {
                if !response.status().is_success() {
                    return Ok(false);
                }
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(_) => return Ok(false),
                };
                let healthy = strip_jsonp(&body, &request_id)
                    .ok()
                    .and_then(|json| serde_json::from_str::<ApiEnvelope>(json).ok())
                    .map(|envelope| envelope.success)
                    .unwrap_or(false);
                Ok(healthy)
            }
            Err(_) => Ok(false),
        }
    }

    /// Issue a write (`add`, `update`, `delete`) for one collection.
    ///
    /// In transparent mode the server's envelope is parsed and a
    /// `success: false` answer becomes [`Error::Server`]. In opaque mode the
    /// response body is never read: delivery is reported as success with the
    /// record echoed back, so server-side failures are invisible. Writes are
    /// not idempotent; callers must not blindly resend on failure.
    pub async fn write(
        &self,
        action: Action,
        collection: Collection,
        record: serde_json::Value,
        id: Option<i64>,
    ) -> Result<ApiEnvelope> {
        debug_assert!(!action.is_read(), "write() called with a read action");

        let mut request = WriteRequest::new(action, collection, &record);
        if let Some(id) = id {
            request = request.with_id(id);
        }

        tracing::debug!(sheet = %collection, action = %action, id = ?id, "POST write");

        let response = self
            .http_client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::from_transport(e, self.timeout_secs))?;

        match self.write_mode {
            WriteMode::Opaque => {
                // no-cors contract: a delivered request is all we can see
                Ok(ApiEnvelope::assumed_success(record))
            }
            WriteMode::Transparent => {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .map_err(|e| Error::from_transport(e, self.timeout_secs))?;

                if !status.is_success() {
                    return Err(Error::Network(format!(
                        "API error ({}): {}",
                        status,
                        body.chars().take(200).collect::<String>()
                    )));
                }

                let envelope: ApiEnvelope = serde_json::from_str(body.trim())?;
                envelope.into_result()
            }
        }
    }

    /// Build a callback-qualified read URL.
    ///
    /// Carries the correlation ID as `callback` plus the `_cb`/`_t`
    /// cache-busting parameters the endpoint's deployments expect.
    fn read_url(
        &self,
        action: Action,
        collection: Option<Collection>,
        request_id: &RequestId,
    ) -> String {
        let mut url = format!("{}?action={}", self.base_url, action.as_str());
        if let Some(collection) = collection {
            url.push_str("&sheet=");
            url.push_str(&urlencoding::encode(collection.as_str()));
        }
        url.push_str("&callback=");
        url.push_str(request_id.as_str());
        url.push_str(&format!(
            "&_cb={}&_t={}",
            uuid::Uuid::new_v4().simple(),
            chrono::Utc::now().timestamp_millis()
        ));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ApiConfig {
        ApiConfig {
            base_url: Some("https://script.example.com/macros/s/abc/exec/".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_requires_base_url() {
        let config = ApiConfig::default();
        assert!(ApiClient::new(&config).is_err());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = ApiClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url, "https://script.example.com/macros/s/abc/exec");
    }

    #[test]
    fn test_read_url_shape() {
        let client = ApiClient::new(&test_config()).unwrap();
        let id = RequestId::generate();
        let url = client.read_url(Action::Get, Some(Collection::Hives), &id);

        assert!(url.starts_with("https://script.example.com/macros/s/abc/exec?action=get"));
        assert!(url.contains("&sheet=Hives"));
        assert!(url.contains(&format!("&callback={}", id.as_str())));
        assert!(url.contains("&_cb="));
        assert!(url.contains("&_t="));
    }

    #[test]
    fn test_health_url_has_no_sheet() {
        let client = ApiClient::new(&test_config()).unwrap();
        let id = RequestId::generate();
        let url = client.read_url(Action::Health, None, &id);

        assert!(url.contains("action=health"));
        assert!(!url.contains("sheet="));
    }

    #[tokio::test]
    async fn test_deadline_overrun_maps_to_timeout() {
        use std::io::Read as _;
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept the request but never answer it
        let server = std::thread::spawn(move || {
            if let Ok((mut socket, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf);
                std::thread::sleep(Duration::from_secs(2));
            }
        });

        let config = ApiConfig {
            base_url: Some(format!("http://{}", addr)),
            timeout_secs: 1,
            ..Default::default()
        };
        let client = ApiClient::new(&config).unwrap();

        let err = client.get(Collection::Hives).await.unwrap_err();
        assert!(
            matches!(err, Error::Timeout { secs: 1 }),
            "expected Timeout, got: {:?}",
            err
        );

        server.join().unwrap();
    }

    #[test]
    fn test_concurrent_read_urls_never_share_a_callback() {
        let client = ApiClient::new(&test_config()).unwrap();
        let a = RequestId::generate();
        let b = RequestId::generate();
        let url_a = client.read_url(Action::Get, Some(Collection::Tasks), &a);
        let url_b = client.read_url(Action::Get, Some(Collection::Tasks), &b);
        assert_ne!(a, b);
        assert_ne!(url_a, url_b);
    }
}
