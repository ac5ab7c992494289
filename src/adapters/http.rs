use crate::core::{ConfigProvider, RecordSource};
use crate::domain::model::{Party, PartyKind};
use crate::utils::error::{ContractError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fetches one kind of party record from `GET {base_url}/{cli|pro}/{identifier}`.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    kind: PartyKind,
    base_url: Url,
    timeout: Duration,
    client: Client,
}

impl HttpRecordSource {
    pub fn new(kind: PartyKind, base_url: &str, timeout_seconds: u64) -> Result<Self> {
        Self::with_client(kind, base_url, timeout_seconds, Client::new())
    }

    pub fn with_client(
        kind: PartyKind,
        base_url: &str,
        timeout_seconds: u64,
        client: Client,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ContractError::InvalidConfigValueError {
            field: "base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(ContractError::InvalidConfigValueError {
                field: "base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            kind,
            base_url,
            timeout: Duration::from_secs(timeout_seconds),
            client,
        })
    }

    /// Builds one source per kind sharing a single HTTP client.
    pub fn pair<C: ConfigProvider>(config: &C) -> Result<(Self, Self)> {
        let client = Client::builder().build()?;
        let contracting = Self::with_client(
            PartyKind::Contracting,
            config.base_url(),
            config.timeout_seconds(),
            client.clone(),
        )?;
        let contracted = Self::with_client(
            PartyKind::Contracted,
            config.base_url(),
            config.timeout_seconds(),
            client,
        )?;
        Ok((contracting, contracted))
    }

    /// `{base_url}/{segment}/{identifier}`, identifier encoded as one path segment.
    pub fn record_url(&self, identifier: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ContractError::ConfigError {
                message: format!("Base URL cannot take path segments: {}", self.base_url),
            })?
            .pop_if_empty()
            .push(self.kind.path_segment())
            .push(identifier);
        Ok(url)
    }

    fn fetch_error(&self, message: impl Into<String>) -> ContractError {
        ContractError::FetchError {
            kind: self.kind,
            message: message.into(),
        }
    }

    fn parse_party(&self, body: &serde_json::Value) -> Result<Party> {
        let field = |name: &str| -> Result<String> {
            match body.get(name) {
                Some(serde_json::Value::String(s)) => Ok(s.clone()),
                Some(serde_json::Value::Number(n)) => Ok(n.to_string()),
                Some(other) => Err(self.fetch_error(format!(
                    "Field '{}' has unexpected type: {}",
                    name, other
                ))),
                None => Err(self.fetch_error(format!("Response is missing field '{}'", name))),
            }
        };

        Ok(Party {
            name: field(self.kind.name_field())?,
            tax_id: field(self.kind.tax_id_field())?,
        })
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    fn kind(&self) -> PartyKind {
        self.kind
    }

    async fn fetch(&self, identifier: &str) -> Result<Party> {
        let url = self.record_url(identifier)?;
        tracing::debug!("Making {} record request to: {}", self.kind, url);

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContractError::TimeoutError {
                        kind: self.kind,
                        seconds: self.timeout.as_secs(),
                    }
                } else {
                    self.fetch_error(e.to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!("{} record response status: {}", self.kind, status);

        if !status.is_success() {
            return Err(self.fetch_error(format!("Request failed with status code {}", status.as_u16())));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ContractError::TimeoutError {
                    kind: self.kind,
                    seconds: self.timeout.as_secs(),
                }
            } else {
                self.fetch_error(format!("Malformed response body: {}", e))
            }
        })?;

        let party = self.parse_party(&body)?;
        tracing::info!("📥 Received {} record for '{}'", self.kind, party.name);
        Ok(party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;
    use httpmock::prelude::*;

    #[test]
    fn test_record_url_encodes_identifier() {
        let source =
            HttpRecordSource::new(PartyKind::Contracting, "http://localhost:8000/api", 5).unwrap();
        assert_eq!(
            source.record_url("9d48f5c9").unwrap().as_str(),
            "http://localhost:8000/api/cli/9d48f5c9"
        );
        assert_eq!(
            source.record_url("a/b c").unwrap().as_str(),
            "http://localhost:8000/api/cli/a%2Fb%20c"
        );

        let trailing =
            HttpRecordSource::new(PartyKind::Contracted, "http://localhost:8000/api/", 5).unwrap();
        assert_eq!(
            trailing.record_url("B1").unwrap().as_str(),
            "http://localhost:8000/api/pro/B1"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpRecordSource::new(PartyKind::Contracting, "not a url", 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[tokio::test]
    async fn test_fetch_contracted_record() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/pro/B1");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "id": "B1",
                        "nomeContratado": "João Souza",
                        "cpfContratado": "222.222.222-22"
                    }));
            })
            .await;

        let source =
            HttpRecordSource::new(PartyKind::Contracted, &server.url("/api"), 5).unwrap();
        let party = source.fetch("B1").await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(party, Party::new("João Souza", "222.222.222-22"));
    }

    #[tokio::test]
    async fn test_fetch_numeric_tax_id() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/cli/A1");
                then.status(200).json_body(serde_json::json!({
                    "nomeContratante": "Maria Silva",
                    "cpfContratante": 11111111111u64
                }));
            })
            .await;

        let source =
            HttpRecordSource::new(PartyKind::Contracting, &server.url("/api"), 5).unwrap();
        let party = source.fetch("A1").await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(party, Party::new("Maria Silva", "11111111111"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_scalar_field() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/cli/A1");
                then.status(200).json_body(serde_json::json!({
                    "nomeContratante": "Maria Silva",
                    "cpfContratante": ["111"]
                }));
            })
            .await;

        let source =
            HttpRecordSource::new(PartyKind::Contracting, &server.url("/api"), 5).unwrap();
        let err = source.fetch("A1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("cpfContratante"));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/cli/A1");
                then.status(404);
            })
            .await;

        let source =
            HttpRecordSource::new(PartyKind::Contracting, &server.url("/api"), 5).unwrap();
        let err = source.fetch("A1").await.unwrap_err();

        api_mock.assert_async().await;
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_wrong_field_names() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/cli/A1");
                then.status(200).json_body(serde_json::json!({
                    "nomeContratado": "Wrong kind",
                    "cpfContratado": "000"
                }));
            })
            .await;

        let source =
            HttpRecordSource::new(PartyKind::Contracting, &server.url("/api"), 5).unwrap();
        let err = source.fetch("A1").await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("nomeContratante"));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/pro/slow");
                then.status(200)
                    .delay(Duration::from_millis(2500))
                    .json_body(serde_json::json!({
                        "nomeContratado": "Late",
                        "cpfContratado": "1"
                    }));
            })
            .await;

        let source =
            HttpRecordSource::new(PartyKind::Contracted, &server.url("/api"), 1).unwrap();
        let err = source.fetch("slow").await.unwrap_err();

        assert!(matches!(err, ContractError::TimeoutError { seconds: 1, .. }));
        assert_eq!(err.kind(), ErrorKind::Fetch);
    }
}
