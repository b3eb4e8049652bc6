use reqwest::{Client, header::CONTENT_TYPE, multipart::Form};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Network(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedResource {
    pub status: u16,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Outbound HTTP used by a submission. An `Err` means the request never
/// produced a response; HTTP error statuses come back as `Ok`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<(&'static str, String)>,
    ) -> Result<TransportResponse, TransportError>;

    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError>;

    async fn fetch(&self, url: &str) -> Result<FetchedResource, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    async fn into_response(response: reqwest::Response) -> TransportResponse {
        let status = response.status().as_u16();
        // The status already arrived, so a broken body is not a transport failure.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(error = %err, status, "response body unreadable");
                String::new()
            }
        };
        TransportResponse { status, body }
    }
}

impl Transport for HttpTransport {
    async fn post_multipart(
        &self,
        url: &str,
        fields: Vec<(&'static str, String)>,
    ) -> Result<TransportResponse, TransportError> {
        let form = fields
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));
        let response = self.client.post(url).multipart(form).send().await?;
        Ok(Self::into_response(response).await)
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let response = self.client.post(url).json(body).send().await?;
        Ok(Self::into_response(response).await)
    }

    async fn fetch(&self, url: &str) -> Result<FetchedResource, TransportError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok(FetchedResource {
            status,
            content_type,
            bytes,
        })
    }
}
