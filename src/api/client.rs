// src/api/client.rs
//! Thin HTTP client for the PDF Otter API.
//!
//! Handles authentication and raw request/response plumbing; decoding lives
//! in `parser`.

use super::responses::{ApiResponse, TemplateDetails};
use crate::constants::TEMPLATES_PATH;
use crate::error::AppError;
use crate::model::TemplateRef;
use crate::types::{ApiEndpoint, ApiKey};
use reqwest::{header, Client, Response};

/// A thin wrapper around reqwest Client for PDF Otter requests.
#[derive(Clone)]
pub struct PdfOtterHttpClient {
    client: Client,
    endpoint: ApiEndpoint,
    api_key: ApiKey,
}

impl PdfOtterHttpClient {
    /// Creates a new HTTP client for the given endpoint.
    pub fn new(endpoint: ApiEndpoint, api_key: ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Makes an authenticated GET request to `path` under the endpoint.
    ///
    /// Authentication is HTTP Basic with the API key as username and an
    /// empty password.
    pub async fn get(&self, path: &str) -> Result<Response, AppError> {
        let url = self.endpoint.join(path);
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .basic_auth(self.api_key.as_str(), Some(""))
            .send()
            .await?;

        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::TemplateRepository for PdfOtterHttpClient {
    async fn list_templates(&self) -> Result<Vec<TemplateRef>, AppError> {
        let response = self.get(TEMPLATES_PATH).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_template_list(result)
    }

    async fn retrieve_details(&self, template: &TemplateRef) -> Result<TemplateDetails, AppError> {
        let path = format!("{}/{}", TEMPLATES_PATH, template.id);
        let response = self.get(&path).await?;
        let result = extract_response_text(response).await?;
        super::parser::parse_template_details(result)
    }
}

/// Extracts the response body as text with status and URL metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
