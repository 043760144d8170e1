use newsdesk_logging::{newsdesk_debug, newsdesk_warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{ApiError, ApiErrorKind, ApiSettings, ArticlePayload, ListingPayload};

/// The two calls the scraping backend offers.
#[async_trait::async_trait]
pub trait ScrapeApi: Send + Sync {
    async fn scrape_listing(&self, url: &str) -> Result<ListingPayload, ApiError>;

    async fn scrape_article(&self, url: &str) -> Result<ArticlePayload, ApiError>;
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestScrapeApi {
    settings: ApiSettings,
    client: reqwest::Client,
}

impl ReqwestScrapeApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidRequest, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn post<T: DeserializeOwned>(
        &self,
        endpoint: String,
        url: &str,
    ) -> Result<T, ApiError> {
        let target = reqwest::Url::parse(&endpoint)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidRequest, err.to_string()))?;
        newsdesk_debug!("POST {} url={}", target, url);

        let response = self
            .client
            .post(target)
            .json(&ScrapeRequest { url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let error = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.error);
            newsdesk_warn!("Backend answered {} for {}: {:?}", status, endpoint, error);
            return Err(ApiError::new(
                ApiErrorKind::Server {
                    status: status.as_u16(),
                    error,
                },
                status.to_string(),
            ));
        }

        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidBody, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ScrapeApi for ReqwestScrapeApi {
    async fn scrape_listing(&self, url: &str) -> Result<ListingPayload, ApiError> {
        self.post(self.settings.listing_url(), url).await
    }

    async fn scrape_article(&self, url: &str) -> Result<ArticlePayload, ApiError> {
        self.post(self.settings.article_url(), url).await
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiErrorKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ApiError::new(ApiErrorKind::InvalidRequest, err.to_string());
    }
    ApiError::new(ApiErrorKind::NoResponse, err.to_string())
}
