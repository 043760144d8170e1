//! Newsdesk engine: HTTP access to the scraping backend and effect execution.
mod client;
mod engine;
mod settings;
mod types;

pub use client::{ReqwestScrapeApi, ScrapeApi};
pub use engine::{EngineError, EngineHandle};
pub use settings::{
    ApiSettings, Environment, ARTICLE_ENDPOINT, DEVELOPMENT_BASE_URL, LISTING_ENDPOINT,
    PRODUCTION_BASE_URL,
};
pub use types::{
    ApiError, ApiErrorKind, ArticlePayload, EngineEvent, ListingPayload, NewsItemPayload,
    Operation, RequestId,
};
