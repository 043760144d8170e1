use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Listing,
    Article,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Listing => write!(f, "listing"),
            Operation::Article => write!(f, "article"),
        }
    }
}

/// One entry of the `news` array returned by `/scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItemPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Success body of `/scrape`. A missing or null `news` key reads as an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListingPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub news: Vec<NewsItemPayload>,
}

/// Success body of `/scrape-article`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ListingCompleted {
        request_id: RequestId,
        result: Result<ListingPayload, ApiError>,
    },
    ArticleCompleted {
        request_id: RequestId,
        result: Result<ArticlePayload, ApiError>,
    },
}

impl EngineEvent {
    pub(crate) fn failed(operation: Operation, request_id: RequestId, error: ApiError) -> Self {
        match operation {
            Operation::Listing => EngineEvent::ListingCompleted {
                request_id,
                result: Err(error),
            },
            Operation::Article => EngineEvent::ArticleCompleted {
                request_id,
                result: Err(error),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with a non-2xx status.
    Server { status: u16, error: Option<String> },
    /// The request went out but nothing usable came back.
    NoResponse,
    Timeout,
    /// The request could not be built, e.g. a base URL without a scheme.
    InvalidRequest,
    /// A 2xx response whose body did not decode.
    InvalidBody,
    /// The request was superseded or the engine shut down first.
    Cancelled,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Server { status, error } => match error {
                Some(error) => write!(f, "server status {status} ({error})"),
                None => write!(f, "server status {status}"),
            },
            ApiErrorKind::NoResponse => write!(f, "no response"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::InvalidRequest => write!(f, "invalid request"),
            ApiErrorKind::InvalidBody => write!(f, "invalid response body"),
            ApiErrorKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
