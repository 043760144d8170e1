use thiserror::Error;

pub const MISSING_URL: &str = "Please enter a website URL";
pub const EMPTY_ARTICLE_URL: &str = "This article has no link to open.";
pub const NO_ARTICLES_FOUND: &str =
    "No news articles found. The website might use a different structure or dynamic loading.";
pub const LISTING_FALLBACK: &str = "Failed to scrape news. Please try a different URL.";
pub const NO_RESPONSE: &str = "No response from server. Please make sure the server is running.";
pub const ARTICLE_FALLBACK: &str = "Failed to fetch article content. Please try again.";

/// Every way a scrape request can fail, as seen by the state machine.
///
/// Network failures are converted into this type at the engine boundary;
/// `Validation` and `EmptyResult` are produced by `update` itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("response contained no articles")]
    EmptyResult,
    #[error("server responded with status {status:?}: {error:?}")]
    Server {
        status: Option<u16>,
        error: Option<String>,
    },
    #[error("no response from server")]
    NoResponse,
    #[error("{0}")]
    Unknown(String),
}

impl ScrapeError {
    /// Message shown for a failed listing request.
    pub fn listing_message(&self) -> String {
        match self {
            ScrapeError::Validation(message) => message.clone(),
            ScrapeError::EmptyResult => NO_ARTICLES_FOUND.to_string(),
            ScrapeError::Server { error, .. } => server_text(error)
                .unwrap_or(LISTING_FALLBACK)
                .to_string(),
            ScrapeError::NoResponse => NO_RESPONSE.to_string(),
            ScrapeError::Unknown(description) => format!("Error: {description}"),
        }
    }

    /// Message shown for a failed article request. Only a server-supplied
    /// error is passed through; everything else collapses to one fallback.
    pub fn article_message(&self) -> String {
        match self {
            ScrapeError::Validation(message) => message.clone(),
            ScrapeError::Server { error, .. } => server_text(error)
                .unwrap_or(ARTICLE_FALLBACK)
                .to_string(),
            ScrapeError::EmptyResult | ScrapeError::NoResponse | ScrapeError::Unknown(_) => {
                ARTICLE_FALLBACK.to_string()
            }
        }
    }
}

fn server_text(error: &Option<String>) -> Option<&str> {
    error.as_deref().filter(|text| !text.is_empty())
}
