use crate::RequestToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue `POST {base}/scrape` for the given site.
    ScrapeListing { token: RequestToken, url: String },
    /// Issue `POST {base}/scrape-article` for the given article.
    ScrapeArticle { token: RequestToken, url: String },
    /// Abandon whatever request of this kind is still in flight.
    Cancel { operation: Operation },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Listing,
    Article,
}
