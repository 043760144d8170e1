use crate::{ArticleDetail, NewsItem, RequestToken, ScrapeError, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    UrlInputChanged(String),
    /// User picked one of the preset news sources by index.
    PresetSelected(usize),
    /// User asked to scrape the site in the URL input.
    ScrapeSubmitted,
    /// Engine finished a listing request.
    ListingLoaded {
        token: RequestToken,
        result: Result<Vec<NewsItem>, ScrapeError>,
    },
    /// User dismissed the listing error banner.
    ListingErrorDismissed,
    /// User opened an article from the list.
    ArticleRequested { url: String },
    /// Engine finished an article request.
    ArticleLoaded {
        token: RequestToken,
        result: Result<ArticleDetail, ScrapeError>,
    },
    /// User closed the article view.
    ArticleClosed,
    /// User edited the keyword filter.
    KeywordChanged(String),
    /// User picked a sort order.
    SortChanged(SortKey),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
