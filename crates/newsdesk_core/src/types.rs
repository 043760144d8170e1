/// One article summary returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewsItem {
    pub title: String,
    pub author: String,
    /// Free-form display string; parsed only for sorting.
    pub date: String,
    pub source: String,
    pub url: String,
    pub image_url: Option<String>,
}

/// Full content of a single article returned by the article endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleDetail {
    pub title: String,
    pub author: String,
    pub date: String,
    /// Raw text with newlines preserved.
    pub content: String,
    pub image_url: Option<String>,
    pub source: String,
}
