use crate::{ArticleDetail, NewsItem, ViewFilter};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub can_scrape: bool,
    pub listing_loading: bool,
    pub listing_error: Option<String>,
    /// Filtered and sorted; what the list should show.
    pub items: Vec<NewsItem>,
    /// Size of the unfiltered result set.
    pub total_items: usize,
    pub filters_enabled: bool,
    pub filter: ViewFilter,
    pub article: ArticlePanel,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticlePanel {
    #[default]
    Closed,
    Loading,
    Failed(String),
    Open(ArticleDetail),
}

impl ArticlePanel {
    pub fn is_open(&self) -> bool {
        !matches!(self, ArticlePanel::Closed)
    }
}
