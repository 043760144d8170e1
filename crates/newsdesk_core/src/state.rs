use newsdesk_logging::newsdesk_debug;

use crate::error::{EMPTY_ARTICLE_URL, MISSING_URL};
use crate::view_model::{AppViewModel, ArticlePanel};
use crate::{
    filter_and_sort, ArticleDetail, Effect, NewsItem, Operation, RequestSlot, RequestState,
    RequestToken, ScrapeError, SortKey, ViewFilter, NEWS_SOURCES,
};

/// All interaction state of the client. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    url_input: String,
    listing: RequestSlot<Vec<NewsItem>>,
    article: RequestSlot<ArticleDetail>,
    filter: ViewFilter,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn listing(&self) -> &RequestSlot<Vec<NewsItem>> {
        &self.listing
    }

    pub fn article(&self) -> &RequestSlot<ArticleDetail> {
        &self.article
    }

    pub fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    /// The list as it should be displayed, recomputed on every call.
    pub fn displayed_items(&self) -> Vec<NewsItem> {
        self.listing
            .payload()
            .map(|items| filter_and_sort(items, &self.filter))
            .unwrap_or_default()
    }

    pub fn view(&self) -> AppViewModel {
        let items = self.displayed_items();
        let total_items = self.listing.payload().map_or(0, Vec::len);
        let listing_loading = self.listing.is_loading();
        let article = match self.article.state() {
            RequestState::Idle => ArticlePanel::Closed,
            RequestState::Loading => ArticlePanel::Loading,
            RequestState::Failed(message) => ArticlePanel::Failed(message.clone()),
            RequestState::Succeeded(detail) => ArticlePanel::Open(detail.clone()),
        };

        AppViewModel {
            url_input: self.url_input.clone(),
            can_scrape: !self.url_input.trim().is_empty() && !listing_loading,
            listing_loading,
            listing_error: self.listing.error().map(str::to_owned),
            items,
            total_items,
            filters_enabled: total_items > 0,
            filter: self.filter.clone(),
            article,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_preset(&mut self, index: usize) {
        if let Some(source) = NEWS_SOURCES.get(index) {
            self.set_url_input(source.url.to_string());
        }
    }

    pub(crate) fn set_keyword(&mut self, keyword: String) {
        if self.filter.keyword != keyword {
            self.filter.keyword = keyword;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_sort(&mut self, sort_by: SortKey) {
        if self.filter.sort_by != sort_by {
            self.filter.sort_by = sort_by;
            self.mark_dirty();
        }
    }

    pub(crate) fn start_listing(&mut self) -> Vec<Effect> {
        self.mark_dirty();
        let url = self.url_input.trim().to_string();
        if url.is_empty() {
            let message = ScrapeError::Validation(MISSING_URL.to_string()).listing_message();
            return cancel_if(self.listing.reject(message), Operation::Listing);
        }

        let token = self.listing.begin();
        vec![Effect::ScrapeListing { token, url }]
    }

    pub(crate) fn apply_listing(
        &mut self,
        token: RequestToken,
        result: Result<Vec<NewsItem>, ScrapeError>,
    ) {
        let applied = match result {
            Ok(items) if items.is_empty() => self
                .listing
                .fail(token, ScrapeError::EmptyResult.listing_message()),
            Ok(items) => self.listing.succeed(token, items),
            Err(err) => self.listing.fail(token, err.listing_message()),
        };
        if applied {
            self.mark_dirty();
        } else {
            newsdesk_debug!("Discarding stale listing response token={}", token);
        }
    }

    pub(crate) fn dismiss_listing_error(&mut self) {
        if self.listing.error().is_some() {
            self.listing.reset();
            self.mark_dirty();
        }
    }

    pub(crate) fn start_article(&mut self, url: String) -> Vec<Effect> {
        self.mark_dirty();
        let url = url.trim().to_string();
        if url.is_empty() {
            let message = ScrapeError::Validation(EMPTY_ARTICLE_URL.to_string()).article_message();
            return cancel_if(self.article.reject(message), Operation::Article);
        }

        let token = self.article.begin();
        vec![Effect::ScrapeArticle { token, url }]
    }

    pub(crate) fn apply_article(
        &mut self,
        token: RequestToken,
        result: Result<ArticleDetail, ScrapeError>,
    ) {
        let applied = match result {
            Ok(detail) => self.article.succeed(token, detail),
            Err(err) => self.article.fail(token, err.article_message()),
        };
        if applied {
            self.mark_dirty();
        } else {
            newsdesk_debug!("Discarding stale article response token={}", token);
        }
    }

    pub(crate) fn close_article(&mut self) -> Vec<Effect> {
        if matches!(self.article.state(), RequestState::Idle) {
            return Vec::new();
        }
        self.mark_dirty();
        cancel_if(self.article.reset(), Operation::Article)
    }
}

fn cancel_if(abandoned: bool, operation: Operation) -> Vec<Effect> {
    if abandoned {
        vec![Effect::Cancel { operation }]
    } else {
        Vec::new()
    }
}
