//! Newsdesk core: pure state machine, result transformer and view-model helpers.
mod effect;
mod error;
mod filter;
mod msg;
mod presets;
mod request;
mod state;
mod types;
mod update;
mod view_model;

pub use effect::{Effect, Operation};
pub use error::{
    ScrapeError, ARTICLE_FALLBACK, EMPTY_ARTICLE_URL, LISTING_FALLBACK, MISSING_URL,
    NO_ARTICLES_FOUND, NO_RESPONSE,
};
pub use filter::{
    filter_and_sort, matches_keyword, parse_display_date, title_collation_key, SortKey,
    ViewFilter,
};
pub use msg::Msg;
pub use presets::{NewsSource, NEWS_SOURCES};
pub use request::{RequestSlot, RequestState, RequestToken};
pub use state::AppState;
pub use types::{ArticleDetail, NewsItem};
pub use update::update;
pub use view_model::{AppViewModel, ArticlePanel};
