use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlInputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::PresetSelected(index) => {
            state.select_preset(index);
            Vec::new()
        }
        Msg::ScrapeSubmitted => state.start_listing(),
        Msg::ListingLoaded { token, result } => {
            state.apply_listing(token, result);
            Vec::new()
        }
        Msg::ListingErrorDismissed => {
            state.dismiss_listing_error();
            Vec::new()
        }
        Msg::ArticleRequested { url } => state.start_article(url),
        Msg::ArticleLoaded { token, result } => {
            state.apply_article(token, result);
            Vec::new()
        }
        Msg::ArticleClosed => state.close_article(),
        Msg::KeywordChanged(keyword) => {
            state.set_keyword(keyword);
            Vec::new()
        }
        Msg::SortChanged(sort_by) => {
            state.set_sort(sort_by);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
