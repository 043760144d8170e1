use std::sync::Once;

use newsdesk_core::{
    update, AppState, Effect, Msg, NewsItem, Operation, RequestState, RequestToken, ScrapeError,
    LISTING_FALLBACK, MISSING_URL, NO_ARTICLES_FOUND, NO_RESPONSE,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(newsdesk_logging::initialize_for_tests);
}

fn item(title: &str, author: &str, date: &str) -> NewsItem {
    NewsItem {
        title: title.to_string(),
        author: author.to_string(),
        date: date.to_string(),
        source: "Example".to_string(),
        url: format!("https://example.com/{}", title.to_lowercase()),
        image_url: None,
    }
}

fn submit(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlInputChanged(input.to_string()));
    update(state, Msg::ScrapeSubmitted)
}

fn listing_token(effects: &[Effect]) -> RequestToken {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ScrapeListing { token, .. } => Some(*token),
            _ => None,
        })
        .expect("scrape listing effect")
}

#[test]
fn submit_emits_scrape_with_trimmed_url() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "  https://news.example.com/ ");

    assert_eq!(
        effects,
        vec![Effect::ScrapeListing {
            token: 1,
            url: "https://news.example.com/".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.listing_loading);
    assert!(!view.can_scrape);
    assert_eq!(view.listing_error, None);
    assert!(state.consume_dirty());
}

#[test]
fn empty_url_fails_without_network_call() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "   ");

    assert!(effects.is_empty());
    assert_eq!(
        state.listing().state(),
        &RequestState::Failed(MISSING_URL.to_string())
    );
}

#[test]
fn successful_listing_is_stored() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, effects) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Ok(vec![item("X", "A", "2024-01-01")]),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(!view.listing_loading);
    assert_eq!(view.listing_error, None);
    assert_eq!(view.total_items, 1);
    assert_eq!(view.items, vec![item("X", "A", "2024-01-01")]);
    assert!(view.filters_enabled);
}

#[test]
fn empty_listing_is_a_soft_failure() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Ok(Vec::new()),
        },
    );

    let view = state.view();
    assert!(!view.listing_loading);
    assert_eq!(view.listing_error.as_deref(), Some(NO_ARTICLES_FOUND));
    assert!(view.items.is_empty());
    assert!(!view.filters_enabled);
}

#[test]
fn non_listing_page_reads_as_no_articles() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Err(ScrapeError::EmptyResult),
        },
    );

    let view = state.view();
    assert!(!view.listing_loading);
    assert_eq!(view.listing_error.as_deref(), Some(NO_ARTICLES_FOUND));
    assert!(!view.filters_enabled);
}

#[test]
fn server_error_message_is_passed_through() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Err(ScrapeError::Server {
                status: Some(400),
                error: Some("bad url".to_string()),
            }),
        },
    );

    assert_eq!(state.view().listing_error.as_deref(), Some("bad url"));
}

#[test]
fn server_error_without_body_uses_fallback() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Err(ScrapeError::Server {
                status: Some(502),
                error: None,
            }),
        },
    );

    assert_eq!(state.view().listing_error.as_deref(), Some(LISTING_FALLBACK));
}

#[test]
fn missing_response_reports_server_down() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Err(ScrapeError::NoResponse),
        },
    );

    assert_eq!(state.view().listing_error.as_deref(), Some(NO_RESPONSE));
    assert!(!state.view().listing_loading);
}

#[test]
fn unknown_failure_prefixes_description() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://news.example.com");
    let token = listing_token(&effects);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Err(ScrapeError::Unknown("builder error".to_string())),
        },
    );

    assert_eq!(
        state.view().listing_error.as_deref(),
        Some("Error: builder error")
    );
}

#[test]
fn later_request_wins_over_stale_response() {
    init_logging();
    let (state, first) = submit(AppState::new(), "https://a.example.com");
    let (state, second) = submit(state, "https://b.example.com");
    let first = listing_token(&first);
    let second = listing_token(&second);
    assert_ne!(first, second);

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token: second,
            result: Ok(vec![item("Second", "B", "2024-02-01")]),
        },
    );
    let (mut state, _) = update(state, Msg::Tick);
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::ListingLoaded {
            token: first,
            result: Ok(vec![item("First", "A", "2024-01-01")]),
        },
    );

    assert!(!state.consume_dirty());
    assert_eq!(state.view().items, vec![item("Second", "B", "2024-02-01")]);
}

#[test]
fn stale_failure_does_not_clobber_pending_request() {
    init_logging();
    let (state, first) = submit(AppState::new(), "https://a.example.com");
    let (state, _second) = submit(state, "https://b.example.com");

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token: listing_token(&first),
            result: Err(ScrapeError::NoResponse),
        },
    );

    let view = state.view();
    assert!(view.listing_loading);
    assert_eq!(view.listing_error, None);
}

#[test]
fn new_scrape_clears_previous_results() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://a.example.com");
    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token: listing_token(&effects),
            result: Ok(vec![item("Old", "A", "2024-01-01")]),
        },
    );
    assert_eq!(state.view().total_items, 1);

    let (state, _) = update(state, Msg::ScrapeSubmitted);

    let view = state.view();
    assert!(view.listing_loading);
    assert!(view.items.is_empty());
    assert_eq!(view.total_items, 0);
}

#[test]
fn validation_failure_abandons_in_flight_listing() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "https://a.example.com");
    let token = listing_token(&effects);

    let (state, effects) = submit(state, "");
    assert_eq!(
        effects,
        vec![Effect::Cancel {
            operation: Operation::Listing
        }]
    );

    let (state, _) = update(
        state,
        Msg::ListingLoaded {
            token,
            result: Ok(vec![item("Late", "A", "2024-01-01")]),
        },
    );
    assert_eq!(state.view().listing_error.as_deref(), Some(MISSING_URL));
    assert!(state.view().items.is_empty());
}

#[test]
fn dismissing_error_returns_to_idle() {
    init_logging();
    let (state, _) = submit(AppState::new(), "");
    assert!(state.view().listing_error.is_some());

    let (mut state, effects) = update(state, Msg::ListingErrorDismissed);
    assert!(effects.is_empty());
    assert_eq!(state.listing().state(), &RequestState::Idle);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::ListingErrorDismissed);
    assert!(!state.consume_dirty());
}

#[test]
fn dismiss_is_ignored_while_loading() {
    init_logging();
    let (state, _) = submit(AppState::new(), "https://a.example.com");
    let (state, _) = update(state, Msg::ListingErrorDismissed);

    assert!(state.listing().is_loading());
}
