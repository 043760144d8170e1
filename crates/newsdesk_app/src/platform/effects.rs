use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use newsdesk_core::{ArticleDetail, Effect, Msg, NewsItem, Operation, ScrapeError};
use newsdesk_engine::{
    ApiError, ApiErrorKind, ApiSettings, ArticlePayload, EngineError, EngineEvent, EngineHandle,
    NewsItemPayload,
};
use newsdesk_logging::newsdesk_info;

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: ApiSettings,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScrapeListing { token, url } => {
                    newsdesk_info!("ScrapeListing token={} url={}", token, url);
                    self.engine
                        .submit(newsdesk_engine::Operation::Listing, token, url);
                }
                Effect::ScrapeArticle { token, url } => {
                    newsdesk_info!("ScrapeArticle token={} url={}", token, url);
                    self.engine
                        .submit(newsdesk_engine::Operation::Article, token, url);
                }
                Effect::Cancel { operation } => {
                    self.engine.cancel(map_operation(operation));
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<AppEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if event_tx.send(AppEvent::Engine(map_event(event))).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_operation(operation: Operation) -> newsdesk_engine::Operation {
    match operation {
        Operation::Listing => newsdesk_engine::Operation::Listing,
        Operation::Article => newsdesk_engine::Operation::Article,
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ListingCompleted { request_id, result } => Msg::ListingLoaded {
            token: request_id,
            result: result
                .map(|payload| payload.news.into_iter().map(map_item).collect())
                .map_err(map_listing_error),
        },
        EngineEvent::ArticleCompleted { request_id, result } => Msg::ArticleLoaded {
            token: request_id,
            result: result.map(map_article).map_err(map_error),
        },
    }
}

/// A 2xx page that is not a JSON listing (an HTML page, say) means the site
/// yielded nothing usable, same as an empty `news` list.
fn map_listing_error(err: ApiError) -> ScrapeError {
    match err.kind {
        ApiErrorKind::InvalidBody => ScrapeError::EmptyResult,
        _ => map_error(err),
    }
}

/// Collapses transport failures into the tags the state machine matches on.
pub(crate) fn map_error(err: ApiError) -> ScrapeError {
    match err.kind {
        ApiErrorKind::Server { status, error } => ScrapeError::Server {
            status: Some(status),
            error,
        },
        ApiErrorKind::NoResponse | ApiErrorKind::Timeout => ScrapeError::NoResponse,
        ApiErrorKind::InvalidRequest | ApiErrorKind::InvalidBody | ApiErrorKind::Cancelled => {
            ScrapeError::Unknown(err.message)
        }
    }
}

fn map_item(item: NewsItemPayload) -> NewsItem {
    NewsItem {
        title: item.title,
        author: item.author,
        date: item.date,
        source: item.source,
        url: item.url,
        image_url: item.image_url,
    }
}

fn map_article(article: ArticlePayload) -> ArticleDetail {
    ArticleDetail {
        title: article.title,
        author: article.author,
        date: article.date,
        content: article.content,
        image_url: article.image_url,
        source: article.source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_engine::ListingPayload;
    use pretty_assertions::assert_eq;

    #[test]
    fn listing_event_becomes_listing_msg() {
        let event = EngineEvent::ListingCompleted {
            request_id: 3,
            result: Ok(ListingPayload {
                news: vec![NewsItemPayload {
                    title: "X".to_string(),
                    author: "A".to_string(),
                    date: "2024-01-01".to_string(),
                    source: "S".to_string(),
                    url: "https://example.com/x".to_string(),
                    image_url: None,
                }],
            }),
        };

        assert_eq!(
            map_event(event),
            Msg::ListingLoaded {
                token: 3,
                result: Ok(vec![NewsItem {
                    title: "X".to_string(),
                    author: "A".to_string(),
                    date: "2024-01-01".to_string(),
                    source: "S".to_string(),
                    url: "https://example.com/x".to_string(),
                    image_url: None,
                }]),
            }
        );
    }

    #[test]
    fn html_success_page_is_an_empty_listing() {
        let event = EngineEvent::ListingCompleted {
            request_id: 5,
            result: Err(ApiError::new(
                ApiErrorKind::InvalidBody,
                "expected value at line 1 column 1",
            )),
        };

        assert_eq!(
            map_event(event),
            Msg::ListingLoaded {
                token: 5,
                result: Err(ScrapeError::EmptyResult),
            }
        );
        assert_eq!(
            ScrapeError::EmptyResult.listing_message(),
            newsdesk_core::NO_ARTICLES_FOUND
        );
    }

    #[test]
    fn undecodable_article_body_uses_fallback() {
        let event = EngineEvent::ArticleCompleted {
            request_id: 6,
            result: Err(ApiError::new(
                ApiErrorKind::InvalidBody,
                "expected value at line 1 column 1",
            )),
        };

        let Msg::ArticleLoaded {
            result: Err(err), ..
        } = map_event(event)
        else {
            panic!("expected a failed article load");
        };
        assert_eq!(err.article_message(), newsdesk_core::ARTICLE_FALLBACK);
    }

    #[test]
    fn article_failure_keeps_token() {
        let event = EngineEvent::ArticleCompleted {
            request_id: 8,
            result: Err(ApiError::new(ApiErrorKind::Timeout, "operation timed out")),
        };

        assert_eq!(
            map_event(event),
            Msg::ArticleLoaded {
                token: 8,
                result: Err(ScrapeError::NoResponse),
            }
        );
    }

    #[test]
    fn errors_map_onto_taxonomy() {
        assert_eq!(
            map_error(ApiError::new(
                ApiErrorKind::Server {
                    status: 400,
                    error: Some("bad url".to_string()),
                },
                "400 Bad Request",
            )),
            ScrapeError::Server {
                status: Some(400),
                error: Some("bad url".to_string()),
            }
        );
        assert_eq!(
            map_error(ApiError::new(ApiErrorKind::NoResponse, "connection refused")),
            ScrapeError::NoResponse
        );
        assert_eq!(
            map_error(ApiError::new(
                ApiErrorKind::InvalidRequest,
                "relative URL without a base",
            )),
            ScrapeError::Unknown("relative URL without a base".to_string())
        );
    }
}
