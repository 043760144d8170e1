use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use newsdesk_logging::{newsdesk_debug, newsdesk_info, newsdesk_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ReqwestScrapeApi, ScrapeApi};
use crate::{ApiError, ApiErrorKind, ApiSettings, EngineEvent, Operation, RequestId};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Submit {
        operation: Operation,
        request_id: RequestId,
        url: String,
    },
    Cancel {
        operation: Operation,
    },
}

/// Runs backend requests on a background tokio runtime.
///
/// At most one request per [`Operation`] is live: submitting a new one
/// cancels its predecessor. Every submitted request yields exactly one
/// [`EngineEvent`], including cancelled ones.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestScrapeApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn ScrapeApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::spawn(move || {
            let mut in_flight: HashMap<Operation, CancellationToken> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit {
                        operation,
                        request_id,
                        url,
                    } => {
                        let cancel = CancellationToken::new();
                        if let Some(previous) = in_flight.insert(operation, cancel.clone()) {
                            previous.cancel();
                        }
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_request(api.as_ref(), operation, request_id, url, cancel, event_tx)
                                .await;
                        });
                    }
                    EngineCommand::Cancel { operation } => {
                        if let Some(previous) = in_flight.remove(&operation) {
                            newsdesk_debug!("Cancelling in-flight {} request", operation);
                            previous.cancel();
                        }
                    }
                }
            }
            newsdesk_debug!("Engine command channel closed; shutting down runtime");
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn submit(&self, operation: Operation, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Submit {
            operation,
            request_id,
            url: url.into(),
        });
    }

    pub fn cancel(&self, operation: Operation) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { operation });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn run_request(
    api: &dyn ScrapeApi,
    operation: Operation,
    request_id: RequestId,
    url: String,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let guard = CompletionGuard::new(operation, request_id, event_tx);
    newsdesk_info!("Starting {} request id={} url={}", operation, request_id, url);

    let event = match operation {
        Operation::Listing => cancel
            .run_until_cancelled(api.scrape_listing(&url))
            .await
            .map(|result| EngineEvent::ListingCompleted { request_id, result }),
        Operation::Article => cancel
            .run_until_cancelled(api.scrape_article(&url))
            .await
            .map(|result| EngineEvent::ArticleCompleted { request_id, result }),
    };

    match event {
        Some(event) => guard.complete(event),
        None => newsdesk_info!("{} request id={} was superseded", operation, request_id),
    }
}

/// Reports a cancelled outcome if the request ends without a result, so the
/// caller never waits on a request that silently vanished.
struct CompletionGuard {
    operation: Operation,
    request_id: RequestId,
    event_tx: mpsc::Sender<EngineEvent>,
    completed: bool,
}

impl CompletionGuard {
    fn new(
        operation: Operation,
        request_id: RequestId,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Self {
        Self {
            operation,
            request_id,
            event_tx,
            completed: false,
        }
    }

    fn complete(mut self, event: EngineEvent) {
        self.completed = true;
        match &event {
            EngineEvent::ListingCompleted { result: Err(err), .. }
            | EngineEvent::ArticleCompleted { result: Err(err), .. } => {
                newsdesk_warn!(
                    "{} request id={} failed: {}",
                    self.operation,
                    self.request_id,
                    err
                );
            }
            _ => newsdesk_debug!("{} request id={} succeeded", self.operation, self.request_id),
        }
        let _ = self.event_tx.send(event);
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let error = ApiError::new(ApiErrorKind::Cancelled, "request aborted before completion");
        let _ = self
            .event_tx
            .send(EngineEvent::failed(self.operation, self.request_id, error));
    }
}
