/// Tag attached to every issued request; increases monotonically per operation kind.
pub type RequestToken = u64;

/// Observable outcome of one operation kind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading,
    Succeeded(T),
    Failed(String),
}

/// Request state plus the bookkeeping needed to reject stale responses.
///
/// Only the most recently issued token is accepted. Resetting or rejecting
/// the slot forgets the pending token, so a late response for an abandoned
/// request is discarded as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSlot<T> {
    state: RequestState<T>,
    pending: Option<RequestToken>,
    last_issued: RequestToken,
}

impl<T> Default for RequestSlot<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            pending: None,
            last_issued: 0,
        }
    }
}

impl<T> RequestSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }

    pub fn payload(&self) -> Option<&T> {
        match &self.state {
            RequestState::Succeeded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    /// Moves to `Loading`, dropping any previous payload or error, and
    /// returns the token the new request must carry.
    pub fn begin(&mut self) -> RequestToken {
        self.last_issued += 1;
        self.pending = Some(self.last_issued);
        self.state = RequestState::Loading;
        self.last_issued
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }

    /// Applies a successful response. Returns `false` for stale tokens.
    pub fn succeed(&mut self, token: RequestToken, payload: T) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.pending = None;
        self.state = RequestState::Succeeded(payload);
        true
    }

    /// Applies a failed response. Returns `false` for stale tokens.
    pub fn fail(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.pending = None;
        self.state = RequestState::Failed(message.into());
        true
    }

    /// Fails without issuing a request. Any in-flight request is abandoned;
    /// returns whether one was.
    pub fn reject(&mut self, message: impl Into<String>) -> bool {
        let abandoned = self.pending.take().is_some();
        self.state = RequestState::Failed(message.into());
        abandoned
    }

    /// Back to `Idle`. Any in-flight request is abandoned; returns whether one was.
    pub fn reset(&mut self) -> bool {
        let abandoned = self.pending.take().is_some();
        self.state = RequestState::Idle;
        abandoned
    }
}
