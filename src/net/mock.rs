//! Scripted transport for driving `ApiClient` in tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use futures::channel::mpsc::UnboundedReceiver;

use super::http::{ApiClient, HttpRequest, HttpResponse, SessionEvent, Transport, TransportError};
use crate::config::{ApiConfig, CredentialsMode};
use crate::session::storage::MemoryStorage;

/// A request as the transport saw it.
#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub credentials: CredentialsMode,
    pub request: HttpRequest,
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Result<HttpResponse, TransportError>>,
    seen: Vec<RecordedRequest>,
}

/// Replays queued replies in order and records every request.
#[derive(Clone, Default)]
pub(crate) struct MockTransport {
    script: Arc<Mutex<Script>>,
}

impl MockTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(HttpResponse::new(status, body.as_bytes())))
    }

    pub fn reply_bytes(&self, status: u16, body: Vec<u8>) -> &Self {
        self.push(Ok(HttpResponse::new(status, body)))
    }

    pub fn fail(&self, err: TransportError) -> &Self {
        self.push(Err(err))
    }

    fn push(&self, reply: Result<HttpResponse, TransportError>) -> &Self {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).replies.push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner).seen.clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

impl Transport for MockTransport {
    async fn send(
        &self,
        url: String,
        credentials: CredentialsMode,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut script = self.script.lock().unwrap_or_else(PoisonError::into_inner);
        script.seen.push(RecordedRequest { url, credentials, request });
        script
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::NoResponse("no scripted reply".to_owned())))
    }
}

pub(crate) type TestClient = ApiClient<MemoryStorage, MockTransport>;

/// Client wired to fresh in-memory storage and a scripted transport.
pub(crate) fn test_client() -> (TestClient, UnboundedReceiver<SessionEvent>, MemoryStorage, MockTransport) {
    let storage = MemoryStorage::new();
    let transport = MockTransport::default();
    let (client, events) = ApiClient::new(
        ApiConfig::new("http://backend.test/api"),
        storage.clone(),
        transport.clone(),
    );
    (client, events, storage, transport)
}

/// Drop the client and collect every event it emitted.
pub(crate) fn drain_events(client: TestClient, events: UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    use futures::StreamExt as _;
    drop(client);
    futures::executor::block_on(events.collect())
}
