//! Topic store: the shared, observable topic state and the operations that
//! keep it in step with the backend.
//!
//! The collection is only ever replaced by a full listing. Mutations go to
//! the backend and are followed by a refetch; nothing is patched locally.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::{debug, error, warn};

use crate::api::TopicApi;
use crate::error::ApiError;
use crate::models::{Envelope, Topic, TopicId};

/// Point-in-time view of the store, handed to listeners.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopicState {
    pub topics: Vec<Topic>,
    pub current_topic: Option<Topic>,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Listener = Rc<dyn Fn(&TopicState)>;

struct Inner {
    state: TopicState,
    // Listings currently awaiting a response; drives `loading`.
    in_flight: usize,
    // Ticket of the most recently issued listing.
    issued: u64,
    // Ticket of the listing whose result is currently in `state.topics`.
    applied: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
}

/// Handle to the topic store. Clones share the same state.
#[derive(Clone)]
pub struct TopicStore {
    api: TopicApi,
    inner: Rc<RefCell<Inner>>,
}

impl TopicStore {
    pub fn new(api: TopicApi) -> Self {
        Self {
            api,
            inner: Rc::new(RefCell::new(Inner {
                state: TopicState::default(),
                in_flight: 0,
                issued: 0,
                applied: 0,
                listeners: Vec::new(),
                next_listener: 0,
            })),
        }
    }

    // ---------------- Reads ----------------

    pub fn snapshot(&self) -> TopicState {
        self.inner.borrow().state.clone()
    }

    pub fn topics(&self) -> Vec<Topic> {
        self.inner.borrow().state.topics.clone()
    }

    pub fn current_topic(&self) -> Option<Topic> {
        self.inner.borrow().state.current_topic.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.borrow().state.loading
    }

    /// Look a topic up in the last fetched collection.
    pub fn topic(&self, id: TopicId) -> Option<Topic> {
        self.inner
            .borrow()
            .state
            .topics
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    // ---------------- Reactivity ----------------

    /// Register a listener that receives a snapshot after every state change.
    pub fn subscribe(&self, listener: impl Fn(&TopicState) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener += 1;
        let id = SubscriptionId(inner.next_listener);
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    // Listeners run after the borrow is released so they may read the store.
    fn notify(&self) {
        let (snapshot, listeners) = {
            let inner = self.inner.borrow();
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&snapshot);
        }
    }

    // ---------------- Operations ----------------

    /// Replace the collection with the backend's current listing.
    ///
    /// Never fails: errors and `success: false` are logged and the previous
    /// collection is kept. `loading` is cleared on every path once no other
    /// listing is outstanding.
    ///
    /// Overlapping calls are not last-write-wins: the most recently *issued*
    /// listing wins and an older one that resolves later is dropped. While
    /// another listing is still pending, `loading` stays true after this call
    /// returns.
    pub async fn fetch_all(&self) {
        let ticket = self.begin_fetch();

        let listing = match self.api.list().await {
            Ok(envelope) if envelope.success => Some(envelope.data.unwrap_or_default()),
            Ok(envelope) => {
                error!(message = %envelope.failure_message(), "Failed to fetch topics");
                None
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch topics");
                None
            }
        };

        self.finish_fetch(ticket, listing);
    }

    /// Select a topic for detail viewing. Purely local; the topic is not
    /// checked against the collection.
    pub fn select(&self, topic: Option<Topic>) {
        self.inner.borrow_mut().state.current_topic = topic;
        self.notify();
    }

    /// Create a topic, then refetch the whole collection.
    ///
    /// Failures are logged and returned; `success: false` becomes
    /// `ApiError::Rejected`.
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> Result<Topic, ApiError> {
        let envelope = logged("create", self.api.create(data).await)?;
        self.refetch_after("create", envelope).await
    }

    /// Update a topic, then refetch the whole collection.
    pub async fn update<B: Serialize + ?Sized>(&self, id: TopicId, data: &B) -> Result<Topic, ApiError> {
        let envelope = logged("update", self.api.update(id, data).await)?;
        self.refetch_after("update", envelope).await
    }

    /// Delete a topic and refetch on success.
    ///
    /// Unlike `create`/`update`, failures are only logged: callers always see
    /// this resolve.
    pub async fn remove(&self, id: TopicId) {
        match self.api.delete(id).await {
            Ok(envelope) if envelope.success => self.fetch_all().await,
            Ok(envelope) => {
                error!(topic_id = %id, message = %envelope.failure_message(), "Failed to delete topic");
            }
            Err(e) => {
                error!(topic_id = %id, error = %e, "Failed to delete topic");
            }
        }
    }

    // ---------------- Internals ----------------

    async fn refetch_after(&self, op: &'static str, envelope: Envelope<Topic>) -> Result<Topic, ApiError> {
        if !envelope.success {
            let err = ApiError::Rejected { message: envelope.failure_message() };
            error!(op, error = %err, "Topic mutation rejected");
            return Err(err);
        }

        self.fetch_all().await;

        envelope.data.ok_or_else(|| {
            let err = ApiError::Decode(format!("{} response carried no topic", op));
            error!(op, error = %err, "Topic mutation returned no entity");
            err
        })
    }

    fn begin_fetch(&self) -> u64 {
        let ticket = {
            let mut inner = self.inner.borrow_mut();
            inner.issued += 1;
            inner.in_flight += 1;
            inner.state.loading = true;
            inner.issued
        };
        self.notify();
        ticket
    }

    fn finish_fetch(&self, ticket: u64, listing: Option<Vec<Topic>>) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.state.loading = inner.in_flight > 0;

            if let Some(topics) = listing {
                if ticket > inner.applied {
                    debug!(ticket, count = topics.len(), "Applying topic listing");
                    inner.applied = ticket;
                    inner.state.topics = topics;
                } else {
                    warn!(ticket, applied = inner.applied, "Discarding stale topic listing");
                }
            }
        }
        self.notify();
    }
}

fn logged<T>(op: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        error!(op, error = %e, "Topic mutation failed");
    }
    result
}
