//! Entity cache.
//!
//! Every entity keeps its last-fetched collection in a [`Store`]. The cache
//! only changes after the server confirms an action; a failed action leaves it
//! as it was.

use std::{
    fmt::{Debug, Display},
    future::Future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use tracing::debug;

use crate::{
    domain::result::{ActionFailure, ActionResult},
    gateway::ApiError,
};

/// A record with a backend id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Backend id of the record.
    type Id: Copy + Eq + Debug + Display + Send + Sync;

    /// The record's id.
    fn id(&self) -> Self::Id;
}

/// Where a newly created record goes in the cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// At the end, keeping server order.
    Append,

    /// At the front, for newest-first collections.
    Prepend,
}

/// What a collection fetch did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fetched {
    /// The collection was replaced with this many records.
    Replaced(usize),

    /// A newer fetch was issued while this one was in flight; its response was dropped.
    Superseded,
}

#[derive(Debug)]
struct State<T> {
    items: Vec<T>,
    current: Option<T>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for State<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current: None,
            loading: false,
            error: None,
            generation: 0,
        }
    }
}

/// Cached collection of one entity, with its loading and error slots.
#[derive(Debug)]
pub struct Store<T: Entity> {
    name: &'static str,
    insertion: Insertion,
    state: Mutex<State<T>>,
}

impl<T: Entity> Store<T> {
    /// An empty store. `name` labels its log lines; `insertion` places created records.
    pub fn new(name: &'static str, insertion: Insertion) -> Self {
        Self {
            name,
            insertion,
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the whole collection with what `request` returns.
    ///
    /// On failure the previous collection is kept and the error recorded. A
    /// response that arrives after a newer fetch was issued is dropped.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of a current request that failed.
    pub async fn fetch_all<F>(&self, request: F) -> ActionResult<Fetched>
    where
        F: Future<Output = Result<Vec<T>, ApiError>>,
    {
        let generation = {
            let mut state = self.lock();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.generation
        };

        let result = request.await;

        let mut state = self.lock();

        if state.generation != generation {
            debug!(store = self.name, generation, "dropping superseded response");

            return Ok(Fetched::Superseded);
        }

        state.loading = false;

        match result {
            Ok(items) => {
                let count = items.len();
                state.items = items;

                debug!(store = self.name, count, "collection replaced");

                Ok(Fetched::Replaced(count))
            }
            Err(error) => {
                let failure = ActionFailure::from(error);
                state.error = Some(failure.message.clone());

                Err(failure)
            }
        }
    }

    /// Load one record as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of the request.
    pub async fn fetch_one<F>(&self, request: F) -> ActionResult<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.begin();

        let result = request.await.map_err(ActionFailure::from);

        let mut state = self.lock();
        state.loading = false;

        match &result {
            Ok(record) => state.current = Some(record.clone()),
            Err(failure) => state.error = Some(failure.message.clone()),
        }

        result
    }

    /// Run a create request and add its record to the collection.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of the request; the cache is untouched.
    pub async fn create<F>(&self, request: F) -> ActionResult<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.begin();

        let result = request.await.map_err(ActionFailure::from);

        let mut state = self.lock();
        state.loading = false;

        if let Ok(record) = &result {
            match self.insertion {
                Insertion::Append => state.items.push(record.clone()),
                Insertion::Prepend => state.items.insert(0, record.clone()),
            }

            debug!(store = self.name, id = %record.id(), "record added");
        }

        result
    }

    /// Run an update request and replace the cached record with the server's copy.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of the request; the cache is untouched.
    pub async fn update<F>(&self, id: T::Id, request: F) -> ActionResult<T>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        self.begin();

        let result = request.await.map_err(ActionFailure::from);

        let mut state = self.lock();
        state.loading = false;

        if let Ok(record) = &result {
            if let Some(cached) = state.items.iter_mut().find(|item| item.id() == id) {
                *cached = record.clone();
            }

            if state.current.as_ref().is_some_and(|current| current.id() == id) {
                state.current = Some(record.clone());
            }

            debug!(store = self.name, %id, "record replaced");
        }

        result
    }

    /// Run a delete request and drop the record from the collection.
    ///
    /// # Errors
    ///
    /// Returns the [`ActionFailure`] of the request; the cache is untouched.
    pub async fn delete<F>(&self, id: T::Id, request: F) -> ActionResult<()>
    where
        F: Future<Output = Result<(), ApiError>>,
    {
        self.begin();

        let result = request.await.map_err(ActionFailure::from);

        let mut state = self.lock();
        state.loading = false;

        if result.is_ok() {
            state.items.retain(|item| item.id() != id);

            if state.current.as_ref().is_some_and(|current| current.id() == id) {
                state.current = None;
            }

            debug!(store = self.name, %id, "record removed");
        }

        result
    }

    fn begin(&self) {
        let mut state = self.lock();
        state.loading = true;
        state.error = None;
    }

    /// A copy of the cached collection.
    pub fn items(&self) -> Vec<T> {
        self.lock().items.clone()
    }

    /// Borrow the cached collection for a derived value.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.lock().items)
    }

    /// Cached records matching `predicate`.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.with_items(|items| items.iter().filter(|item| predicate(item)).cloned().collect())
    }

    /// The cached record with `id`.
    pub fn find(&self, id: T::Id) -> Option<T> {
        self.with_items(|items| items.iter().find(|item| item.id() == id).cloned())
    }

    /// The detail record loaded last.
    pub fn current(&self) -> Option<T> {
        self.lock().current.clone()
    }

    /// Number of cached records.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Whether nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Whether an action is in flight.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Message of the last failed fetch, cleared when the next action starts.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Forget everything, e.g. on logout. Fetches still in flight are
    /// superseded and their responses dropped.
    pub fn reset(&self) {
        let mut state = self.lock();
        let generation = state.generation + 1;

        *state = State {
            generation,
            ..State::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::sync::oneshot;

    use super::*;
    use crate::gateway::TransportError;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u64,
        text: &'static str,
    }

    impl Entity for Note {
        type Id = u64;

        fn id(&self) -> u64 {
            self.id
        }
    }

    fn note(id: u64, text: &'static str) -> Note {
        Note { id, text }
    }

    async fn loaded(insertion: Insertion) -> Result<Store<Note>, ActionFailure> {
        let store = Store::new("notes", insertion);

        store
            .fetch_all(async { Ok(vec![note(1, "a"), note(2, "b")]) })
            .await?;

        Ok(store)
    }

    #[tokio::test]
    async fn fetch_replaces_collection_and_resets_loading() -> TestResult {
        let store = loaded(Insertion::Append).await?;

        let fetched = store.fetch_all(async { Ok(vec![note(3, "c")]) }).await?;

        assert_eq!(fetched, Fetched::Replaced(1));
        assert_eq!(store.items(), [note(3, "c")]);
        assert!(!store.is_loading());

        Ok(())
    }

    #[tokio::test]
    async fn failed_fetch_keeps_collection_and_sets_error() -> TestResult {
        let store = loaded(Insertion::Append).await?;

        let result = store
            .fetch_all(async { Err(ApiError::Transport(TransportError::Timeout)) })
            .await;

        assert!(result.is_err());
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.error(),
            Some(TransportError::Timeout.to_string())
        );
        assert!(!store.is_loading());

        Ok(())
    }

    #[tokio::test]
    async fn stale_response_does_not_clobber_newer_one() -> TestResult {
        let store = Store::<Note>::new("notes", Insertion::Append);
        let (slow_tx, slow_rx) = oneshot::channel::<Vec<Note>>();

        let slow = store.fetch_all(async {
            slow_rx
                .await
                .map_err(|error| ApiError::Decode(error.to_string()))
        });

        let (slow_result, fast_result) = tokio::join!(slow, async {
            let fast = store.fetch_all(async { Ok(vec![note(9, "fresh")]) }).await;
            let _sent = slow_tx.send(vec![note(1, "stale")]);
            fast
        });

        assert_eq!(fast_result?, Fetched::Replaced(1));
        assert_eq!(slow_result?, Fetched::Superseded);
        assert_eq!(store.items(), [note(9, "fresh")]);

        Ok(())
    }

    #[tokio::test]
    async fn fetch_in_flight_during_reset_is_dropped() -> TestResult {
        let store = Store::<Note>::new("notes", Insertion::Append);
        let (tx, rx) = oneshot::channel::<Vec<Note>>();

        let pending = store.fetch_all(async {
            rx.await
                .map_err(|error| ApiError::Decode(error.to_string()))
        });

        let (fetched, ()) = tokio::join!(pending, async {
            store.reset();
            let _sent = tx.send(vec![note(1, "previous session")]);
        });

        assert_eq!(fetched?, Fetched::Superseded);
        assert!(store.is_empty());
        assert!(!store.is_loading());

        Ok(())
    }

    #[tokio::test]
    async fn create_appends_or_prepends() -> TestResult {
        let appending = loaded(Insertion::Append).await?;
        appending.create(async { Ok(note(3, "c")) }).await?;

        let prepending = loaded(Insertion::Prepend).await?;
        prepending.create(async { Ok(note(3, "c")) }).await?;

        assert_eq!(appending.items().last(), Some(&note(3, "c")));
        assert_eq!(prepending.items().first(), Some(&note(3, "c")));

        Ok(())
    }

    #[tokio::test]
    async fn failed_create_leaves_cache_alone() -> TestResult {
        let store = loaded(Insertion::Append).await?;

        let result = store
            .create(async {
                Err(ApiError::Rejected {
                    status: 409,
                    message: "duplicate".to_string(),
                })
            })
            .await;

        assert_eq!(result.map_err(|f| f.message), Err("duplicate".to_string()));
        assert_eq!(store.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_record_with_server_copy() -> TestResult {
        let store = loaded(Insertion::Append).await?;
        store.fetch_one(async { Ok(note(2, "b")) }).await?;

        store.update(2, async { Ok(note(2, "server")) }).await?;

        assert_eq!(store.find(2), Some(note(2, "server")));
        assert_eq!(store.current(), Some(note(2, "server")));
        assert_eq!(store.find(1), Some(note(1, "a")));

        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_only_on_success() -> TestResult {
        let store = loaded(Insertion::Append).await?;

        let failed = store
            .delete(1, async { Err(ApiError::Transport(TransportError::Timeout)) })
            .await;

        assert!(failed.is_err());
        assert_eq!(store.len(), 2);

        store.delete(1, async { Ok(()) }).await?;

        assert_eq!(store.items(), [note(2, "b")]);

        Ok(())
    }
}
