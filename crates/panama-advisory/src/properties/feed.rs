use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

use super::{PropertiesError, Property, PropertyDirectory, PropertyFilters};

/// Result of a `load_more` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMoreOutcome {
    /// Next page fetched; n listings appended.
    Appended(usize),
    /// Nothing to do: no cursor, or a request was already in flight.
    Skipped,
    /// The fetch failed; existing listings and the cursor are untouched and
    /// the error string is exposed on the snapshot.
    Failed,
}

/// Cursor-paginated view over a [`PropertyDirectory`].
///
/// Filter changes and fetches are two explicit operations: `update_filter`
/// only mutates state, and consumers call `refetch` when they want the new
/// filters applied. In-flight protection is a generation token rather than a
/// bare boolean, so a `refetch` supersedes a slow `load_more` and the stale
/// completion is discarded instead of clobbering fresher results.
pub struct PropertyFeed<D> {
    directory: Arc<D>,
    state: Mutex<FeedState>,
}

#[derive(Default)]
struct FeedState {
    filters: PropertyFilters,
    items: Vec<Property>,
    count: u64,
    next: Option<String>,
    previous: Option<String>,
    error: Option<String>,
    generation: u64,
    in_flight: bool,
}

/// Point-in-time view of the feed for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedSnapshot {
    pub items: Vec<Property>,
    pub count: u64,
    pub has_more: bool,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<D: PropertyDirectory> PropertyFeed<D> {
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            state: Mutex::new(FeedState::default()),
        }
    }

    pub fn with_filters(directory: Arc<D>, filters: PropertyFilters) -> Self {
        let feed = Self::new(directory);
        feed.state.lock().expect("feed state poisoned").filters = filters;
        feed
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().expect("feed state poisoned");
        FeedSnapshot {
            items: state.items.clone(),
            count: state.count,
            has_more: state.next.is_some(),
            loading: state.in_flight,
            error: state.error.clone(),
        }
    }

    pub fn filters(&self) -> PropertyFilters {
        self.state
            .lock()
            .expect("feed state poisoned")
            .filters
            .clone()
    }

    /// Mutate one filter. Never fetches; pair with [`PropertyFeed::refetch`].
    pub fn update_filter(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut state = self.state.lock().expect("feed state poisoned");
        state.filters.set(key, value);
    }

    pub fn clear_filters(&self) {
        let mut state = self.state.lock().expect("feed state poisoned");
        state.filters.clear();
    }

    /// Fetch the first page for the current filters, replacing the list on
    /// success. Supersedes any request still in flight.
    pub fn refetch(&self) -> FeedSnapshot {
        let (filters, token) = {
            let mut state = self.state.lock().expect("feed state poisoned");
            state.generation += 1;
            state.in_flight = true;
            (state.filters.clone(), state.generation)
        };

        let result = self.directory.list(&filters);
        self.apply_refetch(token, result);
        self.snapshot()
    }

    /// Fetch the next page and append it. No-op unless a `next` cursor is
    /// present and nothing is in flight.
    pub fn load_more(&self) -> LoadMoreOutcome {
        let (cursor, token) = {
            let mut state = self.state.lock().expect("feed state poisoned");
            if state.in_flight {
                return LoadMoreOutcome::Skipped;
            }
            let Some(cursor) = state.next.clone() else {
                return LoadMoreOutcome::Skipped;
            };
            state.generation += 1;
            state.in_flight = true;
            (cursor, state.generation)
        };

        let result = self.directory.page_at(&cursor);

        let mut state = self.state.lock().expect("feed state poisoned");
        if state.generation != token {
            debug!("discarding superseded load_more completion");
            return LoadMoreOutcome::Skipped;
        }
        state.in_flight = false;

        match result {
            Ok(page) => {
                let appended = page.results.len();
                state.error = None;
                state.count = page.count;
                state.next = page.next;
                state.previous = page.previous;
                state.items.extend(page.results);
                LoadMoreOutcome::Appended(appended)
            }
            Err(error) => {
                state.error = Some(error.to_string());
                LoadMoreOutcome::Failed
            }
        }
    }

    fn apply_refetch(&self, token: u64, result: Result<super::PropertyPage, PropertiesError>) {
        let mut state = self.state.lock().expect("feed state poisoned");
        if state.generation != token {
            debug!("discarding superseded refetch completion");
            return;
        }
        state.in_flight = false;

        match result {
            Ok(page) => {
                state.error = None;
                state.count = page.count;
                state.next = page.next;
                state.previous = page.previous;
                state.items = page.results;
            }
            Err(error) => {
                state.error = Some(error.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::SampleDirectory;

    fn feed() -> PropertyFeed<SampleDirectory> {
        let directory = SampleDirectory::new().expect("sample directory");
        PropertyFeed::new(Arc::new(directory))
    }

    #[test]
    fn load_more_without_a_cursor_is_a_no_op() {
        let feed = feed();
        assert_eq!(feed.load_more(), LoadMoreOutcome::Skipped);
        assert!(feed.snapshot().items.is_empty());
    }

    #[test]
    fn refetch_then_load_more_appends_pages() {
        let feed = feed();
        let first = feed.refetch();
        assert_eq!(first.items.len(), 4);
        assert_eq!(first.count, 9);
        assert!(first.has_more);

        assert_eq!(feed.load_more(), LoadMoreOutcome::Appended(4));
        assert_eq!(feed.load_more(), LoadMoreOutcome::Appended(1));
        let done = feed.snapshot();
        assert_eq!(done.items.len(), 9);
        assert!(!done.has_more);

        assert_eq!(feed.load_more(), LoadMoreOutcome::Skipped);
    }

    #[test]
    fn update_filter_alone_never_fetches() {
        let feed = feed();
        feed.update_filter("property_type", "house");
        let snapshot = feed.snapshot();
        assert!(snapshot.items.is_empty());
        assert_eq!(snapshot.count, 0);

        let refreshed = feed.refetch();
        assert!(refreshed
            .items
            .iter()
            .all(|property| property.property_type == "house"));
    }

    #[test]
    fn refetch_replaces_rather_than_appends() {
        let feed = feed();
        feed.refetch();
        feed.load_more();
        assert_eq!(feed.snapshot().items.len(), 8);

        feed.update_filter("location", "Boquete");
        let narrowed = feed.refetch();
        assert_eq!(narrowed.items.len(), 1);
        assert_eq!(narrowed.items[0].location, "Boquete");
    }
}
