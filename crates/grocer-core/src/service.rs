//! Command surface over the shopping list
//!
//! Validates structured requests against fixed shapes, dispatches them to
//! the store, and broadcasts a change notification after every successful
//! mutation. Requests and responses are serde-tagged JSON so any
//! transport can drive the service.
//!
//! The store sits behind an async mutex: one writer at a time, so the
//! read-modify-write-persist sequence of each mutation never interleaves
//! with another request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::Item;
use crate::store::ListStore;

/// Capacity of the change notification channel
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Requests accepted by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Request {
    /// Fetch the ordered item list
    List,
    /// Add an item (or merge/reactivate an existing one)
    Add {
        name: String,
        #[serde(default)]
        quantity: Option<i64>,
        #[serde(default)]
        notes: Option<String>,
    },
    /// Check an item off
    Complete { id: Uuid },
    /// Move a completed item back to the active list
    Uncomplete { id: Uuid },
    /// Remove an item entirely
    Remove { id: Uuid },
    /// Update an item's fields; absent fields are untouched
    Update {
        id: Uuid,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        quantity: Option<i64>,
        #[serde(default)]
        notes: Option<String>,
    },
    /// Remove every completed item
    ClearCompleted,
}

/// Responses returned by the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Response {
    /// The ordered item list
    Items { items: Vec<Item> },
    /// A single affected item
    Item { item: Item },
    /// The operation succeeded with nothing to return
    Done,
    /// The operation failed
    Error { kind: ErrorKind, message: String },
}

/// Transport-level error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller supplied an invalid value (empty name)
    InvalidArgument,
    /// Caller referenced an id that is not on the list
    NotFound,
    /// The mutation could not be durably saved
    Io,
}

impl From<&StoreError> for ErrorKind {
    fn from(err: &StoreError) -> Self {
        match err {
            StoreError::EmptyName => ErrorKind::InvalidArgument,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Storage(_) => ErrorKind::Io,
        }
    }
}

impl From<StoreError> for Response {
    fn from(err: StoreError) -> Self {
        Response::Error {
            kind: ErrorKind::from(&err),
            message: err.to_string(),
        }
    }
}

/// Change notifications pushed to subscribers
///
/// Carries no payload: subscribers re-fetch via `Request::List`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ListEvent {
    /// The list changed in some way
    ListUpdated,
}

/// Request dispatcher and change notifier for a shared `ListStore`
#[derive(Clone)]
pub struct ListService {
    store: Arc<Mutex<ListStore>>,
    events: broadcast::Sender<ListEvent>,
}

impl ListService {
    /// Wrap a store for shared access
    pub fn new(store: ListStore) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store: Arc::new(Mutex::new(store)),
            events,
        }
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    /// Dispatch one request against the store
    ///
    /// Holds the store lock for the whole operation, including the
    /// persistence write. Every successful mutation is followed by a
    /// single `ListUpdated` broadcast.
    pub async fn dispatch(&self, request: Request) -> Response {
        let mut store = self.store.lock().await;

        let (response, mutated) = match request {
            Request::List => (
                Response::Items {
                    items: store.items(),
                },
                false,
            ),
            Request::Add {
                name,
                quantity,
                notes,
            } => item_mutation(store.add_item(
                &name,
                quantity.unwrap_or(1),
                notes.as_deref().unwrap_or(""),
            )),
            Request::Complete { id } => item_mutation(store.complete_item(id)),
            Request::Uncomplete { id } => item_mutation(store.uncomplete_item(id)),
            Request::Remove { id } => match store.remove_item(id) {
                Ok(()) => (Response::Done, true),
                Err(err) => (err.into(), false),
            },
            Request::Update {
                id,
                name,
                quantity,
                notes,
            } => item_mutation(store.update_item(
                id,
                name.as_deref(),
                quantity,
                notes.as_deref(),
            )),
            Request::ClearCompleted => match store.clear_completed() {
                Ok(_) => (Response::Done, true),
                Err(err) => (err.into(), false),
            },
        };
        drop(store);

        if mutated {
            // No subscribers is fine
            let _ = self.events.send(ListEvent::ListUpdated);
        }

        response
    }
}

fn item_mutation(result: Result<Item, StoreError>) -> (Response, bool) {
    match result {
        Ok(item) => (Response::Item { item }, true),
        Err(err) => (err.into(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use tempfile::TempDir;

    fn test_service(temp_dir: &TempDir) -> ListService {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
        };
        ListService::new(ListStore::open_with_config(config).unwrap())
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let temp_dir = TempDir::new().unwrap();
        let service = test_service(&temp_dir);

        let response = service
            .dispatch(Request::Add {
                name: "Milk".to_string(),
                quantity: Some(2),
                notes: None,
            })
            .await;
        let Response::Item { item } = response else {
            panic!("expected item response");
        };
        assert_eq!(item.quantity, 2);

        let response = service.dispatch(Request::List).await;
        let Response::Items { items } = response else {
            panic!("expected items response");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, item.id);
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let temp_dir = TempDir::new().unwrap();
        let service = test_service(&temp_dir);

        let response = service
            .dispatch(Request::Add {
                name: "Milk".to_string(),
                quantity: None,
                notes: None,
            })
            .await;
        let Response::Item { item } = response else {
            panic!("expected item response");
        };
        assert_eq!(item.quantity, 1);
        assert!(item.notes.is_empty());
    }

    #[tokio::test]
    async fn test_error_translation() {
        let temp_dir = TempDir::new().unwrap();
        let service = test_service(&temp_dir);

        let response = service
            .dispatch(Request::Add {
                name: "   ".to_string(),
                quantity: None,
                notes: None,
            })
            .await;
        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::InvalidArgument,
                ..
            }
        ));

        let response = service
            .dispatch(Request::Complete { id: Uuid::new_v4() })
            .await;
        assert!(matches!(
            response,
            Response::Error {
                kind: ErrorKind::NotFound,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_mutations_broadcast_one_event() {
        let temp_dir = TempDir::new().unwrap();
        let service = test_service(&temp_dir);
        let mut events = service.subscribe();

        service
            .dispatch(Request::Add {
                name: "Milk".to_string(),
                quantity: None,
                notes: None,
            })
            .await;

        assert_eq!(events.try_recv().unwrap(), ListEvent::ListUpdated);
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_reads_and_failures_do_not_broadcast() {
        let temp_dir = TempDir::new().unwrap();
        let service = test_service(&temp_dir);
        let mut events = service.subscribe();

        service.dispatch(Request::List).await;
        service
            .dispatch(Request::Remove { id: Uuid::new_v4() })
            .await;

        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_clear_completed_always_succeeds_and_notifies() {
        let temp_dir = TempDir::new().unwrap();
        let service = test_service(&temp_dir);
        let mut events = service.subscribe();

        let response = service.dispatch(Request::ClearCompleted).await;
        assert!(matches!(response, Response::Done));
        assert_eq!(events.try_recv().unwrap(), ListEvent::ListUpdated);
    }

    #[test]
    fn test_request_wire_format() {
        let request: Request = serde_json::from_str(r#"{"op":"add","name":"Milk"}"#).unwrap();
        assert!(matches!(
            request,
            Request::Add {
                quantity: None,
                notes: None,
                ..
            }
        ));

        let request: Request = serde_json::from_str(r#"{"op":"clearCompleted"}"#).unwrap();
        assert!(matches!(request, Request::ClearCompleted));
    }

    #[test]
    fn test_response_wire_format() {
        let json = serde_json::to_string(&Response::Done).unwrap();
        assert_eq!(json, r#"{"type":"done"}"#);

        let json = serde_json::to_string(&Response::Error {
            kind: ErrorKind::NotFound,
            message: "no item".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""kind":"not_found""#));

        let json = serde_json::to_string(&ListEvent::ListUpdated).unwrap();
        assert_eq!(json, r#"{"event":"listUpdated"}"#);
    }
}
