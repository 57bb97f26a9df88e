//! Optimistic remote-resource synchronization for social matching clients
//!
//! This crate holds the reusable core behind the client's interactive
//! widgets: fetched collections with derived aggregates, optimistic
//! join/leave and submit actions with rollback, and a polling timer for
//! time-relative values. Rendering is left to the caller.

pub mod action;
pub mod api;
pub mod config;
pub mod errors;
pub mod frp;
pub mod model;
pub mod polling;
pub mod state_machine;
pub mod store;
pub mod widgets;

// Re-export commonly used types
pub use action::{OptimisticActionRunner, Submitter, ToggleEndpoints, WidgetScope};
pub use api::{ApiClient, ApiEnvelope, ApiRequest, Page, RawResponse, Transport};
pub use config::ClientConfig;
pub use errors::{SyncError, SyncResult, ValidationError};
pub use polling::{PollingRefresher, TimeWindow, WindowStatus};
pub use state_machine::{ActionState, Membership};
pub use store::{CollectionQuery, RemoteCollectionStore};
