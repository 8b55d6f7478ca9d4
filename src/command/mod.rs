//! Generic entity-command layer over an abstract transport.
//!
//! Translates typed requests (CRUD, paginated collection fetch, bulk
//! export/delete, aggregates) into backend commands, and response
//! envelopes back into typed models. The HTTP transport, session state
//! and an optional response cache are explicit collaborators; request
//! cancellation is cooperative via [`CancelToken`].

pub mod cache;
pub mod cancel;
pub mod console;
pub mod context;
mod dispatch;
pub mod entities;
pub mod entity;
mod envelope;
pub mod error;
pub mod transport;

pub use cache::ResponseCache;
pub use cancel::{CancelToken, Reloader};
pub use console::ConsoleClient;
pub use context::ClientContext;
pub use dispatch::RequestOptions;
pub use entities::{CollectionParams, EntitiesCommand, EntityCollection};
pub use entity::EntityCommand;
pub use error::CommandError;
pub use transport::{Request, RequestKind, Transport, TransportError};
