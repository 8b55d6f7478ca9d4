//! Client-side query core of a vulnerability-management console.
//!
//! Three layers:
//!
//! - [`filter`]: the filter model — filter-bar strings parsed into ordered
//!   keyword/relation/value terms with typed coercion, paging and sort
//!   semantics, and round-trip serialization.
//! - [`model`]: typed entities parsed from the backend's XML-derived JSON
//!   elements via pure per-type parse functions.
//! - [`command`]: generic CRUD and collection commands consuming a
//!   [`filter::Filter`] to build requests and parse response envelopes into
//!   `{entities, filter, counts}`, with cooperative cancellation and an
//!   optional response cache.
//!
//! Rendering, routing and the actual HTTP transport live outside this
//! crate; the [`command::Transport`] trait is the seam.

pub mod command;
pub mod counts;
pub mod filter;
pub mod model;

pub use command::{
    CancelToken, ClientContext, CollectionParams, CommandError, ConsoleClient, EntitiesCommand,
    EntityCollection, EntityCommand, Reloader, Request, RequestKind, RequestOptions,
    ResponseCache, Transport, TransportError,
};
pub use counts::CollectionCounts;
pub use filter::{Filter, FilterTerm, Relation, TermValue};
pub use model::{Entity, ParseError, ResourceKind};
