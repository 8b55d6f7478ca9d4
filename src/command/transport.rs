use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;
use thiserror::Error;

/// Whether a request reads state or mutates it. Drives the cache policy:
/// only reads are cached, any mutation marks the whole cache dirty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Read,
    Mutation,
}

/// A single backend command with its parameters.
///
/// Parameters are kept ordered so [`Request::cache_key`] is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub command: String,
    pub kind: RequestKind,
    pub params: BTreeMap<String, String>,
}

impl Request {
    pub fn read(command: impl Into<String>) -> Self {
        Request {
            command: command.into(),
            kind: RequestKind::Read,
            params: BTreeMap::new(),
        }
    }

    pub fn mutation(command: impl Into<String>) -> Self {
        Request {
            command: command.into(),
            kind: RequestKind::Mutation,
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Canonical identity of this request for response caching.
    pub fn cache_key(&self) -> String {
        let mut key = self.command.clone();
        for (name, value) in &self.params {
            // params never contain '&' or '='-significant data on this side
            let _ = write!(key, "&{}={}", name, value);
        }
        key
    }
}

/// Errors from the transport collaborator itself, before any envelope is
/// available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed response payload: {0}")]
    Malformed(String),
}

/// The HTTP (or otherwise) transport the command layer delegates to.
///
/// Implementations live outside this crate; tests use a scripted stand-in.
/// A successful send yields the XML-derived JSON payload of the response.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &Request) -> Result<Value, TransportError>;
}
