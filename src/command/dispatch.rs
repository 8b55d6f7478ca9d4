use crate::command::cache::ResponseCache;
use crate::command::cancel::CancelToken;
use crate::command::context::ClientContext;
use crate::command::envelope;
use crate::command::error::CommandError;
use crate::command::transport::{Request, RequestKind, Transport};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Per-request options shared by all commands.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Cancel token to race the request against. A token cancelled while
    /// the response is in flight wins over the response.
    pub cancel: Option<CancelToken>,
}

impl RequestOptions {
    pub fn cancellable(token: CancelToken) -> Self {
        RequestOptions {
            cancel: Some(token),
        }
    }
}

/// Shared plumbing behind every command: session token attachment, cache
/// consultation, cancellation race and envelope status checking.
#[derive(Clone)]
pub(crate) struct Dispatcher {
    transport: Arc<dyn Transport>,
    context: Arc<ClientContext>,
    cache: Option<Arc<ResponseCache>>,
}

impl Dispatcher {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        context: Arc<ClientContext>,
        cache: Option<Arc<ResponseCache>>,
    ) -> Self {
        Dispatcher {
            transport,
            context,
            cache,
        }
    }

    pub(crate) async fn dispatch(
        &self,
        mut request: Request,
        options: &RequestOptions,
    ) -> Result<Value, CommandError> {
        if let Some(token) = self.context.session_token() {
            request.set_param("token", token);
        }

        let cache_key = request.cache_key();
        if request.kind == RequestKind::Read {
            if let Some(payload) = self.cache.as_ref().and_then(|c| c.get(&cache_key)) {
                debug!(command = %request.command, "serving response from cache");
                return Ok(payload);
            }
        }

        debug!(command = %request.command, "dispatching request");
        let payload = match &options.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(command = %request.command, "request cancelled");
                        return Err(CommandError::Cancelled);
                    }
                    sent = self.transport.send(&request) => sent?,
                }
            }
            None => self.transport.send(&request).await?,
        };

        // validate status before the payload can enter the cache
        envelope::response_element(&payload, &request.command)?;

        if let Some(cache) = &self.cache {
            match request.kind {
                RequestKind::Read => cache.put(cache_key, payload.clone()),
                RequestKind::Mutation => cache.invalidate_all(),
            }
        }

        Ok(payload)
    }
}
