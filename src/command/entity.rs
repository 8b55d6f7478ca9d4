use crate::command::cache::ResponseCache;
use crate::command::context::ClientContext;
use crate::command::dispatch::{Dispatcher, RequestOptions};
use crate::command::envelope;
use crate::command::error::CommandError;
use crate::command::transport::{Request, Transport};
use crate::model::{Entity, ParseError};
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// CRUD commands for a single resource of kind `E::KIND`.
pub struct EntityCommand<E: Entity> {
    dispatcher: Dispatcher,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntityCommand<E> {
    pub fn new(transport: Arc<dyn Transport>, context: Arc<ClientContext>) -> Self {
        Self::from_dispatcher(Dispatcher::new(transport, context, None))
    }

    pub fn with_cache(
        transport: Arc<dyn Transport>,
        context: Arc<ClientContext>,
        cache: Arc<ResponseCache>,
    ) -> Self {
        Self::from_dispatcher(Dispatcher::new(transport, context, Some(cache)))
    }

    pub(crate) fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        EntityCommand {
            dispatcher,
            _entity: PhantomData,
        }
    }

    fn singular() -> &'static str {
        E::KIND.singular()
    }

    /// Fetch one entity by id.
    pub async fn get(&self, id: &str, options: &RequestOptions) -> Result<E, CommandError> {
        let command = format!("get_{}", Self::singular());
        let request =
            Request::read(&command).param(format!("{}_id", Self::singular()), id);
        let payload = self.dispatcher.dispatch(request, options).await?;
        let element = envelope::response_element(&payload, &command)?;
        let entity_element = crate::model::elements(element, Self::singular())
            .into_iter()
            .next()
            .ok_or_else(|| ParseError::MissingElement(Self::singular().to_string()))?;
        Ok(E::from_element(entity_element)?)
    }

    /// Create an entity from raw form parameters; resolves to the new id.
    pub async fn create(
        &self,
        params: &BTreeMap<String, String>,
        options: &RequestOptions,
    ) -> Result<String, CommandError> {
        let command = format!("create_{}", Self::singular());
        let mut request = Request::mutation(&command);
        for (key, value) in params {
            request.set_param(key, value);
        }
        let payload = self.dispatcher.dispatch(request, options).await?;
        let element = envelope::response_element(&payload, &command)?;
        envelope::created_id(element)
    }

    /// Save changes to an existing entity.
    pub async fn save(
        &self,
        id: &str,
        params: &BTreeMap<String, String>,
        options: &RequestOptions,
    ) -> Result<(), CommandError> {
        let command = format!("save_{}", Self::singular());
        let mut request =
            Request::mutation(&command).param(format!("{}_id", Self::singular()), id);
        for (key, value) in params {
            request.set_param(key, value);
        }
        let payload = self.dispatcher.dispatch(request, options).await?;
        envelope::response_element(&payload, &command)?;
        Ok(())
    }

    pub async fn delete(&self, id: &str, options: &RequestOptions) -> Result<(), CommandError> {
        let command = format!("delete_{}", Self::singular());
        let request =
            Request::mutation(&command).param(format!("{}_id", Self::singular()), id);
        let payload = self.dispatcher.dispatch(request, options).await?;
        envelope::response_element(&payload, &command)?;
        Ok(())
    }

    /// Duplicate an entity; resolves to the clone's id.
    pub async fn clone_entity(
        &self,
        id: &str,
        options: &RequestOptions,
    ) -> Result<String, CommandError> {
        let request = Request::mutation("clone")
            .param("id", id)
            .param("resource_type", Self::singular());
        let payload = self.dispatcher.dispatch(request, options).await?;
        let element = envelope::response_element(&payload, "clone")?;
        envelope::created_id(element)
    }
}
