use crate::command::cache::ResponseCache;
use crate::command::context::ClientContext;
use crate::command::dispatch::{Dispatcher, RequestOptions};
use crate::command::envelope;
use crate::command::error::CommandError;
use crate::command::transport::{Request, Transport};
use crate::counts::CollectionCounts;
use crate::filter::Filter;
use crate::model::Entity;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Parameters of a collection fetch.
#[derive(Debug, Clone, Default)]
pub struct CollectionParams {
    pub filter: Option<Filter>,
    /// Additional command parameters forwarded verbatim (detail flags etc.).
    pub extra: BTreeMap<String, String>,
}

impl CollectionParams {
    pub fn filtered(filter: impl Into<Filter>) -> Self {
        CollectionParams {
            filter: Some(filter.into()),
            extra: BTreeMap::new(),
        }
    }
}

/// One loaded page of a collection: the entities, the filter the backend
/// actually applied and the paging counts.
#[derive(Debug)]
pub struct EntityCollection<E> {
    pub entities: Vec<E>,
    pub filter: Filter,
    pub counts: CollectionCounts,
}

/// Collection commands (paginated fetch, bulk export/delete, aggregates)
/// for resources of kind `E::KIND`.
pub struct EntitiesCommand<E: Entity> {
    dispatcher: Dispatcher,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> EntitiesCommand<E> {
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
        EntitiesCommand {
            dispatcher,
            _entity: PhantomData,
        }
    }

    fn singular() -> &'static str {
        E::KIND.singular()
    }

    fn apply_params(request: &mut Request, params: &CollectionParams) {
        if let Some(filter) = &params.filter {
            request.set_param("filter", filter.to_filter_string());
            if let Some(id) = filter.id() {
                request.set_param("filt_id", id);
            }
        }
        for (key, value) in &params.extra {
            request.set_param(key, value);
        }
    }

    /// Fetch one page of the collection.
    pub async fn get(
        &self,
        params: &CollectionParams,
        options: &RequestOptions,
    ) -> Result<EntityCollection<E>, CommandError> {
        let command = format!("get_{}", E::KIND.plural());
        let mut request = Request::read(&command);
        Self::apply_params(&mut request, params);

        let payload = self.dispatcher.dispatch(request, options).await?;
        let element = envelope::response_element(&payload, &command)?;
        let (entities, filter, counts) = envelope::parse_collection::<E>(element)?;
        debug!(
            kind = E::KIND.singular(),
            length = counts.length,
            filtered = counts.filtered,
            "loaded collection page"
        );
        Ok(EntityCollection {
            entities,
            filter,
            counts,
        })
    }

    /// Fetch every filtered entity by forcing the unbounded `first=1
    /// rows=-1` view, regardless of the paging the caller's filter carried.
    pub async fn get_all(
        &self,
        params: &CollectionParams,
        options: &RequestOptions,
    ) -> Result<EntityCollection<E>, CommandError> {
        let mut params = params.clone();
        let filter = params.filter.take().unwrap_or_default();
        params.filter = Some(filter.all());
        self.get(&params, options).await
    }

    /// Export explicitly selected entities; resolves to the raw exported
    /// payload.
    pub async fn export_by_ids(
        &self,
        ids: &[&str],
        options: &RequestOptions,
    ) -> Result<Value, CommandError> {
        let mut request = Request::read("bulk_export")
            .param("resource_type", Self::singular())
            .param("bulk_select", "1");
        for id in ids {
            request.set_param(format!("bulk_selected:{id}"), "1");
        }
        let payload = self.dispatcher.dispatch(request, options).await?;
        envelope::response_element(&payload, "bulk_export")?;
        Ok(payload)
    }

    /// Export everything matching `filter`; resolves to the raw exported
    /// payload.
    pub async fn export_by_filter(
        &self,
        filter: &Filter,
        options: &RequestOptions,
    ) -> Result<Value, CommandError> {
        let request = Request::read("bulk_export")
            .param("resource_type", Self::singular())
            .param("bulk_select", "0")
            .param("filter", filter.to_filter_string());
        let payload = self.dispatcher.dispatch(request, options).await?;
        envelope::response_element(&payload, "bulk_export")?;
        Ok(payload)
    }

    /// Delete the listed entities one by one.
    pub async fn delete_by_ids(
        &self,
        ids: &[&str],
        options: &RequestOptions,
    ) -> Result<(), CommandError> {
        let command = format!("delete_{}", Self::singular());
        for id in ids {
            let request = Request::mutation(&command)
                .param(format!("{}_id", Self::singular()), *id);
            let payload = self.dispatcher.dispatch(request, options).await?;
            envelope::response_element(&payload, &command)?;
        }
        Ok(())
    }

    /// Delete everything matching `filter`; resolves to the deleted ids.
    ///
    /// The backend has no filter-scoped delete, so the matching entities
    /// are fetched first and deleted individually. Deletions past the
    /// first are not atomic with the fetch.
    pub async fn delete_by_filter(
        &self,
        filter: &Filter,
        options: &RequestOptions,
    ) -> Result<Vec<String>, CommandError> {
        let collection = self
            .get(&CollectionParams::filtered(filter.clone()), options)
            .await?;
        let ids: Vec<String> = collection
            .entities
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        self.delete_by_ids(&id_refs, options).await?;
        Ok(ids)
    }

    /// Run an aggregate query over the filtered collection, grouped by
    /// `group_column`. Resolves to the group elements, normalized to a
    /// list even when the backend answers with a single group.
    pub async fn get_aggregates(
        &self,
        filter: Option<&Filter>,
        group_column: &str,
        data_columns: &[&str],
        options: &RequestOptions,
    ) -> Result<Vec<Value>, CommandError> {
        let mut request = Request::read("get_aggregate")
            .param("aggregate_type", Self::singular())
            .param("group_column", group_column);
        if let Some(filter) = filter {
            request.set_param("filter", filter.to_filter_string());
        }
        for (idx, column) in data_columns.iter().enumerate() {
            request.set_param(format!("data_column:{idx}"), *column);
        }
        let payload = self.dispatcher.dispatch(request, options).await?;
        let element = envelope::response_element(&payload, "get_aggregate")?;
        Ok(envelope::aggregate_groups(element))
    }
}
