//! Response envelope handling.
//!
//! Every command answers with a wrapper element named
//! `<command>_response` carrying a status/status_text pair and the
//! command-specific payload. The helpers here locate that element, turn
//! non-2xx statuses into [`CommandError::Backend`] and extract the pieces
//! the typed commands need.

use crate::command::error::CommandError;
use crate::counts::CollectionCounts;
use crate::filter::Filter;
use crate::model::{self, Entity, ParseError};
use serde_json::Value;

/// Fallback when an error envelope carries no recognizable message.
const UNKNOWN_ERROR: &str = "Unknown error";

/// Locate the `<command>_response` element and check its status.
pub(crate) fn response_element<'a>(
    payload: &'a Value,
    command: &str,
) -> Result<&'a Value, CommandError> {
    let key = format!("{command}_response");
    let element = payload
        .get(&key)
        .ok_or(ParseError::MissingElement(key))?;
    check_status(element)?;
    Ok(element)
}

fn check_status(element: &Value) -> Result<(), CommandError> {
    let status = model::text(element, "status").unwrap_or_default();
    if status.starts_with('2') {
        return Ok(());
    }
    let message = model::text(element, "status_text")
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
    Err(CommandError::Backend { status, message })
}

/// The `id` attribute of a create/clone response.
pub(crate) fn created_id(element: &Value) -> Result<String, CommandError> {
    model::text(element, "id")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ParseError::MissingField("id").into())
}

/// Parse a collection response into entities, echoed filter and counts.
pub(crate) fn parse_collection<E: Entity>(
    element: &Value,
) -> Result<(Vec<E>, Filter, CollectionCounts), CommandError> {
    let entities = model::elements(element, E::KIND.singular())
        .into_iter()
        .map(E::from_element)
        .collect::<Result<Vec<_>, _>>()?;

    let filter = element
        .get("filters")
        .map(Filter::from_element)
        .unwrap_or_default();

    let counts_key = format!("{}_count", E::KIND.singular());
    let all = model::parse_int(element, &counts_key).unwrap_or(0);
    let filtered = element
        .get(&counts_key)
        .and_then(|c| model::parse_int(c, "filtered"))
        .unwrap_or(all);
    let counts = CollectionCounts::new(
        filter.get_int("first").unwrap_or(1),
        filter.get_int("rows").unwrap_or(-1),
        entities.len() as i64,
        all,
        filtered,
    );

    Ok((entities, filter, counts))
}

/// Aggregate `group` children, normalized to a list (the backend emits a
/// bare object for a single group).
pub(crate) fn aggregate_groups(element: &Value) -> Vec<Value> {
    element
        .get("aggregate")
        .map(|aggregate| {
            model::elements(aggregate, "group")
                .into_iter()
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}
