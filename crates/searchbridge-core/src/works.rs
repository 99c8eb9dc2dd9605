//! Concrete administrative operations, one constructor per work type.
//!
//! Each operation declares its own ignore table explicitly; there is no
//! universal rule for which non-2xx statuses are benign.

use serde_json::Value;

use crate::assessor::SuccessAssessor;
use crate::error::{BridgeError, Result};
use crate::request::ApiRequest;
use crate::schema::{IndexMetadata, IndexSettings};
use crate::transport::RawResponse;
use crate::work::Work;

/// Index creation treats "already exists" as a benign outcome so a
/// reconciliation loop over many indices keeps going. The service reports it
/// as 400, a status it also uses for mapping and parameter errors, so the
/// fallback additionally checks the error type in the body.
const CREATE_INDEX_IGNORED: &[u16] = &[400];
const INDEX_EXISTS_IGNORED: &[u16] = &[404];
const DELETE_INDEX_IGNORED: &[u16] = &[404];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateIndexOutcome {
    Created,
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteIndexOutcome {
    Deleted,
    Missing,
}

/// GET `{index}/_settings`, parsed into the typed settings subset.
pub fn get_index_settings(index_name: &str) -> Result<Work<IndexSettings>> {
    let request = ApiRequest::get()
        .path_component(index_name)
        .path_component("_settings")
        .build()?;
    let index = index_name.to_string();
    Ok(Work::new(request, move |body| {
        extract_settings(&index, body)
    }))
}

/// HEAD `{index}`; 404 is the normal "not there" answer, not a failure.
pub fn index_exists(index_name: &str) -> Result<Work<bool>> {
    let request = ApiRequest::head().path_component(index_name).build()?;
    Ok(Work::absorbing(
        request,
        SuccessAssessor::with_ignored(INDEX_EXISTS_IGNORED),
        |_| Ok(false),
        |_| Ok(true),
    ))
}

/// PUT `{index}` with the translated settings and mapping documents.
pub fn create_index(metadata: &IndexMetadata) -> Result<Work<CreateIndexOutcome>> {
    let request = ApiRequest::put()
        .path_component(&metadata.name)
        .body(metadata.create_body())
        .build()?;
    Ok(Work::absorbing(
        request,
        SuccessAssessor::with_ignored(CREATE_INDEX_IGNORED),
        |response| {
            if is_already_exists(response) {
                Ok(CreateIndexOutcome::AlreadyExists)
            } else {
                Err(BridgeError::Rejected {
                    status: response.status,
                    body: response.body.clone(),
                })
            }
        },
        |_| Ok(CreateIndexOutcome::Created),
    ))
}

/// DELETE `{index}`; deleting an absent index is benign.
pub fn delete_index(index_name: &str) -> Result<Work<DeleteIndexOutcome>> {
    let request = ApiRequest::delete().path_component(index_name).build()?;
    Ok(Work::absorbing(
        request,
        SuccessAssessor::with_ignored(DELETE_INDEX_IGNORED),
        |_| Ok(DeleteIndexOutcome::Missing),
        |_| Ok(DeleteIndexOutcome::Deleted),
    ))
}

/// Only a 400 whose `error.type` names the duplicate-index condition is
/// benign; any other 400 (malformed mapping, bad parameter) must keep its
/// diagnostics and reject.
fn is_already_exists(response: &RawResponse) -> bool {
    serde_json::from_str::<Value>(&response.body)
        .map(|body| {
            body.pointer("/error/type").and_then(Value::as_str)
                == Some("resource_already_exists_exception")
        })
        .unwrap_or(false)
}

/// Walks `body[index].settings.index`. The assessor-approved contract of the
/// settings API guarantees the first two levels; their absence is a defect,
/// not an operational error. A missing `index` object just means the index
/// carries no custom settings.
fn extract_settings(index: &str, body: &Value) -> Result<IndexSettings> {
    let Some(entry) = body.get(index).and_then(Value::as_object) else {
        return Err(BridgeError::Assertion(format!(
            "settings lookup succeeded but the response does not mention index '{index}': {body}"
        )));
    };
    let Some(settings) = entry.get("settings").and_then(Value::as_object) else {
        return Err(BridgeError::Assertion(format!(
            "settings lookup succeeded but index '{index}' carries no settings object: {body}"
        )));
    };
    match settings.get("index") {
        Some(fragment) => Ok(serde_json::from_value(fragment.clone())?),
        None => Ok(IndexSettings::default()),
    }
}
