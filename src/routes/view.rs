use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use http::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::initia::types::ViewRequest;
use crate::server::AppState;
use crate::translator::decode_version;

/// Content type of BCS-encoded view requests, which the gateway
/// deliberately does not serve.
const BCS_VIEW_CONTENT_TYPE: &str = "application/x.aptos.view_function+bcs";

#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub ledger_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ViewBody {
    function: String,
    #[serde(default)]
    type_arguments: Vec<String>,
    #[serde(default)]
    arguments: Vec<Value>,
}

/// `POST /v1/view` - execute a read-only view function.
///
/// Accepts the Aptos JSON body shape. A `ledger_version` query parameter
/// pins the call to the block height owning that version.
pub async fn view_function(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ViewQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if content_type.starts_with(BCS_VIEW_CONTENT_TYPE) {
        return Err(ApiError::NotImplemented(format!(
            "Unsupported content type {BCS_VIEW_CONTENT_TYPE}"
        )));
    }

    let body: ViewBody = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidInput(format!("Invalid view request body: {e}")))?;

    let parts: Vec<&str> = body.function.split("::").collect();
    let [address, module_name, function_name] = parts.as_slice() else {
        return Err(ApiError::InvalidInput(format!(
            "Invalid function '{}'. Expected address::module::function.",
            body.function
        )));
    };

    let height = match &query.ledger_version {
        Some(version) => {
            let version: u64 = version.parse().map_err(|_| {
                ApiError::InvalidInput("Invalid ledger_version query parameter".to_string())
            })?;
            Some(decode_version(version).0)
        }
        None => None,
    };

    let args = body
        .arguments
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::InvalidInput(format!("Unserializable view argument: {e}")))?;

    debug!(
        "View call {}::{}::{} pinned to height {:?}",
        address, module_name, function_name, height
    );

    let request = ViewRequest {
        address: address.to_string(),
        module_name: module_name.to_string(),
        function_name: function_name.to_string(),
        type_args: body.type_arguments,
        args,
    };

    let response = state
        .initia
        .view_json(&request, height)
        .await
        .map_err(|e| ApiError::upstream("Failed to call view function", e))?;

    let result: Value = serde_json::from_str(&response.data)
        .map_err(|e| ApiError::upstream("Invalid view result returned by upstream", e))?;
    Ok(Json(result))
}
