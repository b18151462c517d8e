use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::aptos::types::{MoveModuleBytecode, MoveResourceData};
use crate::error::ApiError;
use crate::initia::types::{MoveModule, MoveResource};
use crate::server::AppState;

fn to_module_bytecode(module: &MoveModule) -> Result<MoveModuleBytecode, ApiError> {
    Ok(MoveModuleBytecode {
        abi: serde_json::from_str(&module.abi)
            .map_err(|e| ApiError::upstream("Invalid module ABI returned by upstream", e))?,
        bytecode: module.raw_bytes.clone(),
    })
}

fn to_resource_data(resource: &MoveResource) -> Result<MoveResourceData, ApiError> {
    Ok(MoveResourceData {
        resource_type: resource.struct_tag.clone(),
        data: serde_json::from_str(&resource.move_resource)
            .map_err(|e| ApiError::upstream("Invalid resource data returned by upstream", e))?,
    })
}

/// `GET /v1/accounts/{address}/modules` - all modules, flattened across
/// upstream pages.
pub async fn modules(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Vec<MoveModuleBytecode>>, ApiError> {
    let modules = state
        .initia
        .modules(&address)
        .await
        .map_err(|e| ApiError::upstream(format!("Failed to fetch modules for account {address}"), e))?;

    let modules = modules
        .iter()
        .map(to_module_bytecode)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(modules))
}

/// `GET /v1/accounts/{address}/module/{module}` - one module.
pub async fn module(
    State(state): State<Arc<AppState>>,
    Path((address, module)): Path<(String, String)>,
) -> Result<Json<MoveModuleBytecode>, ApiError> {
    let module = state
        .initia
        .module(&address, &module)
        .await
        .map_err(|e| ApiError::upstream(format!("Failed to fetch module for account {address}"), e))?;

    Ok(Json(to_module_bytecode(&module)?))
}

/// `GET /v1/accounts/{address}/resources` - all resources, flattened across
/// upstream pages.
pub async fn resources(
    State(state): State<Arc<AppState>>,
    Path(address): Path<String>,
) -> Result<Json<Vec<MoveResourceData>>, ApiError> {
    let resources = state
        .initia
        .resources(&address)
        .await
        .map_err(|e| {
            ApiError::upstream(format!("Failed to fetch resources for account {address}"), e)
        })?;

    let resources = resources
        .iter()
        .map(to_resource_data)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(resources))
}

/// `GET /v1/accounts/{address}/resource/{resource}` - one resource by
/// struct tag.
pub async fn resource(
    State(state): State<Arc<AppState>>,
    Path((address, resource)): Path<(String, String)>,
) -> Result<Json<MoveResourceData>, ApiError> {
    let resource = state
        .initia
        .resource(&address, &resource)
        .await
        .map_err(|e| {
            ApiError::upstream(format!("Failed to fetch resource for account {address}"), e)
        })?;

    Ok(Json(to_resource_data(&resource)?))
}
