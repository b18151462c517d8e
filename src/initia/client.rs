use anyhow::{anyhow, Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::types::*;

/// Header used to pin Move queries to a historical block height.
const BLOCK_HEIGHT_HEADER: &str = "x-cosmos-block-height";

/// Client wrapper for the Initia REST API.
///
/// One instance per upstream endpoint, constructed at startup and handed to
/// request handlers through the router state.
#[derive(Debug, Clone)]
pub struct InitiaClient {
    http_client: Client,
    endpoint: String,
    chain_id: String,
}

impl InitiaClient {
    /// Create a new Initia REST client.
    pub fn new(endpoint: &str, chain_id: &str) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            chain_id: chain_id.to_string(),
        }
    }

    /// The configured upstream endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The source chain id this client is configured for.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Issue a GET request and deserialize the JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.endpoint, path);
        debug!("Initia REST request: GET {} {:?}", path, query);

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to Initia REST: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Initia REST returned HTTP {} for {}: {}", status, path, body);
            return Err(anyhow!("Initia REST HTTP error: {} - {}", status, body));
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse Initia REST response for {path}"))
    }

    /// Fetch the latest block.
    pub async fn latest_block(&self) -> Result<BlockResponse> {
        self.get_json("/cosmos/base/tendermint/v1beta1/blocks/latest", &[])
            .await
    }

    /// Fetch the block at the given height.
    pub async fn block_by_height(&self, height: u64) -> Result<BlockResponse> {
        self.get_json(
            &format!("/cosmos/base/tendermint/v1beta1/blocks/{height}"),
            &[],
        )
        .await
    }

    /// Fetch every transaction executed at the given height, in listing
    /// order, following the pagination cursor until the upstream stops
    /// returning one.
    pub async fn txs_by_height(&self, height: u64) -> Result<Vec<TxResponse>> {
        let mut txs = Vec::new();
        let mut next_key: Option<String> = None;

        loop {
            let mut query = vec![
                ("query", format!("tx.height={height}")),
                ("order_by", "ORDER_BY_ASC".to_string()),
            ];
            if let Some(key) = &next_key {
                query.push(("pagination.key", key.clone()));
            }

            let page: TxSearchResponse = self.get_json("/cosmos/tx/v1beta1/txs", &query).await?;
            txs.extend(page.tx_responses);

            next_key = page.pagination.and_then(|p| p.next_key).filter(|k| !k.is_empty());
            if next_key.is_none() {
                break;
            }
        }

        debug!("Fetched {} transactions at height {}", txs.len(), height);
        Ok(txs)
    }

    /// List every module published under an account, across all pages.
    pub async fn modules(&self, address: &str) -> Result<Vec<MoveModule>> {
        let path = format!("/initia/move/v1/accounts/{address}/modules");
        let mut modules = Vec::new();
        let mut next_key: Option<String> = None;

        loop {
            let mut query = Vec::new();
            if let Some(key) = &next_key {
                query.push(("pagination.key", key.clone()));
            }

            let page: ModulesResponse = self.get_json(&path, &query).await?;
            modules.extend(page.modules);

            next_key = page.pagination.and_then(|p| p.next_key).filter(|k| !k.is_empty());
            if next_key.is_none() {
                break;
            }
        }

        Ok(modules)
    }

    /// Fetch a single module by name.
    pub async fn module(&self, address: &str, module_name: &str) -> Result<MoveModule> {
        let response: ModuleResponse = self
            .get_json(
                &format!("/initia/move/v1/accounts/{address}/modules/{module_name}"),
                &[],
            )
            .await?;
        Ok(response.module)
    }

    /// List every resource held by an account, across all pages.
    pub async fn resources(&self, address: &str) -> Result<Vec<MoveResource>> {
        let path = format!("/initia/move/v1/accounts/{address}/resources");
        let mut resources = Vec::new();
        let mut next_key: Option<String> = None;

        loop {
            let mut query = Vec::new();
            if let Some(key) = &next_key {
                query.push(("pagination.key", key.clone()));
            }

            let page: ResourcesResponse = self.get_json(&path, &query).await?;
            resources.extend(page.resources);

            next_key = page.pagination.and_then(|p| p.next_key).filter(|k| !k.is_empty());
            if next_key.is_none() {
                break;
            }
        }

        Ok(resources)
    }

    /// Fetch a single resource by struct tag.
    pub async fn resource(&self, address: &str, struct_tag: &str) -> Result<MoveResource> {
        let response: ResourceResponse = self
            .get_json(
                &format!("/initia/move/v1/accounts/{address}/resources/by_struct_tag"),
                &[("struct_tag", struct_tag.to_string())],
            )
            .await?;
        Ok(response.resource)
    }

    /// Execute a read-only view function, optionally pinned to a height.
    pub async fn view_json(
        &self,
        request: &ViewRequest,
        height: Option<u64>,
    ) -> Result<ViewResponse> {
        let url = format!("{}/initia/move/v1/view/json", self.endpoint);
        debug!(
            "Initia view call: {}::{}::{} (height {:?})",
            request.address, request.module_name, request.function_name, height
        );

        let mut builder = self.http_client.post(&url).json(request);
        if let Some(height) = height {
            builder = builder.header(BLOCK_HEIGHT_HEADER, height.to_string());
        }

        let response = builder
            .send()
            .await
            .context("Failed to send view request to Initia REST")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Initia view call returned HTTP {}: {}", status, body);
            return Err(anyhow!("Initia REST HTTP error: {} - {}", status, body));
        }

        response
            .json()
            .await
            .context("Failed to parse Initia view response")
    }
}
