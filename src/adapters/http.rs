use crate::domain::model::{Address, CallOptions, TxHash, TxOptions};
use crate::domain::ports::EthProvider;
use crate::utils::error::{DappError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for an Ethereum node with unlocked accounts (ganache, anvil, geth --dev).
pub struct JsonRpcProvider {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl JsonRpcProvider {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        })
    }

    async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!("RPC request #{} {} to {}", id, method, self.endpoint);
        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        tracing::debug!("RPC response #{} status: {}", id, status);

        let text = response.text().await?;
        let parsed: RpcResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) if !status.is_success() => {
                return Err(DappError::ResponseError {
                    message: format!("HTTP {} from node: {}", status, e),
                })
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(error) = parsed.error {
            tracing::debug!("RPC error #{}: {} ({})", id, error.message, error.code);
            return Err(DappError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        let result = parsed.result.ok_or_else(|| DappError::ResponseError {
            message: format!("{} returned neither result nor error", method),
        })?;
        Ok(serde_json::from_value(result)?)
    }
}

fn quantity(value: u128) -> String {
    format!("0x{:x}", value)
}

fn data_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

pub fn parse_quantity(value: &str) -> Result<u128> {
    let digits = value.strip_prefix("0x").ok_or_else(|| DappError::ResponseError {
        message: format!("quantity without 0x prefix: {}", value),
    })?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16).map_err(|e| DappError::ResponseError {
        message: format!("invalid quantity {}: {}", value, e),
    })
}

pub fn parse_data(value: &str) -> Result<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    Ok(hex::decode(digits)?)
}

pub fn transaction_object(to: &Address, options: &TxOptions, data: &[u8]) -> Value {
    let mut tx = json!({
        "from": options.from.to_string(),
        "to": to.to_string(),
        "data": data_hex(data),
    });
    if let Some(value) = options.value {
        tx["value"] = Value::String(quantity(value));
    }
    if let Some(gas) = options.gas {
        tx["gas"] = Value::String(quantity(u128::from(gas)));
    }
    if let Some(gas_price) = options.gas_price {
        tx["gasPrice"] = Value::String(quantity(gas_price));
    }
    tx
}

#[async_trait]
impl EthProvider for JsonRpcProvider {
    async fn accounts(&self) -> Result<Vec<Address>> {
        self.request("eth_accounts", json!([])).await
    }

    async fn call(&self, to: &Address, options: &CallOptions, data: &[u8]) -> Result<Vec<u8>> {
        let call = json!({
            "from": options.from.to_string(),
            "to": to.to_string(),
            "data": data_hex(data),
        });
        let output: String = self.request("eth_call", json!([call, "latest"])).await?;
        parse_data(&output)
    }

    async fn send_transaction(
        &self,
        to: &Address,
        options: &TxOptions,
        data: &[u8],
    ) -> Result<TxHash> {
        let tx = transaction_object(to, options, data);
        let hash: TxHash = self.request("eth_sendTransaction", json!([tx])).await?;
        tracing::info!("Transaction {} sent from {}", hash, options.from);
        Ok(hash)
    }

    async fn balance(&self, account: &Address) -> Result<u128> {
        let balance: String = self
            .request("eth_getBalance", json!([account.to_string(), "latest"]))
            .await?;
        parse_quantity(&balance)
    }
}
