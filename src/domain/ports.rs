use crate::domain::model::{Address, CallOptions, TxHash, TxOptions};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Node access used by the contract proxy.
#[async_trait]
pub trait EthProvider: Send + Sync {
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Read-only call; returns the raw ABI-encoded return data.
    async fn call(&self, to: &Address, options: &CallOptions, data: &[u8]) -> Result<Vec<u8>>;

    async fn send_transaction(
        &self,
        to: &Address,
        options: &TxOptions,
        data: &[u8],
    ) -> Result<TxHash>;

    /// Balance in wei.
    async fn balance(&self, account: &Address) -> Result<u128>;
}

#[async_trait]
impl<P: EthProvider + ?Sized> EthProvider for std::sync::Arc<P> {
    async fn accounts(&self) -> Result<Vec<Address>> {
        (**self).accounts().await
    }

    async fn call(&self, to: &Address, options: &CallOptions, data: &[u8]) -> Result<Vec<u8>> {
        (**self).call(to, options, data).await
    }

    async fn send_transaction(
        &self,
        to: &Address,
        options: &TxOptions,
        data: &[u8],
    ) -> Result<TxHash> {
        (**self).send_transaction(to, options, data).await
    }

    async fn balance(&self, account: &Address) -> Result<u128> {
        (**self).balance(account).await
    }
}
