//! Transaction building, signing, broadcasting, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build transactions with gas price capping and estimation
//! - Sign locally and broadcast as raw transactions
//! - Monitor confirmations up to the configured block depth
//!
//! There is deliberately no retry or rollback here: a broadcast transaction
//! is not compensable by this client, so failures abort and surface.

use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;

/// Gas limit for a plain native transfer.
const NATIVE_TRANSFER_GAS: u64 = 21_000;

/// Transaction builder for the send and swap flows.
pub struct TxBuilder {
    client: BlockchainClient,
    wallet: Wallet,
}

impl TxBuilder {
    /// Create a new transaction builder.
    pub fn new(client: BlockchainClient, wallet: Wallet) -> Self {
        Self { client, wallet }
    }

    /// Build a transaction request.
    ///
    /// When `gas_limit` is `None` the gas is estimated via RPC (contract
    /// calls); callers that already know the limit (native transfers, swap
    /// quotes) pass it explicitly.
    pub async fn build(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> BlockchainResult<TransactionRequest> {
        // Sync the wallet nonce with the chain before each sequence step
        let chain_nonce = self
            .client
            .get_transaction_count(self.wallet.address())
            .await?;
        self.wallet.set_nonce(chain_nonce);

        let gas_price = self.client.get_gas_price().await?;
        let gas_price_gwei = gas_price / 1_000_000_000;

        let config = self.client.config();
        if gas_price_gwei > config.max_gas_price_gwei as u128 {
            return Err(BlockchainError::GasPriceTooHigh {
                current_gwei: gas_price_gwei as u64,
                max_gwei: config.max_gas_price_gwei,
            });
        }

        // Apply multiplier for safety margin
        let adjusted_gas_price = (gas_price as f64 * config.gas_price_multiplier) as u128;

        let nonce = self.wallet.get_and_increment_nonce();

        let mut tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(value)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(adjusted_gas_price)
            .with_chain_id(self.wallet.chain_id());

        let gas_limit = match gas_limit {
            Some(limit) => limit,
            None => self.client.estimate_gas(&tx).await?,
        };
        tx = tx.with_gas_limit(gas_limit);

        Ok(tx)
    }

    /// Sign a built transaction and broadcast it.
    pub async fn send(&self, tx: TransactionRequest) -> BlockchainResult<TxHash> {
        let signer = EthereumWallet::from(self.wallet.signer().clone());
        let envelope = tx
            .build(&signer)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Failed to sign transaction: {}", e)))?;

        let hash = self
            .client
            .send_raw_transaction(&envelope.encoded_2718())
            .await?;

        tracing::info!(tx_hash = %hash, "Transaction broadcast");
        Ok(hash)
    }

    /// Build, sign, and broadcast a contract call or raw-calldata transaction.
    pub async fn send_call(
        &self,
        to: Address,
        value: U256,
        data: Bytes,
        gas_limit: Option<u64>,
    ) -> BlockchainResult<TxHash> {
        let tx = self.build(to, value, data, gas_limit).await?;
        self.send(tx).await
    }

    /// Build, sign, and broadcast a native-asset transfer.
    pub async fn transfer_native(&self, to: Address, value: U256) -> BlockchainResult<TxHash> {
        let tx = self
            .build(to, value, Bytes::new(), Some(NATIVE_TRANSFER_GAS))
            .await?;
        self.send(tx).await
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    /// * `timeout_secs` - Maximum time to wait for confirmation
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: TxHash,
        timeout_secs: u64,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_duration = Duration::from_secs(timeout_secs);
        let poll_interval = Duration::from_secs(2);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Failed(
                        "Transaction reverted".to_string(),
                    ));
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required_confirmations {
                    return Ok(ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(timeout_secs)),
        }
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
