//! Swap execution sequence.
//!
//! Selling a non-native asset requires the aggregator's allowance target
//! to be approved first. The sequence is strictly ordered: the approval
//! must confirm before the swap is broadcast, and any failure aborts the
//! remainder. There is no rollback; an already-confirmed approval simply
//! stands.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::erc20;
use crate::blockchain::transaction::TxBuilder;
use crate::blockchain::types::{BlockchainError, ConfirmationStatus};
use crate::swap::types::{SwapQuote, NATIVE_ASSET};
use crate::upstream::UpstreamError;

/// Errors from the swap flow.
#[derive(Debug, Error)]
pub enum SwapError {
    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Quote contained a field we could not parse.
    #[error("Malformed quote field: {0}")]
    MalformedQuote(&'static str),

    /// The approval step did not reach confirmation.
    #[error("Approval failed: {0}")]
    ApprovalFailed(String),
}

/// Whether an approval transaction must precede the swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    /// Allowance is already sufficient, or the sell asset is native.
    NotRequired,
    /// Approve `spender` for `amount` before swapping.
    Required { spender: Address, amount: U256 },
}

/// Decide whether an approval is needed.
///
/// Pure function of the sell asset, the currently granted allowance, and
/// the quote's sell amount.
pub fn approval_decision(
    sell_token: Address,
    current_allowance: U256,
    quote: &SwapQuote,
) -> Result<ApprovalDecision, SwapError> {
    if sell_token == NATIVE_ASSET {
        return Ok(ApprovalDecision::NotRequired);
    }

    let sell_amount = quote
        .sell_amount_units()
        .ok_or(SwapError::MalformedQuote("sellAmount"))?;

    if current_allowance < sell_amount {
        Ok(ApprovalDecision::Required {
            spender: quote.allowance_target,
            amount: sell_amount,
        })
    } else {
        Ok(ApprovalDecision::NotRequired)
    }
}

/// Executes the approval-then-swap sequence.
pub struct SwapExecutor {
    client: BlockchainClient,
    tx: TxBuilder,
    confirmation_timeout_secs: u64,
}

impl SwapExecutor {
    /// Create a new executor.
    pub fn new(client: BlockchainClient, tx: TxBuilder, confirmation_timeout_secs: u64) -> Self {
        Self {
            client,
            tx,
            confirmation_timeout_secs,
        }
    }

    /// Execute a quoted swap, approving the allowance target first when
    /// needed. Returns the swap transaction hash.
    pub async fn execute(&self, sell_token: Address, quote: &SwapQuote) -> Result<TxHash, SwapError> {
        if sell_token != NATIVE_ASSET {
            let taker = self.tx.address();
            let current = erc20::allowance(
                &self.client,
                sell_token,
                taker,
                quote.allowance_target,
            )
            .await?;

            if let ApprovalDecision::Required { spender, amount } =
                approval_decision(sell_token, current, quote)?
            {
                tracing::info!(
                    token = %sell_token,
                    spender = %spender,
                    amount = %amount,
                    "Submitting approval before swap"
                );
                self.approve(sell_token, spender, amount).await?;
            }
        }

        let value = quote
            .value_wei()
            .ok_or(SwapError::MalformedQuote("value"))?;
        let gas = quote.gas_limit().ok_or(SwapError::MalformedQuote("gas"))?;

        let hash = self
            .tx
            .send_call(quote.to, value, quote.data.clone(), Some(gas))
            .await?;
        tracing::info!(tx_hash = %hash, "Swap transaction broadcast");
        Ok(hash)
    }

    /// Submit an approval and wait for it to confirm. Anything short of a
    /// confirmed receipt aborts the sequence.
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), SwapError> {
        let calldata = erc20::approve_calldata(spender, amount);
        let hash = self.tx.send_call(token, U256::ZERO, calldata, None).await?;

        match self
            .tx
            .wait_for_confirmation(hash, self.confirmation_timeout_secs)
            .await?
        {
            ConfirmationStatus::Confirmed { block_number } => {
                tracing::info!(tx_hash = %hash, block = block_number, "Approval confirmed");
                Ok(())
            }
            ConfirmationStatus::Failed(reason) => Err(SwapError::ApprovalFailed(reason)),
            ConfirmationStatus::Confirming { current, required } => {
                Err(SwapError::ApprovalFailed(format!(
                    "only {} of {} confirmations",
                    current, required
                )))
            }
        }
    }

    /// Wait for the swap transaction itself to confirm.
    pub async fn wait_for_swap(&self, hash: TxHash) -> Result<ConfirmationStatus, SwapError> {
        Ok(self
            .tx
            .wait_for_confirmation(hash, self.confirmation_timeout_secs)
            .await?)
    }
}
