//! ERC-20 interface helpers for the swap flow.
//!
//! Only the two operations the swap sequence needs: reading the current
//! spend allowance and building approval calldata.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

sol! {
    /// Minimal ERC-20 surface used by the swap sequence.
    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

/// Read the current allowance `owner` has granted `spender` on `token`.
pub async fn allowance(
    client: &BlockchainClient,
    token: Address,
    owner: Address,
    spender: Address,
) -> BlockchainResult<U256> {
    let calldata = IERC20::allowanceCall { owner, spender }.abi_encode();
    let raw = client.call(token, calldata.into()).await?;
    IERC20::allowanceCall::abi_decode_returns(&raw)
        .map_err(|e| BlockchainError::Abi(format!("allowance return: {}", e)))
}

/// Build the calldata for `approve(spender, amount)`.
pub fn approve_calldata(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_approve_calldata_selector_and_args() {
        let spender = address!("1111111111111111111111111111111111111111");
        let amount = U256::from(1_000_000u64);
        let data = approve_calldata(spender, amount);

        // 4-byte selector for approve(address,uint256) is 0x095ea7b3
        assert_eq!(&data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
        // selector + two 32-byte words
        assert_eq!(data.len(), 4 + 32 + 32);

        let decoded = IERC20::approveCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.spender, spender);
        assert_eq!(decoded.amount, amount);
    }
}
