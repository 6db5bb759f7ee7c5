//! View-model assembly for the dashboard CLI.

use crate::indexer::types::{BalanceItem, TransactionItem};
use crate::portfolio::format::{format_units, truncate_address};
use crate::positions::{self, Position};

/// Placeholder for values the upstream did not supply.
const UNKNOWN: &str = "-";

/// A token balance row.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow {
    pub name: String,
    pub symbol: String,
    /// Display-formatted balance, scaled from the raw integer.
    pub balance: String,
    /// USD value, when priced.
    pub quote_usd: Option<f64>,
}

/// Build token rows from a balances response, skipping NFT entries.
pub fn token_rows(items: &[BalanceItem]) -> Vec<TokenRow> {
    items
        .iter()
        .filter(|item| item.kind.as_deref() != Some("nft"))
        .map(|item| TokenRow {
            name: item.contract_name.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            symbol: item
                .contract_ticker_symbol
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            balance: format_units(&item.balance, item.contract_decimals)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            quote_usd: item.quote,
        })
        .collect()
}

/// A transaction history row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub hash: String,
    pub from: String,
    pub to: String,
    /// Native value moved, display-formatted.
    pub value: String,
    pub timestamp: String,
    pub status: &'static str,
}

/// Build transaction rows from a transactions response.
pub fn transaction_rows(items: &[TransactionItem], native_decimals: u8) -> Vec<TransactionRow> {
    items
        .iter()
        .map(|item| TransactionRow {
            hash: truncate_address(&item.tx_hash),
            from: item
                .from_address
                .as_deref()
                .map(truncate_address)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            to: item
                .to_address
                .as_deref()
                .map(truncate_address)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            value: format_units(&item.value, native_decimals)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            timestamp: item
                .block_signed_at
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
            status: if item.successful { "ok" } else { "failed" },
        })
        .collect()
}

/// An NFT gallery card.
#[derive(Debug, Clone, PartialEq)]
pub struct NftCard {
    pub name: String,
    pub collection: String,
    pub image_url: String,
}

/// Build NFT cards: only items of type "nft" that carry an image.
pub fn nft_cards(items: &[BalanceItem]) -> Vec<NftCard> {
    items
        .iter()
        .filter(|item| item.kind.as_deref() == Some("nft"))
        .filter_map(|item| {
            let external = item
                .nft_data
                .as_ref()?
                .first()?
                .external_data
                .as_ref()?;
            let image_url = external.image.clone().filter(|i| !i.is_empty())?;
            Some(NftCard {
                name: external
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| "No Name".to_string()),
                collection: item
                    .contract_name
                    .clone()
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                image_url,
            })
        })
        .collect()
}

/// A DeFi position row.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionRow {
    pub app: String,
    pub label: String,
    pub balance_usd: f64,
}

/// Build position rows: dust filtered, sorted by value descending.
pub fn position_rows(all: Vec<Position>) -> Vec<PositionRow> {
    positions::displayable(all)
        .into_iter()
        .map(|p| PositionRow {
            app: p.app_name.unwrap_or_else(|| UNKNOWN.to_string()),
            label: p.display_props.label.unwrap_or_else(|| UNKNOWN.to_string()),
            balance_usd: p.balance_usd,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::types::{NftData, NftExternalData};

    fn token_item(symbol: &str, balance: &str, decimals: u8) -> BalanceItem {
        BalanceItem {
            contract_name: Some(format!("{} Token", symbol)),
            contract_ticker_symbol: Some(symbol.to_string()),
            contract_decimals: decimals,
            balance: balance.to_string(),
            quote: Some(1.0),
            logo_url: None,
            kind: Some("cryptocurrency".to_string()),
            nft_data: None,
        }
    }

    fn nft_item(collection: &str, name: Option<&str>, image: Option<&str>) -> BalanceItem {
        BalanceItem {
            contract_name: Some(collection.to_string()),
            contract_ticker_symbol: None,
            contract_decimals: 0,
            balance: "1".to_string(),
            quote: None,
            logo_url: None,
            kind: Some("nft".to_string()),
            nft_data: Some(vec![NftData {
                external_data: Some(NftExternalData {
                    name: name.map(String::from),
                    image: image.map(String::from),
                }),
            }]),
        }
    }

    #[test]
    fn test_token_rows_skip_nfts_and_format_from_raw() {
        let items = vec![
            token_item("USDC", "12500000", 6),
            nft_item("Cool Cats", Some("Cat"), Some("https://img")),
        ];
        let rows = token_rows(&items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "USDC");
        assert_eq!(rows[0].balance, "12.50");
    }

    #[test]
    fn test_nft_cards_require_an_image() {
        let items = vec![
            nft_item("With Image", Some("A"), Some("https://img")),
            nft_item("No Image", Some("B"), None),
            nft_item("Empty Image", Some("C"), Some("")),
            token_item("USDC", "1", 6),
        ];
        let cards = nft_cards(&items);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].collection, "With Image");
    }

    #[test]
    fn test_nft_card_name_fallback() {
        let items = vec![nft_item("Coll", None, Some("https://img"))];
        assert_eq!(nft_cards(&items)[0].name, "No Name");
    }

    #[test]
    fn test_transaction_rows_truncate_and_flag_status() {
        let item = TransactionItem {
            tx_hash: "0xabcdef0123456789abcdef0123456789abcdef0123456789".to_string(),
            from_address: Some("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".to_string()),
            to_address: None,
            value: "1000000000000000000".to_string(),
            block_signed_at: Some("2024-05-01T12:00:00Z".to_string()),
            successful: false,
        };
        let rows = transaction_rows(&[item], 18);
        assert_eq!(rows[0].value, "1.00");
        assert_eq!(rows[0].from, "0xf39f...2266");
        assert_eq!(rows[0].to, "-");
        assert_eq!(rows[0].status, "failed");
    }
}
