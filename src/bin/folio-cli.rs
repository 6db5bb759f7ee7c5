//! Dashboard CLI for the portfolio gateway.
//!
//! Read commands go through the gateway's proxy routes, so no API key is
//! needed here. Send and swap sign locally with the wallet from
//! `FOLIO_WALLET_PRIVATE_KEY` and talk to the chain directly.

use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::utils::{parse_ether, parse_units};
use alloy::primitives::Address;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use folio_gateway::blockchain::client::BlockchainClient;
use folio_gateway::blockchain::transaction::TxBuilder;
use folio_gateway::blockchain::wallet::Wallet;
use folio_gateway::chains;
use folio_gateway::config::loader;
use folio_gateway::indexer::{BalancesResponse, TransactionsResponse};
use folio_gateway::portfolio::format::format_units;
use folio_gateway::portfolio::view;
use folio_gateway::positions::Position;
use folio_gateway::swap::client::AggregatorClient;
use folio_gateway::swap::debounce::{QuoteDebouncer, QuoteEvent};
use folio_gateway::swap::executor::SwapExecutor;
use folio_gateway::swap::types::{token_by_symbol, QuoteParams, TokenInfo};

#[derive(Parser)]
#[command(name = "folio-cli")]
#[command(about = "Portfolio dashboard CLI", long_about = None)]
struct Cli {
    /// Gateway base URL.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Path to the TOML configuration file (send/swap/quote only).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show token balances for an address
    Balances {
        address: String,
        #[arg(long, default_value_t = 8453)]
        chain_id: u64,
    },
    /// Show the NFT gallery for an address
    Nfts {
        address: String,
        #[arg(long, default_value_t = 8453)]
        chain_id: u64,
    },
    /// Show transaction history for an address
    Transactions {
        address: String,
        #[arg(long, default_value_t = 8453)]
        chain_id: u64,
    },
    /// Show DeFi positions for an address
    Positions { address: String },
    /// Send native currency to an address
    Send {
        to: Address,
        /// Amount in whole units (e.g. "0.05").
        amount: String,
    },
    /// Interactive quote mode: type sell amounts, get debounced quotes
    Quote {
        sell: String,
        buy: String,
    },
    /// Execute a swap at the current quote
    Swap {
        sell: String,
        buy: String,
        /// Sell amount in whole units of the sell token.
        amount: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = loader::load_or_default(cli.config.as_deref())?;
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Balances { address, chain_id } => {
            let body = fetch(
                &client,
                &format!(
                    "{}/api/balances?address={}&chainId={}",
                    cli.url, address, chain_id
                ),
            )
            .await?;
            let parsed: BalancesResponse = serde_json::from_value(body)?;
            let rows = view::token_rows(&parsed.data.items);
            if rows.is_empty() {
                println!("No token balances.");
            }
            for row in rows {
                let quote = row
                    .quote_usd
                    .map(|q| format!("${:.2}", q))
                    .unwrap_or_else(|| "-".to_string());
                println!("{:<8} {:>20}  {:>12}  {}", row.symbol, row.balance, quote, row.name);
            }
        }
        Commands::Nfts { address, chain_id } => {
            let body = fetch(
                &client,
                &format!(
                    "{}/api/nfts?address={}&chainId={}",
                    cli.url, address, chain_id
                ),
            )
            .await?;
            let parsed: BalancesResponse = serde_json::from_value(body)?;
            let cards = view::nft_cards(&parsed.data.items);
            if cards.is_empty() {
                println!("No NFTs with displayable images.");
            }
            for card in cards {
                println!("{} ({})\n  {}", card.name, card.collection, card.image_url);
            }
        }
        Commands::Transactions { address, chain_id } => {
            let body = fetch(
                &client,
                &format!(
                    "{}/api/transactions?address={}&chainId={}",
                    cli.url, address, chain_id
                ),
            )
            .await?;
            let parsed: TransactionsResponse = serde_json::from_value(body)?;
            let decimals = chains::chain_info(chain_id)
                .map(|c| c.native_decimals)
                .unwrap_or(18);
            for row in view::transaction_rows(&parsed.data.items, decimals) {
                println!(
                    "{}  {:>6}  {} -> {}  {:>16}  {}",
                    row.timestamp, row.status, row.from, row.to, row.value, row.hash
                );
            }
        }
        Commands::Positions { address } => {
            let body = fetch(
                &client,
                &format!("{}/api/positions?address={}", cli.url, address),
            )
            .await?;
            let positions: Vec<Position> = serde_json::from_value(body)?;
            let rows = view::position_rows(positions);
            if rows.is_empty() {
                println!("No positions above the dust threshold.");
            }
            for row in rows {
                println!("{:<20} {:<30} ${:.2}", row.app, row.label, row.balance_usd);
            }
        }
        Commands::Send { to, amount } => {
            let wallet = Wallet::from_env(config.blockchain.chain_id)?;
            let chain = BlockchainClient::new(config.blockchain.clone()).await?;

            let balance = chain.get_balance(wallet.address()).await?;
            println!(
                "Wallet {} balance: {}",
                wallet.address(),
                format_units(&balance.to_string(), 18).unwrap_or_else(|| balance.to_string())
            );

            let tx = TxBuilder::new(chain, wallet);
            let value = parse_ether(&amount)?;
            let hash = tx.transfer_native(to, value).await?;
            println!("Broadcast: {}", hash);

            let status = tx
                .wait_for_confirmation(hash, config.swap.confirmation_timeout_secs)
                .await?;
            println!("Status: {:?}", status);
        }
        Commands::Quote { sell, buy } => {
            let sell_token = resolve_token(&sell)?;
            let buy_token = resolve_token(&buy)?;
            let taker = Wallet::from_env(config.blockchain.chain_id)
                .map(|w| w.address())
                .unwrap_or(Address::ZERO);

            let aggregator = AggregatorClient::new(
                &config.swap.aggregator_url,
                Duration::from_secs(config.timeouts.upstream_secs),
            )?;

            let (events_tx, mut events_rx) = mpsc::unbounded_channel();
            let debouncer = QuoteDebouncer::spawn(
                Duration::from_millis(config.swap.quiet_period_ms),
                events_tx,
            );

            let buy_decimals = buy_token.decimals;
            tokio::spawn(async move {
                while let Some(event) = events_rx.recv().await {
                    match event {
                        QuoteEvent::Fetch(params) => match aggregator.quote(&params).await {
                            Ok(quote) => {
                                let out = format_units(&quote.buy_amount, buy_decimals)
                                    .unwrap_or_else(|| quote.buy_amount.clone());
                                println!("  -> {} {}", out, buy_token.symbol);
                            }
                            Err(e) => println!("  quote error: {}", e),
                        },
                        QuoteEvent::Clear => println!("  (cleared)"),
                    }
                }
            });

            println!(
                "Enter sell amounts in {} (empty line to clear, Ctrl-D to exit):",
                sell_token.symbol
            );
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut lines = stdin.lines();
            while let Some(line) = lines.next_line().await? {
                let amount = parse_amount(line.trim(), sell_token.decimals);
                match amount {
                    Some(sell_amount) => debouncer.update(QuoteParams {
                        sell_token: sell_token.address,
                        buy_token: buy_token.address,
                        sell_amount,
                        taker,
                    }),
                    None => debouncer.clear(),
                }
            }
        }
        Commands::Swap { sell, buy, amount } => {
            let sell_token = resolve_token(&sell)?;
            let buy_token = resolve_token(&buy)?;
            let wallet = Wallet::from_env(config.blockchain.chain_id)?;

            let sell_amount = parse_amount(&amount, sell_token.decimals)
                .ok_or_else(|| format!("invalid amount: {}", amount))?;
            let params = QuoteParams {
                sell_token: sell_token.address,
                buy_token: buy_token.address,
                sell_amount,
                taker: wallet.address(),
            };

            let aggregator = AggregatorClient::new(
                &config.swap.aggregator_url,
                Duration::from_secs(config.timeouts.upstream_secs),
            )?;
            let quote = aggregator.quote(&params).await?;
            let buy_display = format_units(&quote.buy_amount, buy_token.decimals)
                .unwrap_or_else(|| quote.buy_amount.clone());
            println!(
                "Quoted: {} {} -> {} {}",
                amount, sell_token.symbol, buy_display, buy_token.symbol
            );

            let chain = BlockchainClient::new(config.blockchain.clone()).await?;
            let tx = TxBuilder::new(chain.clone(), wallet);
            let executor =
                SwapExecutor::new(chain, tx, config.swap.confirmation_timeout_secs);

            let hash = executor.execute(sell_token.address, &quote).await?;
            println!("Swap broadcast: {}", hash);

            let status = executor.wait_for_swap(hash).await?;
            println!("Status: {:?}", status);
        }
    }

    Ok(())
}

/// Fetch a gateway route, surfacing the relayed error message on failure.
async fn fetch(client: &reqwest::Client, url: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("gateway request failed");
        return Err(format!("{} ({})", message, status).into());
    }
    Ok(body)
}

fn resolve_token(symbol: &str) -> Result<&'static TokenInfo, String> {
    token_by_symbol(symbol).ok_or_else(|| format!("unknown token: {}", symbol))
}

/// Parse a display-units amount into the token's smallest unit.
///
/// Empty and unparseable inputs map to `None`, which clears the quote.
fn parse_amount(input: &str, decimals: u8) -> Option<alloy::primitives::U256> {
    if input.is_empty() {
        return None;
    }
    parse_units(input, decimals).ok().map(|p| p.get_absolute())
}
