//! Debounced quote refresh.
//!
//! Every edit to the sell amount or token pair restarts a quiet-window
//! timer; only when the window elapses without further edits is a quote
//! request emitted. The timer is what gets cancelled on a new edit --
//! a request already emitted (and possibly in flight) is not.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::swap::types::QuoteParams;

/// An input event for the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteInput {
    /// The form now holds these (quotable) parameters.
    Edit(QuoteParams),
    /// The form was emptied, zeroed, or set to a self-swap.
    Clear,
}

/// Events emitted to the quote fetcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteEvent {
    /// Fetch a quote for these parameters.
    Fetch(QuoteParams),
    /// Discard any displayed quote.
    Clear,
}

/// Handle to a spawned debouncer task.
#[derive(Debug, Clone)]
pub struct QuoteDebouncer {
    input_tx: mpsc::UnboundedSender<QuoteInput>,
}

impl QuoteDebouncer {
    /// Spawn the debouncer task.
    ///
    /// Emits at most one [`QuoteEvent::Fetch`] per burst of edits, carrying
    /// the parameters of the last edit, `quiet_period` after it. `Clear`
    /// inputs propagate immediately and drop any pending fetch.
    pub fn spawn(
        quiet_period: Duration,
        events_tx: mpsc::UnboundedSender<QuoteEvent>,
    ) -> Self {
        let (input_tx, mut input_rx) = mpsc::unbounded_channel::<QuoteInput>();

        tokio::spawn(async move {
            'idle: while let Some(input) = input_rx.recv().await {
                let mut pending = match input {
                    QuoteInput::Edit(params) => params,
                    QuoteInput::Clear => {
                        if events_tx.send(QuoteEvent::Clear).is_err() {
                            return;
                        }
                        continue 'idle;
                    }
                };

                loop {
                    // Recreated each pass: any new input restarts the window
                    tokio::select! {
                        next = input_rx.recv() => match next {
                            Some(QuoteInput::Edit(params)) => pending = params,
                            Some(QuoteInput::Clear) => {
                                if events_tx.send(QuoteEvent::Clear).is_err() {
                                    return;
                                }
                                continue 'idle;
                            }
                            None => return,
                        },
                        _ = tokio::time::sleep(quiet_period) => {
                            if events_tx.send(QuoteEvent::Fetch(pending)).is_err() {
                                return;
                            }
                            continue 'idle;
                        }
                    }
                }
            }
        });

        Self { input_tx }
    }

    /// Record an edit. Non-quotable parameters become a clear.
    pub fn update(&self, params: QuoteParams) {
        let input = if params.is_quotable() {
            QuoteInput::Edit(params)
        } else {
            QuoteInput::Clear
        };
        let _ = self.input_tx.send(input);
    }

    /// Explicitly clear the pending quote.
    pub fn clear(&self) {
        let _ = self.input_tx.send(QuoteInput::Clear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swap::types::NATIVE_ASSET;
    use alloy::primitives::{Address, U256};
    use tokio::time::{advance, Instant};

    fn params(amount: u64) -> QuoteParams {
        QuoteParams {
            sell_token: NATIVE_ASSET,
            buy_token: Address::with_last_byte(1),
            sell_amount: U256::from(amount),
            taker: Address::ZERO,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_edits_emits_single_fetch() {
        let quiet = Duration::from_millis(500);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let debouncer = QuoteDebouncer::spawn(quiet, events_tx);

        // Five rapid edits, 100ms apart, all inside the quiet window.
        // Yield after each send so the debouncer task observes the edit
        // (and restarts its window) before the clock moves.
        for i in 1..=5u64 {
            debouncer.update(params(i));
            tokio::task::yield_now().await;
            advance(Duration::from_millis(100)).await;
        }

        let emitted_at_start = Instant::now();
        let event = events_rx.recv().await.unwrap();
        assert_eq!(event, QuoteEvent::Fetch(params(5)));

        // Emission happened exactly one quiet period after the last edit
        // (the last edit was 100ms before `emitted_at_start`)
        assert_eq!(
            emitted_at_start.elapsed(),
            quiet - Duration::from_millis(100)
        );

        // And only once
        advance(Duration::from_secs(5)).await;
        assert!(events_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_quiet_burst_emits_independently() {
        let quiet = Duration::from_millis(500);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let debouncer = QuoteDebouncer::spawn(quiet, events_tx);

        debouncer.update(params(1));
        advance(Duration::from_millis(600)).await;
        assert_eq!(events_rx.recv().await.unwrap(), QuoteEvent::Fetch(params(1)));

        debouncer.update(params(2));
        advance(Duration::from_millis(600)).await;
        assert_eq!(events_rx.recv().await.unwrap(), QuoteEvent::Fetch(params(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending_fetch() {
        let quiet = Duration::from_millis(500);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let debouncer = QuoteDebouncer::spawn(quiet, events_tx);

        debouncer.update(params(1));
        advance(Duration::from_millis(200)).await;
        debouncer.clear();

        assert_eq!(events_rx.recv().await.unwrap(), QuoteEvent::Clear);
        advance(Duration::from_secs(5)).await;
        assert!(events_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_quotable_edit_becomes_clear() {
        let quiet = Duration::from_millis(500);
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let debouncer = QuoteDebouncer::spawn(quiet, events_tx);

        // Zero sell amount is not quotable
        debouncer.update(params(0));
        assert_eq!(events_rx.recv().await.unwrap(), QuoteEvent::Clear);
    }
}
