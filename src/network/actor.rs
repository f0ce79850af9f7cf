//! Network actor - runs fetch sequences in the Tokio runtime
//!
//! Sequences never overlap: a refresh arriving mid-fetch is queued and runs
//! once the current one reports back.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::fetch::{fetch_quotes, FetchSettings, QuoteTransport};

struct PendingFetch {
    id: u64,
    symbols: Vec<String>,
}

/// Network actor that executes quote fetches
pub struct NetworkActor<T> {
    transport: T,
    api_key: Option<String>,
    request_delay: Duration,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active: JoinSet<()>,
    queue: VecDeque<PendingFetch>,
}

impl<T> NetworkActor<T>
where
    T: QuoteTransport + Clone + Send + Sync + 'static,
{
    pub fn new(
        transport: T,
        api_key: Option<String>,
        request_delay: Duration,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            transport,
            api_key,
            request_delay,
            response_tx,
            active: JoinSet::new(),
            queue: VecDeque::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchQuotes { id, symbols }) => {
                            self.queue.push_back(PendingFetch { id, symbols });
                            self.start_next();
                        }

                        Some(NetworkCommand::Shutdown) => {
                            self.active.abort_all();
                            break;
                        }

                        None => break,
                    }
                }

                Some(_result) = self.active.join_next() => {
                    self.start_next();
                }
            }
        }
    }

    /// Start the oldest queued fetch if nothing is running
    fn start_next(&mut self) {
        if !self.active.is_empty() {
            return;
        }
        let Some(pending) = self.queue.pop_front() else {
            return;
        };

        let settings = FetchSettings {
            symbols: pending.symbols,
            api_key: self.api_key.clone(),
            request_delay: self.request_delay,
        };
        let transport = self.transport.clone();
        let response_tx = self.response_tx.clone();
        let id = pending.id;

        self.active.spawn(async move {
            tracing::info!(id, "Starting quote fetch");
            let start = Instant::now();
            let result = fetch_quotes(&transport, &settings).await;
            let time_ms = start.elapsed().as_millis() as u64;

            let response = match result {
                Ok(outcome) => NetworkResponse::Quotes {
                    id,
                    quotes: outcome.quotes,
                    source: outcome.source,
                    time_ms,
                },
                Err(e) => {
                    tracing::warn!(id, error = %e, "Quote fetch failed");
                    NetworkResponse::Failed {
                        id,
                        message: e.to_string(),
                        time_ms,
                    }
                }
            };
            let _ = response_tx.send(response);
        });
    }
}
