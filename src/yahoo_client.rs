use crate::config;
use crate::models::{ChainRecords, Contract, OptionChainResponse, OptionClass};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rand::{seq::SliceRandom, thread_rng};
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, Semaphore};
use tokio_retry::strategy::ExponentialBackoff;
use tokio_retry::Retry;
use tracing::{info, warn};

// -----------------------------------------------
// CLIENT WRAPPER WITH SESSION STATE
// -----------------------------------------------
pub struct YahooClient {
    client: Client,
    warmed_up: Arc<RwLock<bool>>,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            warmed_up: Arc::new(RwLock::new(false)),
        })
    }

    /// Warmup the Yahoo session to pick up cookies (only once per client)
    async fn warmup_if_needed(&self) -> Result<()> {
        // Check if already warmed up
        if *self.warmed_up.read().await {
            return Ok(());
        }

        // Acquire write lock and warmup
        let mut warmed = self.warmed_up.write().await;
        if !*warmed {
            let _ = self
                .client
                .get(config::YAHOO_WARMUP_URL)
                .header("Accept", "text/html")
                .send()
                .await
                .context("Failed to warm up Yahoo session")?;

            tokio::time::sleep(Duration::from_millis(config::WARMUP_DELAY_MS)).await;
            *warmed = true;
        }

        Ok(())
    }

    /// Generic retry fetch with better error handling
    async fn fetch_json(&self, url: &str) -> Result<String> {
        self.warmup_if_needed().await?;

        let backoff = ExponentialBackoff::from_millis(config::RETRY_BASE_DELAY_MS)
            .factor(config::RETRY_FACTOR)
            .max_delay(Duration::from_secs(config::RETRY_MAX_DELAY_SECS))
            .take(config::RETRY_MAX_ATTEMPTS);

        Retry::spawn(backoff, || async {
            let res = self
                .client
                .get(url)
                .send()
                .await
                .context("Request send failed")?;

            let status = res.status();

            if status.is_success() {
                let text = res.text().await.context("Failed to read body")?;

                // Validate JSON
                let trimmed = text.trim();
                if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                    let preview: String = text.chars().take(200).collect();
                    anyhow::bail!("Non-JSON response: {}", preview);
                }

                Ok(text)
            } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                // Retry on server errors and rate limits
                anyhow::bail!("Retryable error: {}", status)
            } else {
                // Fail fast on client errors
                let body = res.text().await.unwrap_or_default();
                let preview: String = body.chars().take(200).collect();
                anyhow::bail!("Client error {}: {}", status, preview)
            }
        })
        .await
    }

    // -----------------------------------------------
    // STEP 1: CHAIN SNAPSHOT (spot + listed expiries)
    // -----------------------------------------------
    pub async fn fetch_chain_snapshot(&self, symbol: &str) -> Result<ChainRecords> {
        let text = self.fetch_json(&config::option_chain_url(symbol)).await?;
        parse_chain_records(&text)
    }

    // -----------------------------------------------
    // STEP 2: CHAIN FOR ONE EXPIRATION
    // -----------------------------------------------
    pub async fn fetch_expiry_chain(&self, symbol: &str, expiry_epoch: i64) -> Result<ChainRecords> {
        let text = self
            .fetch_json(&config::option_chain_expiry_url(symbol, expiry_epoch))
            .await?;
        parse_chain_records(&text)
    }

    // -----------------------------------------------
    // FULL FETCH WITH CONCURRENCY CONTROL
    // -----------------------------------------------
    /// Fetch every expiration inside the day window and flatten the chains
    /// into tagged contract rows. A failed expiry is logged and skipped so
    /// one bad date never aborts the whole scan; callers get whatever rows
    /// could be fetched, possibly none.
    pub async fn fetch_contracts(
        self: Arc<Self>,
        symbol: &str,
        min_days: i64,
        max_days: i64,
    ) -> Result<(f64, Vec<Contract>)> {
        let snapshot = self.fetch_chain_snapshot(symbol).await?;
        let spot = snapshot.quote.regular_market_price;
        let today = Local::now().date_naive();

        let expiries: Vec<i64> = snapshot
            .expiration_dates
            .iter()
            .copied()
            .filter(|&epoch| {
                let days = days_between(today, epoch);
                days >= min_days && days <= max_days
            })
            .collect();

        info!(
            symbol,
            spot,
            expiries = expiries.len(),
            "fetching option chains inside expiry window"
        );

        let semaphore = Arc::new(Semaphore::new(config::DEFAULT_MAX_CONCURRENT));
        let mut handles = vec![];

        for epoch in expiries {
            let client = Arc::clone(&self);
            let sem = Arc::clone(&semaphore);
            let symbol = symbol.to_string();

            let handle = tokio::spawn(async move {
                let _permit = sem
                    .acquire_owned()
                    .await
                    .map_err(|e| anyhow::anyhow!("Semaphore error: {}", e))?;

                client.fetch_expiry_chain(&symbol, epoch).await
            });

            handles.push(handle);
        }

        let mut contracts = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(Ok(records)) => {
                    for chain in records.options {
                        for raw in chain.calls {
                            contracts.push(raw.into_contract(OptionClass::Call, today));
                        }
                        for raw in chain.puts {
                            contracts.push(raw.into_contract(OptionClass::Put, today));
                        }
                    }
                }
                Ok(Err(e)) => warn!("Expiry fetch failed, skipping: {:#}", e),
                Err(e) => warn!("Expiry fetch task failed, skipping: {}", e),
            }
        }

        Ok((spot, contracts))
    }
}

fn parse_chain_records(text: &str) -> Result<ChainRecords> {
    let parsed: OptionChainResponse =
        serde_json::from_str(text).context("Failed to parse option chain")?;

    parsed
        .option_chain
        .result
        .into_iter()
        .next()
        .context("Empty option chain result")
}

fn days_between(today: NaiveDate, epoch_secs: i64) -> i64 {
    (crate::models::epoch_to_date(epoch_secs) - today).num_days()
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client() -> Result<Client> {
    let mut headers = header::HeaderMap::new();

    // Rotating Accept-Language headers (fingerprint avoidance)
    let lang = config::ACCEPT_LANGUAGES.choose(&mut thread_rng()).unwrap();
    headers.insert(
        header::ACCEPT_LANGUAGE,
        header::HeaderValue::from_str(lang)?,
    );
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    Ok(Client::builder()
        .default_headers(headers)
        .cookie_store(true) // Yahoo wants a session cookie
        .user_agent(config::USER_AGENT)
        .timeout(config::HTTP_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")?)
}
