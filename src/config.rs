use std::time::Duration;

// -----------------------------------------------
// MARKET DATA ENDPOINTS (Yahoo Finance)
// -----------------------------------------------
pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const YAHOO_WARMUP_URL: &str = "https://finance.yahoo.com";

pub fn option_chain_url(symbol: &str) -> String {
    format!(
        "{}/v7/finance/options/{}",
        YAHOO_BASE_URL,
        urlencoding::encode(symbol) // URL-encode the symbol
    )
}

pub fn option_chain_expiry_url(symbol: &str, expiry_epoch: i64) -> String {
    format!(
        "{}/v7/finance/options/{}?date={}",
        YAHOO_BASE_URL,
        urlencoding::encode(symbol),
        expiry_epoch
    )
}

// -----------------------------------------------
// HTTP CLIENT CONFIG
// -----------------------------------------------
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                               AppleWebKit/537.36 (KHTML, like Gecko) \
                               Chrome/131.0.0.0 Safari/537.36";

pub const ACCEPT_LANGUAGES: &[&str] = &[
    "en-US,en;q=0.9",
    "en-GB,en;q=0.8",
    "en-IN,en;q=0.9",
];

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(20);

// -----------------------------------------------
// SESSION WARMUP
// -----------------------------------------------
pub const WARMUP_DELAY_MS: u64 = 200;

// -----------------------------------------------
// RETRY CONFIG
// -----------------------------------------------
pub const RETRY_BASE_DELAY_MS: u64 = 200;
pub const RETRY_FACTOR: u64 = 3;
pub const RETRY_MAX_DELAY_SECS: u64 = 5;
pub const RETRY_MAX_ATTEMPTS: usize = 5;

// -----------------------------------------------
// CONCURRENCY LIMITS
// -----------------------------------------------
pub const DEFAULT_MAX_CONCURRENT: usize = 5;

// -----------------------------------------------
// SCAN DEFAULTS
// -----------------------------------------------
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;
pub const DEFAULT_DELTA_TOLERANCE: f64 = 0.05;
pub const DEFAULT_MIN_ROC_PCT: f64 = 1.0;
pub const DEFAULT_MAX_DAYS: i64 = 45;
pub const DEFAULT_MIN_DAYS: i64 = 0;
pub const DEFAULT_TARGET_DELTA: f64 = 0.30;

// -----------------------------------------------
// PRICING FLOORS
// -----------------------------------------------
// IV divides the delta formula; rows at or below this floor are unpriceable.
pub const MIN_USABLE_IV: f64 = 0.001;

// Substituted when days-to-expiry works out to exactly zero.
pub const MIN_TIME_YEARS: f64 = 0.0001;

pub const DAYS_PER_YEAR: f64 = 365.0;

// -----------------------------------------------
// RUNTIME CONFIGURATION
// -----------------------------------------------

/// Get the underlying symbol to scan (required, no default)
pub fn get_symbol() -> Option<String> {
    std::env::var("SCAN_SYMBOL").ok()
}

/// Get the option class from environment or default to put
pub fn get_option_class() -> String {
    std::env::var("SCAN_CLASS").unwrap_or_else(|_| "put".to_string())
}

/// Get the target delta magnitude
pub fn get_target_delta() -> f64 {
    std::env::var("SCAN_DELTA")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap_or(DEFAULT_TARGET_DELTA)
}

/// Get the delta tolerance band
pub fn get_delta_tolerance() -> f64 {
    std::env::var("SCAN_TOLERANCE")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap_or(DEFAULT_DELTA_TOLERANCE)
}

/// Get the minimum return-on-capital percentage
pub fn get_min_roc() -> f64 {
    std::env::var("SCAN_MIN_ROC")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap_or(DEFAULT_MIN_ROC_PCT)
}

/// Get the maximum days to expiration
pub fn get_max_days() -> i64 {
    std::env::var("SCAN_MAX_DAYS")
        .unwrap_or_default()
        .parse::<i64>()
        .unwrap_or(DEFAULT_MAX_DAYS)
}

/// Get the minimum days to expiration
pub fn get_min_days() -> i64 {
    std::env::var("SCAN_MIN_DAYS")
        .unwrap_or_default()
        .parse::<i64>()
        .unwrap_or(DEFAULT_MIN_DAYS)
}

/// Get the risk-free rate used for pricing
pub fn get_risk_free_rate() -> f64 {
    std::env::var("SCAN_RATE")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap_or(DEFAULT_RISK_FREE_RATE)
}
