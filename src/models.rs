use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionClass {
    Call,
    Put,
}

impl OptionClass {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "call" | "c" => Some(OptionClass::Call),
            "put" | "p" => Some(OptionClass::Put),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionClass::Call => "call",
            OptionClass::Put => "put",
        }
    }
}

/// One contract row as quoted by the provider, immutable once fetched.
/// `days_to_expiry` is stamped against the evaluation date when the row is
/// built; a contract already past expiry carries a negative value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    #[serde(rename = "contractSymbol")]
    pub contract_symbol: String,

    #[serde(rename = "optionType")]
    pub option_class: OptionClass,

    #[serde(rename = "expirationDate")]
    pub expiration_date: String,

    #[serde(rename = "daysToExpiry")]
    pub days_to_expiry: i64,

    pub strike: f64,

    pub bid: f64,

    pub ask: f64,

    #[serde(rename = "lastPrice")]
    pub last_price: f64,

    #[serde(rename = "impliedVolatility")]
    pub implied_volatility: f64,

    pub volume: u64,

    #[serde(rename = "openInterest")]
    pub open_interest: u64,
}

/// What the trader is looking for. Built once per run, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSpec {
    pub symbol: String,
    pub option_class: OptionClass,
    pub target_delta: f64,
    pub delta_tolerance: f64,
    pub min_roc_pct: f64,
    pub max_days: i64,
    pub min_days: i64,
    pub risk_free_rate: f64,
}

impl ScanSpec {
    pub fn new(symbol: impl Into<String>, option_class: OptionClass, target_delta: f64) -> Self {
        Self {
            symbol: symbol.into(),
            option_class,
            target_delta,
            delta_tolerance: config::DEFAULT_DELTA_TOLERANCE,
            min_roc_pct: config::DEFAULT_MIN_ROC_PCT,
            max_days: config::DEFAULT_MAX_DAYS,
            min_days: config::DEFAULT_MIN_DAYS,
            risk_free_rate: config::DEFAULT_RISK_FREE_RATE,
        }
    }
}

/// Contract augmented with computed pricing fields. All values are kept
/// unrounded; display rounding belongs to the report layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluatedContract {
    #[serde(flatten)]
    pub base: Contract,

    pub price: f64,

    #[serde(rename = "timeYears")]
    pub time_years: f64,

    pub delta: f64,

    // price / strike as a percentage. Ignores the premium's offset of the
    // capital at risk and any contract multiplier.
    pub roc: f64,
}

/// Ranked matches plus the count of in-window contracts that entered
/// evaluation, so "nothing in range" and "nothing matched" stay distinct.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub matches: Vec<EvaluatedContract>,
    pub considered: usize,
}

// -----------------------------------------------
// PROVIDER WIRE FORMAT (Yahoo v7 options API)
// -----------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChainResponse {
    #[serde(rename = "optionChain")]
    pub option_chain: OptionChainResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionChainResult {
    pub result: Vec<ChainRecords>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainRecords {
    #[serde(rename = "underlyingSymbol")]
    pub underlying_symbol: String,

    #[serde(rename = "expirationDates")]
    pub expiration_dates: Vec<i64>,

    pub quote: Quote,

    pub options: Vec<ExpirationChain>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "regularMarketPrice")]
    pub regular_market_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpirationChain {
    #[serde(rename = "expirationDate")]
    pub expiration_date: i64,

    pub calls: Vec<RawContract>,

    pub puts: Vec<RawContract>,
}

/// Raw provider row. Illiquid contracts routinely omit bid/ask, volume or
/// IV; absent numeric fields default to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawContract {
    #[serde(rename = "contractSymbol")]
    pub contract_symbol: String,

    pub strike: f64,

    pub expiration: i64,

    #[serde(rename = "lastPrice", default)]
    pub last_price: f64,

    #[serde(default)]
    pub bid: f64,

    #[serde(default)]
    pub ask: f64,

    #[serde(rename = "impliedVolatility", default)]
    pub implied_volatility: f64,

    #[serde(default)]
    pub volume: u64,

    #[serde(rename = "openInterest", default)]
    pub open_interest: u64,
}

impl RawContract {
    /// Tag a raw row with its class and stamp days-to-expiry against the
    /// evaluation date.
    pub fn into_contract(self, option_class: OptionClass, today: NaiveDate) -> Contract {
        let expiry = epoch_to_date(self.expiration);
        Contract {
            contract_symbol: self.contract_symbol,
            option_class,
            expiration_date: expiry.format("%Y-%m-%d").to_string(),
            days_to_expiry: (expiry - today).num_days(),
            strike: self.strike,
            bid: self.bid,
            ask: self.ask,
            last_price: self.last_price,
            implied_volatility: self.implied_volatility,
            volume: self.volume,
            open_interest: self.open_interest,
        }
    }
}

/// Calendar date of a provider expiration timestamp (UTC).
pub fn epoch_to_date(epoch_secs: i64) -> NaiveDate {
    chrono::DateTime::from_timestamp(epoch_secs, 0)
        .map(|dt| dt.date_naive())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    #[test]
    fn test_option_class_parse() {
        assert_eq!(OptionClass::parse("call"), Some(OptionClass::Call));
        assert_eq!(OptionClass::parse("PUT"), Some(OptionClass::Put));
        assert_eq!(OptionClass::parse("p"), Some(OptionClass::Put));
        assert_eq!(OptionClass::parse("straddle"), None);
    }

    #[test]
    fn test_raw_contract_conversion_stamps_days() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let expiry = today.checked_add_days(Days::new(30)).unwrap();
        let epoch = expiry.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();

        let raw = RawContract {
            contract_symbol: "AAPL260904C00100000".to_string(),
            strike: 100.0,
            expiration: epoch,
            last_price: 3.0,
            bid: 2.9,
            ask: 3.1,
            implied_volatility: 0.25,
            volume: 10,
            open_interest: 100,
        };

        let contract = raw.into_contract(OptionClass::Call, today);
        assert_eq!(contract.days_to_expiry, 30);
        assert_eq!(contract.expiration_date, expiry.format("%Y-%m-%d").to_string());
        assert_eq!(contract.option_class, OptionClass::Call);
    }

    #[test]
    fn test_raw_contract_missing_fields_default_to_zero() {
        let json = r#"{
            "contractSymbol": "AAPL260904P00100000",
            "strike": 100.0,
            "expiration": 1788998400
        }"#;

        let raw: RawContract = serde_json::from_str(json).unwrap();
        assert_eq!(raw.bid, 0.0);
        assert_eq!(raw.ask, 0.0);
        assert_eq!(raw.last_price, 0.0);
        assert_eq!(raw.implied_volatility, 0.0);
        assert_eq!(raw.volume, 0);
        assert_eq!(raw.open_interest, 0);
    }
}
