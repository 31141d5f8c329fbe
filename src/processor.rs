use crate::config;
use crate::models::{Contract, EvaluatedContract, ScanSpec};
use crate::pricing;

/// Canonical trading price: midpoint of bid/ask when strictly positive,
/// otherwise the last traded price. Illiquid contracts often quote one
/// side only, and a zero or stale midpoint is worse than the last print.
pub fn canonical_price(bid: f64, ask: f64, last_price: f64) -> f64 {
    let mid = (bid + ask) / 2.0;
    if mid > 0.0 { mid } else { last_price }
}

/// Days-to-expiry as a year fraction. A same-day expiry works out to
/// exactly zero; substitute a small positive floor so the pricing model
/// stays well-defined instead of silently degenerating.
pub fn time_to_expiry_years(days_to_expiry: i64) -> f64 {
    let t = days_to_expiry as f64 / config::DAYS_PER_YEAR;
    if t == 0.0 { config::MIN_TIME_YEARS } else { t }
}

/// Derive price, time and sensitivity for every usable contract in the
/// batch. Rows with implied volatility at or below the usability floor
/// (or a non-positive strike) cannot be priced and are dropped here; the
/// input batch is left untouched.
pub fn evaluate_contracts(
    contracts: &[Contract],
    spot: f64,
    spec: &ScanSpec,
) -> Vec<EvaluatedContract> {
    contracts
        .iter()
        .filter(|c| c.implied_volatility > config::MIN_USABLE_IV && c.strike > 0.0)
        .map(|c| {
            let price = canonical_price(c.bid, c.ask, c.last_price);
            let time_years = time_to_expiry_years(c.days_to_expiry);
            let delta = pricing::bs_delta(
                spot,
                c.strike,
                time_years,
                spec.risk_free_rate,
                c.implied_volatility,
                c.option_class,
            );
            let roc = price / c.strike * 100.0;

            EvaluatedContract {
                base: c.clone(),
                price,
                time_years,
                delta,
                roc,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionClass;

    fn contract(iv: f64, bid: f64, ask: f64, last: f64) -> Contract {
        Contract {
            contract_symbol: "TEST260904C00100000".to_string(),
            option_class: OptionClass::Call,
            expiration_date: "2026-09-04".to_string(),
            days_to_expiry: 30,
            strike: 100.0,
            bid,
            ask,
            last_price: last,
            implied_volatility: iv,
            volume: 0,
            open_interest: 0,
        }
    }

    #[test]
    fn test_canonical_price_uses_mid() {
        assert_eq!(canonical_price(10.0, 12.0, 5.0), 11.0);
    }

    #[test]
    fn test_canonical_price_falls_back_to_last() {
        assert_eq!(canonical_price(0.0, 0.0, 5.0), 5.0);
    }

    #[test]
    fn test_canonical_price_can_be_zero() {
        assert_eq!(canonical_price(0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_time_floor_on_expiry_day() {
        assert_eq!(time_to_expiry_years(0), 0.0001);
        assert!((time_to_expiry_years(30) - 30.0 / 365.0).abs() < 1e-12);
    }

    #[test]
    fn test_unpriceable_iv_dropped() {
        let spec = ScanSpec::new("TEST", OptionClass::Call, 0.5);
        let batch = vec![
            contract(0.25, 3.0, 3.2, 0.0),
            contract(0.001, 3.0, 3.2, 0.0), // at the floor, still unusable
            contract(0.0, 3.0, 3.2, 0.0),
            contract(-0.1, 3.0, 3.2, 0.0),
        ];

        let evaluated = evaluate_contracts(&batch, 100.0, &spec);
        assert_eq!(evaluated.len(), 1);
        assert_eq!(evaluated[0].base.implied_volatility, 0.25);
    }

    #[test]
    fn test_zero_price_contract_is_kept() {
        let spec = ScanSpec::new("TEST", OptionClass::Call, 0.5);
        let batch = vec![contract(0.25, 0.0, 0.0, 0.0)];

        let evaluated = evaluate_contracts(&batch, 100.0, &spec);
        assert_eq!(evaluated.len(), 1);
        assert_eq!(evaluated[0].price, 0.0);
        assert_eq!(evaluated[0].roc, 0.0);
    }

    #[test]
    fn test_evaluation_fills_derived_fields() {
        let spec = ScanSpec::new("TEST", OptionClass::Call, 0.5);
        let batch = vec![contract(0.25, 3.0, 3.2, 2.8)];

        let evaluated = evaluate_contracts(&batch, 100.0, &spec);
        assert_eq!(evaluated.len(), 1);
        let row = &evaluated[0];
        assert!((row.price - 3.1).abs() < 1e-12);
        assert!((row.time_years - 30.0 / 365.0).abs() < 1e-12);
        assert!((row.roc - 3.1).abs() < 1e-12);
        assert!(row.delta > 0.0 && row.delta < 1.0);
    }
}
