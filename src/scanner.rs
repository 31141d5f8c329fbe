use std::cmp::Ordering;

use tracing::{debug, info};

use crate::error::ScanError;
use crate::models::{Contract, EvaluatedContract, OptionClass, ScanOutcome, ScanSpec};
use crate::processor;

/// Puts carry negative deltas. A positive target for a put is read as a
/// magnitude and negated, so callers can always say "0.30 delta"
/// regardless of class. Everything else passes through unchanged.
pub fn effective_target_delta(spec: &ScanSpec) -> f64 {
    if spec.option_class == OptionClass::Put && spec.target_delta > 0.0 {
        -spec.target_delta
    } else {
        spec.target_delta
    }
}

/// Run one scan pass over a raw contract batch.
///
/// Contracts are narrowed to the requested class and days-to-expiry
/// window, evaluated (unpriceable rows drop out), then matched against
/// the inclusive delta acceptance window and minimum ROC. Matches come
/// back ranked by ROC descending; ties keep their incoming order.
///
/// Fails only on caller contract violations: a non-positive spot or a
/// negative tolerance. Malformed individual rows never error.
pub fn scan(contracts: &[Contract], spot: f64, spec: &ScanSpec) -> Result<ScanOutcome, ScanError> {
    if spot <= 0.0 {
        return Err(ScanError::InvalidSpot(spot));
    }
    if spec.delta_tolerance < 0.0 {
        return Err(ScanError::InvalidTolerance(spec.delta_tolerance));
    }

    let in_window: Vec<Contract> = contracts
        .iter()
        .filter(|c| c.option_class == spec.option_class)
        .filter(|c| c.days_to_expiry >= spec.min_days && c.days_to_expiry <= spec.max_days)
        .cloned()
        .collect();
    let considered = in_window.len();

    let evaluated = processor::evaluate_contracts(&in_window, spot, spec);

    let target = effective_target_delta(spec);
    let lower = target - spec.delta_tolerance;
    let upper = target + spec.delta_tolerance;

    info!(
        symbol = %spec.symbol,
        class = spec.option_class.as_str(),
        lower,
        upper,
        min_roc = spec.min_roc_pct,
        "applying delta window and ROC filter"
    );

    let mut matches: Vec<EvaluatedContract> = evaluated
        .into_iter()
        .filter(|c| c.delta >= lower && c.delta <= upper && c.roc >= spec.min_roc_pct)
        .collect();

    // Stable sort: equal ROC keeps the incoming chain order.
    matches.sort_by(|a, b| b.roc.partial_cmp(&a.roc).unwrap_or(Ordering::Equal));

    debug!(considered, matched = matches.len(), "scan complete");

    Ok(ScanOutcome { matches, considered })
}
