use statrs::distribution::{ContinuousCDF, Normal};

use crate::models::OptionClass;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    let normal = Normal::new(0.0, 1.0).unwrap();
    normal.cdf(x)
}

/// Black-Scholes d1 term
pub fn d1(spot: f64, strike: f64, time_years: f64, rate: f64, vol: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time_years) / (vol * time_years.sqrt())
}

/// Theoretical delta from market implied volatility.
///
/// Call delta lies in [0, 1], put delta in [-1, 0]. A contract with no
/// time value or no volatility has no meaningful sensitivity under this
/// model, so degenerate inputs return 0.0 instead of failing. Extreme
/// volatility is allowed through; the CDF saturates near 0/1.
pub fn bs_delta(
    spot: f64,
    strike: f64,
    time_years: f64,
    rate: f64,
    vol: f64,
    option_class: OptionClass,
) -> f64 {
    if time_years <= 0.0 || vol <= 0.0 {
        return 0.0;
    }

    let d1 = d1(spot, strike, time_years, rate, vol);

    match option_class {
        OptionClass::Call => norm_cdf(d1),
        OptionClass::Put => norm_cdf(d1) - 1.0,
    }
}
