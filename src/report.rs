use anyhow::Result;
use colored::Colorize;

use crate::models::{EvaluatedContract, ScanSpec};

/// Print the ranked match table. This is the presentation boundary:
/// delta shows 3 decimals, ROC and price 2. Internal filtering already
/// happened on the unrounded values.
pub fn print_matches(matches: &[EvaluatedContract]) {
    let header = format!(
        "{:<24} {:<12} {:>9} {:>9} {:>8} {:>8} {:>9} {:>9} {:>9}",
        "Contract", "Expiry", "Strike", "Price", "ROC %", "Delta", "IV", "Volume", "OpenInt"
    );
    println!("{}", header.bold());

    for m in matches {
        println!(
            "{:<24} {:<12} {:>9.2} {:>9.2} {:>8.2} {:>8.3} {:>9.4} {:>9} {:>9}",
            m.base.contract_symbol,
            m.base.expiration_date,
            m.base.strike,
            m.price,
            m.roc,
            m.delta,
            m.base.implied_volatility,
            m.base.volume,
            m.base.open_interest,
        );
    }
}

/// CSV body for the match table, same columns and rounding as the console.
pub fn build_csv(matches: &[EvaluatedContract]) -> String {
    let mut out = String::from(
        "contractSymbol,expirationDate,strike,price,roc,delta,impliedVolatility,volume,openInterest\n",
    );

    for m in matches {
        out.push_str(&format!(
            "{},{},{},{:.2},{:.2},{:.3},{},{},{}\n",
            m.base.contract_symbol,
            m.base.expiration_date,
            m.base.strike,
            m.price,
            m.roc,
            m.delta,
            m.base.implied_volatility,
            m.base.volume,
            m.base.open_interest,
        ));
    }

    out
}

/// Save matches next to the working directory, named after the scan,
/// e.g. `AAPL_put_options.csv`. Returns the filename written.
pub fn save_csv(spec: &ScanSpec, matches: &[EvaluatedContract]) -> Result<String> {
    let filename = format!("{}_{}_options.csv", spec.symbol, spec.option_class.as_str());
    std::fs::write(&filename, build_csv(matches))?;
    Ok(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Contract, OptionClass};

    fn evaluated() -> EvaluatedContract {
        EvaluatedContract {
            base: Contract {
                contract_symbol: "AAPL260904P00100000".to_string(),
                option_class: OptionClass::Put,
                expiration_date: "2026-09-04".to_string(),
                days_to_expiry: 30,
                strike: 100.0,
                bid: 3.0,
                ask: 3.2,
                last_price: 2.8,
                implied_volatility: 0.25,
                volume: 42,
                open_interest: 1200,
            },
            price: 3.1,
            time_years: 30.0 / 365.0,
            delta: -0.29913,
            roc: 3.1,
        }
    }

    #[test]
    fn test_csv_rounds_display_fields() {
        let csv = build_csv(&[evaluated()]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "contractSymbol,expirationDate,strike,price,roc,delta,impliedVolatility,volume,openInterest"
        );
        assert_eq!(
            lines.next().unwrap(),
            "AAPL260904P00100000,2026-09-04,100,3.10,3.10,-0.299,0.25,42,1200"
        );
        assert!(lines.next().is_none());
    }
}
