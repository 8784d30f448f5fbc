//! Projected-return calculator.

/// Projected outcome of deploying `amount` soldiers into a market whose
/// current status is `market_status` percent (signed, may be negative).
///
/// Rounds half-up to the nearest whole soldier: `(50, -15.0)` gives 43.
/// Callers pass the market status explicitly; this function never reads
/// shared economy state. The minimum-deployment rule is enforced by the
/// action validator, not here.
#[must_use]
pub fn potential_return(amount: u32, market_status: f64) -> i64 {
    (f64::from(amount) * (100.0 + market_status) / 100.0).round() as i64
}
