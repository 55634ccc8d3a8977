use std::time::{Duration, Instant};
use tracing::info;

/// A simple wall-clock timer for logging elapsed time.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        info!("⏱  Starting: {}", label);
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(
            "⏱  Finished: {} (took {:.2?})",
            self.label,
            self.start.elapsed()
        );
    }
}

/// Format an amount as a currency string with thousands separators and
/// two fixed decimals. 1643690.9 → "$1,643,690.90"
pub fn fmt_currency(symbol: &str, amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as i64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::new();
    for (i, ch) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let grouped: String = grouped.chars().rev().collect();

    format!(
        "{}{}{}.{:02}",
        if negative { "-" } else { "" },
        symbol,
        grouped,
        frac
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_currency() {
        assert_eq!(fmt_currency("$", 1_643_690.9), "$1,643,690.90");
        assert_eq!(fmt_currency("$", 0.0), "$0.00");
        assert_eq!(fmt_currency("$", 999.999), "$1,000.00");
        assert_eq!(fmt_currency("$", -42_000.5), "-$42,000.50");
        assert_eq!(fmt_currency("€", 50.0), "€50.00");
    }
}
