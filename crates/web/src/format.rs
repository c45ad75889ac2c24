//! Display formatting for table cells (en-US conventions).

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Short en-US date (`M/D/YYYY`); a missing date renders as an empty cell.
pub fn format_date(value: Option<DateTime<Utc>>) -> String {
    match value {
        Some(d) => format!("{}/{}/{}", d.month(), d.day(), d.year()),
        None => String::new(),
    }
}

/// USD currency with thousands separators and two decimals, e.g. `$1,234.50`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded < Decimal::ZERO;
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${grouped}.{cents}")
    } else {
        format!("${grouped}.{cents}")
    }
}

/// `$` followed by the shortest plain number, e.g. `$26` or `$10.5`.
pub fn format_plain_money(value: Decimal) -> String {
    format!("${}", value.normalize())
}

/// `$` followed by the value exactly as stored, e.g. `$10.50`.
pub fn format_stored_money(value: Decimal) -> String {
    format!("${value}")
}
