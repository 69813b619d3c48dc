use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// Two fraction digits with a comma separator, e.g. `4,50`.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}").replace('.', ",")
}

/// Calendar date as `DD/MM/YYYY`.
pub fn format_date(value: DateTime<Utc>) -> String {
    value.format("%d/%m/%Y").to_string()
}
