use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Renders an amount in minor units as a two-decimal string with a currency
/// suffix, e.g. `2500, "USD"` → `"25.00 USD"`.
#[must_use]
pub fn format_minor_units(amount: i64, currency: &str) -> String {
    let major = Decimal::new(amount, 2);
    format!("{major:.2} {currency}")
}

/// Converts a decimal price string such as `"25.00"` into minor units.
///
/// Returns `None` for anything that does not parse as a decimal or does not
/// fit in an `i64` once scaled.
#[must_use]
pub fn parse_decimal_to_minor_units(raw: &str) -> Option<i64> {
    let value: Decimal = raw.trim().parse().ok()?;
    let scaled = value.checked_mul(Decimal::ONE_HUNDRED)?.round();
    scaled.to_i64()
}
