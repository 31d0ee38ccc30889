//! Money and percentage rendering shared by every display surface.

use serde::{Deserialize, Serialize};

/// Shown in place of a zero amount, whether it was entered or never set.
pub const EMPTY_AMOUNT: &str = "—";

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

/// How amounts are rendered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoneyFormat {
    pub currency: CurrencyCode,
    pub grouping_separator: char,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            grouping_separator: ',',
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "BRL" => "R$".into(),
        "AUD" => "A$".into(),
        _ => format!("{code} "),
    }
}

/// Whole-unit currency string, or [`EMPTY_AMOUNT`] for exactly zero.
pub fn format_money(amount: f64, format: &MoneyFormat) -> String {
    if amount == 0.0 {
        return EMPTY_AMOUNT.to_string();
    }
    // Halves round away from zero, as currency amounts do.
    let rounded = format!("{:.0}", amount.abs().round());
    let grouped = group_digits(&rounded, format.grouping_separator);
    let sign = if amount < 0.0 && rounded != "0" { "-" } else { "" };
    format!("{}{}{}", sign, format.currency.symbol(), grouped)
}

pub fn format_percent(value: i64) -> String {
    format!("{value}%")
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_renders_as_dash() {
        assert_eq!(format_money(0.0, &MoneyFormat::default()), "—");
        assert_eq!(format_money(-0.0, &MoneyFormat::default()), "—");
    }

    #[test]
    fn amounts_are_grouped_without_decimals() {
        let format = MoneyFormat::default();
        assert_eq!(format_money(150_000.0, &format), "$150,000");
        assert_eq!(format_money(999.4, &format), "$999");
        assert_eq!(format_money(-1_234_567.0, &format), "-$1,234,567");
    }

    #[test]
    fn separator_and_currency_follow_format() {
        let format = MoneyFormat {
            currency: CurrencyCode::new("eur"),
            grouping_separator: '.',
        };
        assert_eq!(format_money(2_500.0, &format), "€2.500");

        let chf = MoneyFormat {
            currency: CurrencyCode::new("CHF"),
            grouping_separator: '\'',
        };
        assert_eq!(format_money(12_000.0, &chf), "CHF 12'000");
    }

    #[test]
    fn tiny_amounts_do_not_render_negative_zero() {
        assert_eq!(format_money(-0.2, &MoneyFormat::default()), "$0");
    }

    #[test]
    fn halves_round_away_from_zero() {
        let format = MoneyFormat::default();
        assert_eq!(format_money(2.5, &format), "$3");
        assert_eq!(format_money(1_000.5, &format), "$1,001");
        assert_eq!(format_money(-2.5, &format), "-$3");
        assert_eq!(format_money(0.49, &format), "$0");
    }

    #[test]
    fn percent_suffix() {
        assert_eq!(format_percent(60), "60%");
    }
}
