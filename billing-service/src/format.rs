use config_engine::BillingConfig;
use rust_decimal::Decimal;

use crate::calculation::round_money;

/// How amounts are shown on receipts and lists. Display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub locale: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "₹".to_string(),
            locale: "en-IN".to_string(),
        }
    }
}

impl From<&BillingConfig> for CurrencyFormat {
    fn from(config: &BillingConfig) -> Self {
        Self {
            symbol: config.currency_symbol.clone(),
            locale: config.currency_locale.clone(),
        }
    }
}

/// Format an amount with the currency symbol and locale grouping.
///
/// `en-IN` groups the last three digits and then pairs (`₹3,95,000`); other
/// locales group by thousands. Paise/cents are shown only when non-zero.
pub fn format_amount(amount: Decimal, format: &CurrencyFormat) -> String {
    let fixed = format!("{:.2}", round_money(amount.abs()));
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if format.locale.eq_ignore_ascii_case("en-IN") {
        group_indian(whole)
    } else {
        group_thousands(whole)
    };

    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    if fraction == "00" {
        format!("{sign}{}{grouped}", format.symbol)
    } else {
        format!("{sign}{}{grouped}.{fraction}", format.symbol)
    }
}

fn group_thousands(digits: &str) -> String {
    group_from_right(digits, 3, 3)
}

fn group_indian(digits: &str) -> String {
    group_from_right(digits, 3, 2)
}

// `first` digits in the rightmost group, `rest` in each group to its left.
fn group_from_right(digits: &str, first: usize, rest: usize) -> String {
    if digits.len() <= first {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - first);
    let mut groups = vec![tail];
    let mut remaining = head;
    while remaining.len() > rest {
        let (left, right) = remaining.split_at(remaining.len() - rest);
        groups.push(right);
        remaining = left;
    }
    groups.push(remaining);
    groups.reverse();
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_indian_grouping() {
        let inr = CurrencyFormat::default();
        assert_eq!(format_amount(dec!(395000), &inr), "₹3,95,000");
        assert_eq!(format_amount(dec!(9440), &inr), "₹9,440");
        assert_eq!(format_amount(dec!(500), &inr), "₹500");
        assert_eq!(format_amount(dec!(1234567.5), &inr), "₹12,34,567.50");
    }

    #[test]
    fn test_thousands_grouping() {
        let usd = CurrencyFormat {
            symbol: "$".to_string(),
            locale: "en-US".to_string(),
        };
        assert_eq!(format_amount(dec!(1234567.5), &usd), "$1,234,567.50");
        assert_eq!(format_amount(dec!(-42), &usd), "-$42");
        assert_eq!(format_amount(dec!(0), &usd), "$0");
    }
}
