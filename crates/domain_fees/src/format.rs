//! Display helpers for ledger values

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{Amount, Currency, Rate};

/// Date rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateStyle {
    /// `15 Jan 2024`
    #[default]
    Short,
    /// `Monday, 15 January 2024`
    Long,
}

/// Formats an amount with the currency symbol and thousands separators
pub fn format_amount(amount: Amount, currency: Currency) -> String {
    amount.in_currency(currency).to_string()
}

/// Formats a rate as a percentage with one decimal place
pub fn format_percent(rate: Rate) -> String {
    rate.to_string()
}

pub fn format_date(date: NaiveDate, style: DateStyle) -> String {
    match style {
        DateStyle::Short => date.format("%d %b %Y").to_string(),
        DateStyle::Long => date.format("%A, %d %B %Y").to_string(),
    }
}

/// Uppercased first letters of the first two words of `name`
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Uppercases the first letter of each word and lowercases the rest
///
/// Runs of whitespace collapse to a single space.
pub fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Amount::new(1_250_000), Currency::NGN), "₦1,250,000");
        assert_eq!(format_amount(Amount::new(950), Currency::NGN), "₦950");
        assert_eq!(format_amount(Amount::new(-5_000), Currency::NGN), "-₦5,000");
        assert_eq!(format_amount(Amount::ZERO, Currency::NGN), "₦0");
    }

    #[test]
    fn test_format_percent() {
        let rate = Rate::ratio(Amount::new(75_000), Amount::new(135_000));
        assert_eq!(format_percent(rate), "55.6%");
        assert_eq!(format_percent(Rate::ZERO), "0.0%");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(format_date(date, DateStyle::Short), "15 Jan 2024");
        assert_eq!(format_date(date, DateStyle::Long), "Monday, 15 January 2024");
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Ahmed Ibrahim"), "AI");
        assert_eq!(initials("fatima zahra abubakar"), "FZ");
        assert_eq!(initials("  Musa  "), "M");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("aMINA   yusuf"), "Amina Yusuf");
        assert_eq!(capitalize_words("jss 1a"), "Jss 1a");
        assert_eq!(capitalize_words(""), "");
    }
}
