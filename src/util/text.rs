use std::{collections::HashSet, str::FromStr};

use rust_decimal::Decimal;

/// 報價文字中常見、解析數字前要移除的字元（千分位、空白、換行）
const NUMBER_ESCAPE_CHAR: &[char] = &[',', ' ', '\u{a0}', '"', '\n', '\r', '\t'];

/// Parses a decimal value from a given string.
///
/// This function accepts a string representation of a decimal number,
/// potentially containing commas as thousands separators and other escape characters,
/// and attempts to convert it into a `Decimal` without going through floating point.
///
/// # Arguments
///
/// * `s`: A string slice containing the representation of a decimal number
///   that may include commas as thousands separators and other escape characters.
/// * `escape_chars`: Optional characters to be removed from the input string
///   in addition to the default ones.
///
/// # Returns
///
/// * `Result<Decimal, rust_decimal::Error>`: The parsed `Decimal` value if successful,
///   or the parse error if the cleaned text is not a number.
///
/// # Example
///
/// ```
/// let decimal_value = parse_decimal("1,234.56", None).unwrap();
/// assert_eq!(decimal_value, dec!(1234.56));
/// ```
pub fn parse_decimal(s: &str, escape_chars: Option<Vec<char>>) -> Result<Decimal, rust_decimal::Error> {
    let cleaned = clean_escape_chars(s, escape_chars);
    Decimal::from_str(&cleaned)
}

pub(crate) fn clean_escape_chars(s: &str, escape_chars: Option<Vec<char>>) -> String {
    let mut combined: Vec<char> = NUMBER_ESCAPE_CHAR.to_vec();
    if let Some(ec) = escape_chars {
        combined.extend(ec);
    }

    let filters = combined.iter().collect::<HashSet<_>>();
    s.chars().filter(|c| !filters.contains(c)).collect()
}
