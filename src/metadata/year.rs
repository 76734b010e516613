use tracing::warn;

/// True for a trimmed plain year of one to four digits, or an ISO date
/// `YYYY-MM` / `YYYY-MM-DD` with a four-digit year.
pub fn is_valid_year(value: &str) -> bool {
    let v = value.trim();
    let all_digits = |s: &str, len: usize| s.len() == len && s.bytes().all(|b| b.is_ascii_digit());
    let in_range = |s: &str, max: u8| s.parse::<u8>().is_ok_and(|n| (1..=max).contains(&n));

    let mut parts = v.split('-');
    let year = parts.next().unwrap_or_default();
    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => {
            (1..=4).contains(&year.len()) && year.bytes().all(|b| b.is_ascii_digit())
        }
        (Some(month), day, None) => {
            all_digits(year, 4)
                && all_digits(month, 2)
                && in_range(month, 12)
                && day.is_none_or(|d| all_digits(d, 2) && in_range(d, 31))
        }
        _ => false,
    }
}

/// Turn the year typed by the operator into the string stored in the tag.
///
/// A blank field is stored blank. Anything else that is not a valid year or
/// date is replaced by `fallback`.
pub fn coerce_year(value: &str, fallback: &str) -> String {
    let v = value.trim();
    if v.is_empty() || is_valid_year(v) {
        return v.to_string();
    }
    warn!(year = %value, fallback, "year is not usable, writing fallback");
    fallback.to_string()
}
