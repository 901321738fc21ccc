//! Live input formatting for the payment form.
//!
//! Applied on every keystroke: the stored value is always the display form,
//! and validation counts digits, ignoring the grouping spaces and slash.

/// Card numbers are entered into a 19 character field: 16 digits, 3 spaces.
pub const MAX_CARD_DIGITS: usize = 16;

/// `MMYY`.
pub const MAX_EXPIRY_DIGITS: usize = 4;

pub const MAX_CVC_DIGITS: usize = 4;

/// Strip everything except ASCII digits.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn capped_digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Group the card digits in fours: `4242424242424242` → `4242 4242 4242 4242`.
#[must_use]
pub fn format_card_number(input: &str) -> String {
    let digits = capped_digits(input, MAX_CARD_DIGITS);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(digit);
    }
    out
}

/// Insert the `MM/YY` slash once a third digit is typed: `1227` → `12/27`.
#[must_use]
pub fn format_expiry(input: &str) -> String {
    let digits = capped_digits(input, MAX_EXPIRY_DIGITS);
    match digits.split_at_checked(2) {
        Some((month, year)) if !year.is_empty() => format!("{month}/{year}"),
        _ => digits,
    }
}

#[must_use]
pub fn format_cvc(input: &str) -> String {
    capped_digits(input, MAX_CVC_DIGITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_card_number_groups_in_fours() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("4242 42"), "4242 42");
        assert_eq!(format_card_number("42424"), "4242 4");
        assert_eq!(format_card_number("4242"), "4242");
        assert_eq!(format_card_number(""), "");
    }

    #[test]
    fn test_format_card_number_strips_and_caps() {
        assert_eq!(
            format_card_number("4242-4242-4242-4242-9999"),
            "4242 4242 4242 4242"
        );
        assert_eq!(format_card_number("abcd"), "");
    }

    #[test]
    fn test_format_is_stable_when_reapplied() {
        let once = format_card_number("5555555555554444");
        assert_eq!(format_card_number(&once), once);

        let expiry = format_expiry("0828");
        assert_eq!(format_expiry(&expiry), expiry);
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12");
        assert_eq!(format_expiry("123"), "12/3");
        assert_eq!(format_expiry("1227"), "12/27");
        assert_eq!(format_expiry("12/27"), "12/27");
        assert_eq!(format_expiry("122799"), "12/27");
    }

    #[test]
    fn test_format_cvc() {
        assert_eq!(format_cvc("12a3"), "123");
        assert_eq!(format_cvc("123456"), "1234");
    }

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("4242 4242 4242 4"), "4242424242424");
    }
}
