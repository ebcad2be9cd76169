//! Number formatting for labels and metric cards.

/// Integer with comma thousands separators: `1234567` -> `1,234,567`.
pub fn thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Fixed-point with `decimals` places and thousands separators.
pub fn grouped(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let mut out = String::with_capacity(formatted.len() + 4);
    if value.is_sign_negative() && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount with two decimals: `-1234.5` -> `-$1,234.50`.
pub fn currency(value: f64) -> String {
    let body = grouped(value, 2);
    match body.strip_prefix('-') {
        Some(abs) => format!("-${abs}"),
        None => format!("${body}"),
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
