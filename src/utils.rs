/// Formats a value with `,` thousands separators and no decimals.
pub fn fmt_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "—".to_owned();
    }
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Formats a percentage with two decimals, e.g. `41.42%`.
pub fn fmt_pct(value: f64) -> String {
    format!("{value:.2}%")
}
