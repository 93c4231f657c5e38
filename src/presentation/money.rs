/// Round to a whole amount, group thousands with spaces and append the
/// currency: `1234567.8` → `1 234 568 Ar`.
pub fn format_money(amount: f64, currency: &str) -> String {
    if !amount.is_finite() {
        return format!("{amount} {currency}");
    }
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if currency.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped} {currency}")
    }
}

/// Same as [`format_money`] with an explicit `+` on non-negative amounts.
pub fn format_signed_money(amount: f64, currency: &str) -> String {
    if amount.round() >= 0.0 {
        format!("+{}", format_money(amount, currency))
    } else {
        format_money(amount, currency)
    }
}
