use crate::models::progress::CURRENCY_SYMBOL;

/// Group the integer part with commas and keep up to three decimals,
/// dropping trailing zeros: `2500000.0` -> `2,500,000`, `1234.5` -> `1,234.5`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if amount < 0.0 && (whole != "0" || !fraction.is_empty()) { "-" } else { "" };

    if fraction.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction)
    }
}

pub fn format_naira(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, format_amount(amount))
}

/// Text progress bar for embeds, `width` cells wide
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
