//! # Number Presentation
//!
//! Significant-figure rounding and metric-prefix scaling shared by the quote
//! and pool formatters.

const PREFIXES: [&str; 4] = ["", "K", "M", "B"];

/// Rounds `x` to `sig` significant digits.
pub fn round_sig(x: f64, sig: u32) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let digits = sig as i32 - x.abs().log10().floor() as i32 - 1;
    round_to(x, digits)
}

/// Rounds `x` to `digits` decimal places; negative `digits` rounds to tens,
/// hundreds, and so on.
fn round_to(x: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits.abs());
    // Subnormal inputs need a scale beyond f64 range; leave them as they are
    if !factor.is_finite() {
        return x;
    }
    if digits >= 0 {
        (x * factor).round() / factor
    } else {
        (x / factor).round() * factor
    }
}

/// Renders a value without a trailing `.0` when it is integral.
pub fn plain(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        format!("{}", x)
    }
}

/// `round_sig` rendered for display: `1235`, `0.001235`, `200.5`.
pub fn format_sig(x: f64, sig: u32) -> String {
    plain(round_sig(x, sig))
}

/// Scales a magnitude with K/M/B suffixes: `1500` -> `1.5K`, `2500000` -> `2.5M`.
///
/// Only `[1, 10^12)` gets a prefix. Anything outside that range (except zero)
/// is printed with `sig` significant digits, scientific below `10^-3`.
pub fn to_metric_prefix(num: f64, sig: u32) -> String {
    let power = if num == 0.0 {
        0
    } else {
        num.abs().log10().floor() as i32
    };

    if !(0..12).contains(&power) {
        let precision = sig.saturating_sub(1) as usize;
        let rounded = round_sig(num, sig);
        return if power < -3 {
            format!("{:.*e}", precision, rounded)
        } else {
            format!("{:.*}", precision, rounded)
        };
    }

    let thousands = power / 3;
    let front = num / 10f64.powi(3 * thousands);
    // One decimal right at a prefix boundary (1.2K instead of 1K)
    let front = if power % 3 == 0 {
        round_to(front, 1)
    } else {
        front.round()
    };

    format!("{}{}", plain(front), PREFIXES[thousands as usize])
}

/// Mood emoji for an annualized return percentage.
pub fn to_emoji(percent: f64) -> &'static str {
    if percent > 15.0 {
        "🤑"
    } else if percent > 5.0 {
        "🤩"
    } else if percent > 0.0 {
        "🙂"
    } else if percent < -25.0 {
        "😱"
    } else if percent < -10.0 {
        "😨"
    } else {
        "🙃"
    }
}
