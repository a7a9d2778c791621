//! Exponent-safe numeric formatting.
//!
//! Bayes factors are held on the natural-log scale precisely because the
//! linear-scale value can overflow or underflow f64. `exp_string` turns a
//! log-scale magnitude into a display string, switching to a manually
//! constructed scientific notation outside the representable range.
//!
//! Formatting never fails: not-a-number input degrades to the `"NA"`
//! sentinel rather than an error.

use std::f64::consts::LN_10;

/// Options for the pretty printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Significant digits kept in the mantissa
    pub mantissa_digits: usize,
    /// Extra character count charged to the scientific rendering when
    /// comparing lengths, biasing the choice toward plain decimal
    pub sci_penalty: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            mantissa_digits: 7,
            sci_penalty: 0,
        }
    }
}

impl FormatOptions {
    /// Builder: set the mantissa digit count.
    pub fn mantissa_digits(mut self, digits: usize) -> Self {
        self.mantissa_digits = digits;
        self
    }

    /// Builder: set the scientific-notation length penalty.
    pub fn sci_penalty(mut self, penalty: usize) -> Self {
        self.sci_penalty = penalty;
        self
    }
}

/// Format `exp(x)` for a natural-log-scale magnitude `x`.
///
/// Values whose exponential leaves f64 range are rendered in scientific
/// notation built directly from the base-10 logarithm, so a Bayes factor
/// of e.g. `e^1000` still displays as `1.968419e+434`.
pub fn exp_string(x: f64, opts: &FormatOptions) -> String {
    if x.is_nan() {
        return "NA".to_string();
    }
    if x == f64::INFINITY {
        return "Inf".to_string();
    }
    if x == f64::NEG_INFINITY {
        return pretty(0.0, opts);
    }

    let log10 = x / LN_10;

    if x > f64::MAX.ln() {
        let exponent = log10.floor();
        let mantissa = 10f64.powf(log10 - exponent);
        format!("{}e+{}", pretty(mantissa, opts), exponent as i64)
    } else if x < f64::MIN_POSITIVE.ln() {
        let exponent = log10.ceil() - 1.0;
        let mantissa = 10f64.powf(1.0 - (log10.ceil() - log10));
        format!("{}e{}", pretty(mantissa, opts), exponent as i64)
    } else {
        pretty(x.exp(), opts)
    }
}

/// Pretty-print a finite value, choosing between plain decimal and
/// exponential notation by rendered length. Ties favor plain decimal;
/// `sci_penalty` handicaps the exponential rendering.
pub fn pretty(v: f64, opts: &FormatOptions) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }

    let plain = plain_string(v, opts.mantissa_digits);
    let sci = sci_string(v, opts.mantissa_digits);
    if sci.len() + opts.sci_penalty < plain.len() {
        sci
    } else {
        plain
    }
}

/// Render an error fraction in 0..1 as a percentage string.
///
/// Keeps two significant digits relative to the percentage's order of
/// magnitude: fractional percentages keep digits below the decimal
/// point, large ones round away sub-integer noise. Rounding shifts the
/// decimal point, rounds to nearest, and shifts back, so the string
/// never shows binary floating-point artifacts.
pub fn percent_string(e: f64) -> String {
    if e.is_nan() {
        return "NA".to_string();
    }
    if e == 0.0 {
        return "0%".to_string();
    }

    let perc = e * 100.0;
    let order = perc.abs().log10().floor() as i32;
    let digits = 1 - order;
    let rounded = round_shifted(perc, digits);

    if digits > 0 {
        format!("{:.*}%", digits as usize, rounded)
    } else {
        format!("{}%", rounded)
    }
}

/// Round keeping `digits` places after the decimal point (negative
/// rounds above it) via decimal-point-shifted `round()`.
fn round_shifted(v: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (v * scale).round() / scale
}

/// Plain decimal with the requested significant digits, trailing zeros
/// trimmed.
fn plain_string(v: f64, digits: usize) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let order = v.abs().log10().floor() as i32;
    let decimals = (digits as i32 - 1 - order).max(0) as usize;
    trim_trailing_zeros(format!("{:.*}", decimals, v))
}

/// Exponential rendering with a trimmed mantissa, e.g. `1.234e-6`.
fn sci_string(v: f64, digits: usize) -> String {
    let s = format!("{:.*e}", digits.saturating_sub(1), v);
    match s.split_once('e') {
        Some((mantissa, exponent)) => {
            format!("{}e{}", trim_trailing_zeros(mantissa.to_string()), exponent)
        }
        None => s,
    }
}

fn trim_trailing_zeros(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}
