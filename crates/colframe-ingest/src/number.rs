//! Floating-point literal parsing for numeric lanes.
//!
//! Accepts the JVM `Double.parseDouble` grammar rather than Rust's `f64::from_str`:
//! - surrounding ASCII control/space characters are ignored,
//! - `NaN` and `Infinity` are the only special spellings (case-sensitive, optional sign),
//! - a trailing `f`/`F`/`d`/`D` type suffix is allowed,
//! - hexadecimal literals such as `0x1.8p3` are accepted (the binary exponent is required).

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum NumberError {
    #[error("empty numeric field")]
    Empty,
    #[error("not a floating-point literal")]
    Syntax,
}

pub(crate) fn parse_f64(raw: &str) -> Result<f64, NumberError> {
    let s = raw.trim_matches(|c: char| c <= ' ');
    if s.is_empty() {
        return Err(NumberError::Empty);
    }

    let (negative, body) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let magnitude = match body {
        "NaN" => return Ok(f64::NAN),
        "Infinity" => f64::INFINITY,
        _ => {
            let body = body.strip_suffix(['f', 'F', 'd', 'D']).unwrap_or(body);
            let parsed = match body.get(..2) {
                Some("0x" | "0X") => parse_hex(&body[2..]),
                _ => parse_decimal(body),
            };
            parsed.ok_or(NumberError::Syntax)?
        }
    };

    Ok(if negative { -magnitude } else { magnitude })
}

fn parse_decimal(body: &str) -> Option<f64> {
    // `f64::from_str` also takes `inf`/`nan` and a second leading sign; neither is valid here.
    let starts_with_digit_or_dot = body
        .bytes()
        .next()
        .is_some_and(|b| b.is_ascii_digit() || b == b'.');
    let allowed = body
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !starts_with_digit_or_dot || !allowed {
        return None;
    }
    body.parse().ok()
}

fn parse_hex(body: &str) -> Option<f64> {
    let (mantissa, exponent) = body.split_once(['p', 'P'])?;
    let mut exponent = parse_binary_exponent(exponent)?;
    let (int_digits, frac_digits) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    // Keep up to 124 significant bits; the rest cannot change an f64.
    let mut bits: u128 = 0;
    for ch in int_digits.chars() {
        let digit = ch.to_digit(16)?;
        if bits >> 124 == 0 {
            bits = (bits << 4) | u128::from(digit);
        } else {
            exponent += 4;
        }
    }
    for ch in frac_digits.chars() {
        let digit = ch.to_digit(16)?;
        if bits >> 124 == 0 {
            bits = (bits << 4) | u128::from(digit);
            exponent -= 4;
        }
    }

    Some(scale_by_pow2(bits as f64, exponent))
}

fn parse_binary_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // All-digit input only fails to parse on overflow; anything that large saturates anyway.
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX).min(1 << 20);
    Some(if negative { -magnitude } else { magnitude })
}

fn scale_by_pow2(mut value: f64, mut exponent: i64) -> f64 {
    const STEP: i64 = 1000;
    while exponent > STEP && value.is_finite() {
        value *= 2f64.powi(STEP as i32);
        exponent -= STEP;
    }
    while exponent < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP as i32);
        exponent += STEP;
    }
    value * 2f64.powi(exponent.clamp(-2 * STEP, 2 * STEP) as i32)
}
