//! Punycode ([RFC 3492](https://tools.ietf.org/html/rfc3492)) for single domain labels.
//!
//! Unlike a raw Bootstring codec, the functions here deal in whole labels:
//! [`punycode_encode`] adds the `xn--` marker and leaves all-ASCII labels
//! untouched, and [`punycode_decode`] passes through anything without the marker.

use crate::error::UrlError;

const BASE: u32 = 36;
const T_MIN: u32 = 1;
const T_MAX: u32 = 26;
const SKEW: u32 = 38;
const DAMP: u32 = 700;
const INITIAL_BIAS: u32 = 72;
const INITIAL_N: u32 = 0x80;
const DELIMITER: char = '-';

/// Prefix marking an ASCII-compatible encoded label.
pub const ACE_PREFIX: &str = "xn--";

/// Bias adaptation after each encoded delta.
pub fn adapt(mut delta: u32, num_points: u32, first_time: bool) -> u32 {
    delta /= if first_time { DAMP } else { 2 };
    delta += delta / num_points;
    let mut k = 0;
    while delta > ((BASE - T_MIN) * T_MAX) / 2 {
        delta /= BASE - T_MIN;
        k += BASE;
    }
    k + (((BASE - T_MIN + 1) * delta) / (delta + SKEW))
}

#[inline]
fn threshold(k: u32, bias: u32) -> u32 {
    if k <= bias {
        T_MIN
    } else if k >= bias + T_MAX {
        T_MAX
    } else {
        k - bias
    }
}

#[inline]
fn value_to_digit(value: u32) -> char {
    match value {
        0..=25 => (b'a' + value as u8) as char,
        // Callers only pass values below BASE.
        _ => (b'0' + (value - 26) as u8) as char,
    }
}

#[inline]
fn digit_to_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32 + 26),
        b'A'..=b'Z' => Some((byte - b'A') as u32),
        b'a'..=b'z' => Some((byte - b'a') as u32),
        _ => None,
    }
}

/// Whether `label` starts with the `xn--` marker, ignoring ASCII case.
pub fn has_ace_prefix(label: &str) -> bool {
    label.len() >= ACE_PREFIX.len()
        && label.as_bytes()[..ACE_PREFIX.len()].eq_ignore_ascii_case(ACE_PREFIX.as_bytes())
}

/// Encode a Unicode label as `xn--` punycode.
///
/// Labels made only of ASCII are returned unchanged, without the marker.
///
/// # Examples
///
/// ```
/// use weburl::punycode_encode;
///
/// assert_eq!(punycode_encode("bücher").unwrap(), "xn--bcher-kva");
/// assert_eq!(punycode_encode("☃").unwrap(), "xn--n3h");
/// assert_eq!(punycode_encode("example").unwrap(), "example");
/// ```
pub fn punycode_encode(label: &str) -> Result<String, UrlError> {
    if label.is_ascii() {
        return Ok(label.to_string());
    }

    let input: Vec<u32> = label.chars().map(|c| c as u32).collect();
    let mut output = String::with_capacity(ACE_PREFIX.len() + label.len() * 2);
    output.push_str(ACE_PREFIX);

    let mut basic_length = 0u32;
    for &c in &input {
        if c < INITIAL_N {
            output.push(c as u8 as char);
            basic_length += 1;
        }
    }
    if basic_length > 0 {
        output.push(DELIMITER);
    }

    let input_length = input.len() as u32;
    let mut code_point = INITIAL_N;
    let mut delta: u32 = 0;
    let mut bias = INITIAL_BIAS;
    let mut processed = basic_length;

    while processed < input_length {
        // At least one unprocessed code point is >= code_point here.
        let min_code_point = input
            .iter()
            .copied()
            .filter(|&c| c >= code_point)
            .min()
            .ok_or(UrlError::PunycodeOverflow)?;

        let step = (min_code_point - code_point)
            .checked_mul(processed + 1)
            .ok_or(UrlError::PunycodeOverflow)?;
        delta = delta.checked_add(step).ok_or(UrlError::PunycodeOverflow)?;
        code_point = min_code_point;

        for &c in &input {
            if c < code_point {
                delta = delta.checked_add(1).ok_or(UrlError::PunycodeOverflow)?;
            }
            if c == code_point {
                let mut q = delta;
                let mut k = BASE;
                loop {
                    let t = threshold(k, bias);
                    if q < t {
                        break;
                    }
                    output.push(value_to_digit(t + (q - t) % (BASE - t)));
                    q = (q - t) / (BASE - t);
                    k += BASE;
                }
                output.push(value_to_digit(q));
                bias = adapt(delta, processed + 1, processed == basic_length);
                delta = 0;
                processed += 1;
            }
        }

        delta = delta.checked_add(1).ok_or(UrlError::PunycodeOverflow)?;
        code_point += 1;
    }

    Ok(output)
}

/// Decode an `xn--` label back to Unicode.
///
/// Labels without the marker are returned unchanged.
///
/// # Examples
///
/// ```
/// use weburl::punycode_decode;
///
/// assert_eq!(punycode_decode("xn--bcher-kva").unwrap(), "bücher");
/// assert_eq!(punycode_decode("example").unwrap(), "example");
/// ```
pub fn punycode_decode(label: &str) -> Result<String, UrlError> {
    if !has_ace_prefix(label) {
        return Ok(label.to_string());
    }
    let encoded = &label[ACE_PREFIX.len()..];
    let invalid = || UrlError::InvalidPunycode(label.to_string());

    let (basic, extended) = match encoded.rfind(DELIMITER) {
        Some(position) => (&encoded[..position], &encoded[position + 1..]),
        None => ("", encoded),
    };
    if !basic.is_ascii() {
        return Err(invalid());
    }

    let mut output: Vec<char> = basic.chars().collect();
    let mut code_point = INITIAL_N;
    let mut bias = INITIAL_BIAS;
    let mut i: u32 = 0;
    let mut bytes = extended.bytes();

    while let Some(first) = bytes.next() {
        let previous_i = i;
        let mut weight: u32 = 1;
        let mut k = BASE;
        let mut byte = first;
        loop {
            let digit = digit_to_value(byte).ok_or_else(invalid)?;
            let scaled = digit.checked_mul(weight).ok_or(UrlError::PunycodeOverflow)?;
            i = i.checked_add(scaled).ok_or(UrlError::PunycodeOverflow)?;
            let t = threshold(k, bias);
            if digit < t {
                break;
            }
            weight = weight
                .checked_mul(BASE - t)
                .ok_or(UrlError::PunycodeOverflow)?;
            k += BASE;
            byte = bytes.next().ok_or_else(invalid)?;
        }

        let length = output.len() as u32 + 1;
        bias = adapt(i - previous_i, length, previous_i == 0);
        code_point = code_point
            .checked_add(i / length)
            .ok_or(UrlError::PunycodeOverflow)?;
        i %= length;
        let c = char::from_u32(code_point).ok_or_else(invalid)?;
        output.insert(i as usize, c);
        i += 1;
    }

    Ok(output.into_iter().collect())
}
