use serde_json::Value;

/// Coerce a raw field to a definite number.
///
/// Absent, `null` and empty values become `0.0`. Strings are read up to the
/// longest leading decimal literal, so `"12 pts"` is `12.0` and `"N/A"` is
/// `0.0`. The result is always finite.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => parse_leading_float(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce a raw score field to a goal count.
///
/// Strings must be a number as a whole once trimmed: `"3 goals"` is 0, not
/// 3. Negative values clamp to zero and fractions are truncated.
pub fn to_goals(value: Option<&Value>) -> u32 {
    // `as` saturates, so huge values pin to u32::MAX.
    to_whole_number(value).max(0.0) as u32
}

/// Coerce a raw field that must be numeric in its entirety.
///
/// Absent, `null` and blank values become `0.0`, as does any string with
/// trailing garbage. The result is always finite.
pub fn to_whole_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Some(Value::String(s)) => match s.trim() {
            "" => 0.0,
            trimmed => trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
        },
        _ => 0.0,
    }
}

/// Render an identifying field (team, season, result code) as text.
///
/// Numbers are kept in their JSON spelling. Anything else yields `None`.
pub fn to_label(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Whether a raw value looks like a number.
///
/// Strings accept a decimal comma (`"1,5"`).
pub fn is_numeric_like(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
        Value::String(s) if !s.is_empty() => parse_leading_float(&s.replacen(',', ".", 1)).is_some(),
        _ => false,
    }
}

/// Parse the longest prefix of `text` (after leading whitespace) that forms
/// a decimal floating point literal.
pub(crate) fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_digits = digits_from(end + 1 + sign);
        if exp_digits > 0 {
            end += 1 + sign + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
