use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Number(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_string())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

pub fn parse_value(raw: Option<&RawValue>) -> f64 {
    match raw {
        None => 0.0,
        Some(RawValue::Number(v)) if v.is_finite() => *v,
        Some(RawValue::Number(_)) => 0.0,
        Some(RawValue::Text(s)) => parse_text(s),
    }
}

/// Separator rules:
/// - both `.` and `,` present: whichever comes last is the decimal mark, the other is
///   a thousands separator (`"1.670.000,00"` and `"1,670,000.00"` are both 1670000.0);
/// - only `,`: a single comma is the decimal mark (`"45,3"` is 45.3), several commas
///   are thousands separators;
/// - only `.`: a two-digit last group is the decimal part (`"12.00"`, `"1.670.000.00"`),
///   anything else is thousands grouping (`"1.234"` is 1234, `"12.5"` is 125).
///
/// A trailing `m`/`k` multiplies by 1e6/1e3; currency symbols, `%` and spaces are ignored.
pub fn parse_text(raw: &str) -> f64 {
    let lowered = raw.trim().to_lowercase();
    let mut s: String = lowered
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '€' | '$' | '£' | '%'))
        .collect();
    if s.is_empty() || s == "-" {
        return 0.0;
    }

    let mut multiplier = 1.0;
    if let Some(stripped) = s.strip_suffix('m') {
        multiplier = 1_000_000.0;
        s = stripped.to_string();
    } else if let Some(stripped) = s.strip_suffix('k') {
        multiplier = 1_000.0;
        s = stripped.to_string();
    }

    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s.as_str()),
    };
    if digits.is_empty()
        || !digits
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return 0.0;
    }

    let Some(canonical) = canonical_decimal(digits) else {
        return 0.0;
    };
    match canonical.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            let v = v * multiplier;
            if negative { -v } else { v }
        }
        _ => 0.0,
    }
}

// Rewrites the digit/separator body into a plain `123.45` form.
fn canonical_decimal(body: &str) -> Option<String> {
    let last_dot = body.rfind('.');
    let last_comma = body.rfind(',');
    let out = match (last_dot, last_comma) {
        (Some(d), Some(c)) => {
            if c > d {
                body.replace('.', "").replace(',', ".")
            } else {
                body.replace(',', "")
            }
        }
        (None, Some(_)) => {
            if body.matches(',').count() == 1 {
                body.replace(',', ".")
            } else {
                body.replace(',', "")
            }
        }
        (Some(_), None) => dot_only(body),
        (None, None) => body.to_string(),
    };
    if out.is_empty() || out.matches('.').count() > 1 {
        return None;
    }
    Some(out)
}

fn dot_only(body: &str) -> String {
    match body.rsplit_once('.') {
        Some((whole, frac)) if frac.len() == 2 => format!("{}.{}", whole.replace('.', ""), frac),
        _ => body.replace('.', ""),
    }
}
