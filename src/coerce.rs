//! Typed coercion rules, one set per source wire type.
//!
//! Every rule either stores a value in the slot or fails; nothing is ever
//! silently defaulted. Integers are carried through the rules as `i128`,
//! which holds every source value and every destination width, so a single
//! narrowing step does the range check for all of them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::destination::Slot;
use crate::error::{Result, ScanError};
use crate::value::Value;

// Same-representation pairs and `Value` destinations never get here, the
// fast path has already taken them.
pub(crate) fn coerce(src: &Value, slot: Slot<'_>) -> Result<()> {
    match src {
        Value::Bool(b) => from_bool(*b, slot),
        Value::Float(x) => from_float(*x, slot),
        Value::Int(i) => from_int(*i, slot),
        Value::Text(s) => from_text(s, "string", slot),
        Value::Bytes(b) => from_bytes(b, slot),
        Value::Timestamp(t) => from_timestamp(t, slot),
        Value::Null => Ok(()),
    }
}

fn unsupported(wire: &'static str, slot: &Slot<'_>) -> ScanError {
    ScanError::UnsupportedDestination {
        wire,
        destination: slot.kind(),
    }
}

fn from_bool(b: bool, slot: Slot<'_>) -> Result<()> {
    match slot {
        Slot::Text(d) => *d = b.to_string(),
        Slot::Bytes(d) => *d = b.to_string().into_bytes(),
        slot => return Err(unsupported("bool", &slot)),
    }
    Ok(())
}

fn from_float(x: f64, slot: Slot<'_>) -> Result<()> {
    match slot {
        slot if slot.is_float() => put_float(x, &x, slot),
        slot if slot.is_integer() => {
            if !x.is_finite() {
                return Err(ScanError::range(x, slot.kind()));
            }
            if x.fract() != 0.0 {
                return Err(ScanError::PrecisionLoss {
                    value: x.to_string(),
                    destination: slot.kind(),
                });
            }
            // saturates beyond i128, which every destination width rejects anyway
            put_integer(x as i128, &x, slot)
        }
        Slot::Text(d) => {
            *d = format_float(x);
            Ok(())
        }
        Slot::Bytes(d) => {
            *d = format_float(x).into_bytes();
            Ok(())
        }
        slot => Err(unsupported("f64", &slot)),
    }
}

fn from_int(i: i64, slot: Slot<'_>) -> Result<()> {
    match slot {
        slot if slot.is_integer() => put_integer(i as i128, &i, slot),
        Slot::Bool(d) => {
            *d = match i {
                0 => false,
                1 => true,
                _ => return Err(ScanError::range(i, "bool")),
            };
            Ok(())
        }
        Slot::F32(d) => {
            *d = i as f32;
            Ok(())
        }
        Slot::F64(d) => {
            *d = i as f64;
            Ok(())
        }
        Slot::Text(d) => {
            *d = i.to_string();
            Ok(())
        }
        Slot::Bytes(d) => {
            *d = i.to_string().into_bytes();
            Ok(())
        }
        slot => Err(unsupported("i64", &slot)),
    }
}

// Shared by text and byte sources; `wire` names the original source type.
fn from_text(s: &str, wire: &'static str, slot: Slot<'_>) -> Result<()> {
    match slot {
        Slot::Text(d) => *d = s.to_owned(),
        Slot::Bytes(d) => *d = s.as_bytes().to_vec(),
        Slot::Bool(d) => *d = parse_bool(s)?,
        // parsed at the destination width so the text is rounded only once
        Slot::F32(d) => *d = parse_float(s, "f32", f32::is_infinite)?,
        Slot::F64(d) => *d = parse_float(s, "f64", f64::is_infinite)?,
        slot if slot.is_integer() => {
            let n = parse_integer(s, slot.kind())?;
            return put_integer(n, &s, slot);
        }
        slot => return Err(unsupported(wire, &slot)),
    }
    Ok(())
}

fn from_bytes(b: &[u8], slot: Slot<'_>) -> Result<()> {
    match slot {
        Slot::Timestamp(_) | Slot::Unsupported(_) => Err(unsupported("bytes", &slot)),
        slot => {
            let s = std::str::from_utf8(b)
                .map_err(|_| ScanError::parse(String::from_utf8_lossy(b), slot.kind()))?;
            from_text(s, "bytes", slot)
        }
    }
}

fn from_timestamp(t: &DateTime<Utc>, slot: Slot<'_>) -> Result<()> {
    match slot {
        Slot::Text(d) => *d = rfc3339_nano(t),
        Slot::Bytes(d) => *d = rfc3339_nano(t).into_bytes(),
        slot => return Err(unsupported("timestamp", &slot)),
    }
    Ok(())
}

fn narrow<T: TryFrom<i128>>(n: i128, shown: &dyn fmt::Display, destination: &'static str) -> Result<T> {
    T::try_from(n).map_err(|_| ScanError::range(shown, destination))
}

fn put_integer(n: i128, shown: &dyn fmt::Display, slot: Slot<'_>) -> Result<()> {
    let kind = slot.kind();
    match slot {
        Slot::I8(d) => *d = narrow(n, shown, kind)?,
        Slot::I16(d) => *d = narrow(n, shown, kind)?,
        Slot::I32(d) => *d = narrow(n, shown, kind)?,
        Slot::I64(d) => *d = narrow(n, shown, kind)?,
        Slot::Isize(d) => *d = narrow(n, shown, kind)?,
        Slot::U8(d) => *d = narrow(n, shown, kind)?,
        Slot::U16(d) => *d = narrow(n, shown, kind)?,
        Slot::U32(d) => *d = narrow(n, shown, kind)?,
        Slot::U64(d) => *d = narrow(n, shown, kind)?,
        Slot::Usize(d) => *d = narrow(n, shown, kind)?,
        slot => return Err(ScanError::InvalidDestination(format!("{} is not an integer", slot.kind()))),
    }
    Ok(())
}

fn put_float(x: f64, shown: &dyn fmt::Display, slot: Slot<'_>) -> Result<()> {
    match slot {
        Slot::F32(d) => {
            if x.is_finite() && x.abs() > f32::MAX as f64 {
                return Err(ScanError::range(shown, "f32"));
            }
            *d = x as f32;
        }
        Slot::F64(d) => *d = x,
        slot => return Err(ScanError::InvalidDestination(format!("{} is not a float", slot.kind()))),
    }
    Ok(())
}

/// The literal forms accepted for booleans.
pub(crate) fn parse_bool(s: &str) -> Result<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ScanError::parse(s, "bool")),
    }
}

fn parse_integer(s: &str, destination: &'static str) -> Result<i128> {
    use std::num::IntErrorKind;
    s.parse::<i128>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ScanError::range(s, destination),
        _ => ScanError::parse(s, destination),
    })
}

fn parse_float<F: FromStr + Copy>(s: &str, destination: &'static str, is_infinite: fn(F) -> bool) -> Result<F> {
    let x = s.parse::<F>().map_err(|_| ScanError::parse(s, destination))?;
    // the std parser rounds overflowing literals to infinity
    if is_infinite(x) && !is_infinity_literal(s) {
        return Err(ScanError::range(s, destination));
    }
    Ok(x)
}

fn is_infinity_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Shortest decimal text that parses back to the same float.
///
/// Both the positional and the exponent rendering carry the shortest
/// round-trip digits; whichever is shorter wins, positional on a tie.
/// Non-finite values render as `inf`, `-inf` and `NaN`, which the text
/// rules accept again.
pub(crate) fn format_float(x: f64) -> String {
    let positional = x.to_string();
    let exponent = format!("{x:e}");
    if exponent.len() < positional.len() {
        exponent
    } else {
        positional
    }
}

/// RFC 3339 with the fractional seconds trimmed of trailing zeros.
pub(crate) fn rfc3339_nano(t: &DateTime<Utc>) -> String {
    let mut text = t.format("%Y-%m-%dT%H:%M:%S").to_string();
    let nanos = t.timestamp_subsec_nanos() % 1_000_000_000;
    if nanos > 0 {
        let fraction = format!("{:09}", nanos);
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text.push('Z');
    text
}
