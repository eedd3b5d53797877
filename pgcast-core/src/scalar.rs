use crate::{CastContext, Result, TypecastError, Value, util::parse_int};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Reads a raw value as UTF-8 text.
pub(crate) fn text(raw: &[u8]) -> Result<&str> {
    std::str::from_utf8(raw).map_err(|e| TypecastError::decoding("UTF8", e))
}

/// Value of a type the registry does not know. The server sends `{}` for untyped empty
/// arrays, that one becomes an empty list.
pub fn parse_unknown(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    if raw == b"{}" {
        return Ok(Value::List(Vec::new()));
    }
    Ok(Value::Unknown(text(raw)?.to_owned()))
}

pub fn parse_string(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    Ok(Value::Varchar(text(raw)?.to_owned()))
}

/// Text decoded with the encoding of the context.
pub fn parse_unicode(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    Ok(Value::Varchar(context.decode(raw)?.into_owned()))
}

pub fn parse_boolean(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    match raw.first() {
        Some(first) => Ok(Value::Boolean(*first == b't')),
        None => Err(TypecastError::conversion("bool", raw)),
    }
}

pub fn parse_integer(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    parse_int::<i64>(text(raw)?).map(Value::Int64)
}

pub fn parse_long_integer(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    parse_int::<i128>(text(raw)?).map(Value::Int128)
}

/// Accepts `NaN`, `Infinity` and `-Infinity` as sent by the server.
pub fn parse_float(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    fast_float::parse::<f64, _>(text(raw)?.trim_ascii())
        .map(Value::Float64)
        .map_err(|_| TypecastError::conversion("f64", raw))
}

pub fn parse_decimal(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    Decimal::from_str(text(raw)?.trim_ascii())
        .map(Value::Decimal)
        .map_err(|_| TypecastError::conversion("Decimal", raw))
}

/// Unescapes the server representation through the primitive of the context.
pub fn parse_binary(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    let bytes = (context.unescape)(raw)?;
    Ok(Value::Blob(bytes.into_boxed_slice()))
}
