use crate::{
    CastContext, Error, Interval, Result, TypecastError, Value,
    scalar::text,
    util::{parse_int, split_once_any},
};
use regex::Regex;
use std::sync::LazyLock;
use time::{Date, Month, PrimitiveDateTime, Time, UtcOffset, macros::date};

pub const MIN_DATE: Date = date!(0001-01-01);
pub const MAX_DATE: Date = date!(9999-12-31);
pub const MIN_DATETIME: PrimitiveDateTime = PrimitiveDateTime::new(MIN_DATE, Time::MIDNIGHT);
pub const MAX_DATETIME: PrimitiveDateTime = PrimitiveDateTime::new(
    MAX_DATE,
    match Time::from_hms_micro(23, 59, 59, 999_999) {
        Ok(v) => v,
        Err(..) => Time::MIDNIGHT,
    },
);

static INTERVAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)^
        (?:(-?\+?\d+)\sy\w+\s?)?     # years
        (?:(-?\+?\d+)\sm\w+\s?)?     # months
        (?:(-?\+?\d+)\sd\w+\s?)?     # days
        (?:(-?\+?)(\d+):(\d+):(\d+)  # signed hours:minutes:seconds
            (?:\.(\d+))?)?           # fraction of second
        ",
    )
    .expect("the interval pattern must compile")
});

fn wrap_error(error: Error, kind: &'static str, value: &str) -> Error {
    if value.ends_with("BC") {
        return TypecastError::UnsupportedEra(value.to_owned()).into();
    }
    error.context(TypecastError::Conversion {
        kind,
        value: value.to_owned(),
    })
}

fn date_from_parts(value: &str) -> Result<Date> {
    let mut parts = value.split('-');
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TypecastError::conversion("date", value));
    };
    let year = parse_int::<i32>(year)?;
    if !(1..=9999).contains(&year) {
        return Err(TypecastError::conversion("date", value));
    }
    let month = Month::try_from(parse_int::<u8>(month)?)?;
    Ok(Date::from_calendar_date(year, month, parse_int::<u8>(day)?)?)
}

/// Reads up to six digits of a fraction of second as microseconds, right padding with
/// zeros. Digits after the sixth are ignored.
fn fraction_to_micros(fraction: &str) -> Result<u32> {
    let mut micros = 0;
    let mut len = 0;
    for digit in fraction.bytes().take(6) {
        if !digit.is_ascii_digit() {
            return Err(TypecastError::conversion("fraction of second", fraction));
        }
        micros = micros * 10 + (digit - b'0') as u32;
        len += 1;
    }
    Ok(micros * 10_u32.pow(6 - len))
}

/// Offset in minutes of `HH[:MM[:SS]]`, seconds are rounded to the closest minute.
fn offset_minutes(sign: char, offset: &str) -> Result<i32> {
    let overflow = || TypecastError::conversion("time zone offset", offset);
    let mut parts = offset.split(':');
    let mut minutes = parse_int::<i32>(parts.next().unwrap_or_default())?
        .checked_mul(60)
        .ok_or_else(overflow)?;
    if let Some(m) = parts.next() {
        minutes = minutes
            .checked_add(parse_int::<i32>(m)?)
            .ok_or_else(overflow)?;
    }
    if let Some(s) = parts.next()
        && parse_int::<i32>(s)? >= 30
    {
        minutes = minutes.checked_add(1).ok_or_else(overflow)?;
    }
    if sign == '-' {
        minutes = minutes.checked_neg().ok_or_else(overflow)?;
    }
    Ok(minutes)
}

/// Splits `HH:MM:SS[.ffffff][(+|-)HH[:MM[:SS]]]` into a time and its optional offset.
fn time_from_parts(value: &str, context: &CastContext) -> Result<(Time, Option<UtcOffset>)> {
    let mut parts = value.splitn(3, ':');
    let (Some(hour), Some(minute), Some(rest)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(TypecastError::conversion("time", value));
    };
    let (second, offset) = match split_once_any(rest, &['-', '+']) {
        Some((second, sign, offset)) => (second, Some(offset_minutes(sign, offset)?)),
        None => (rest, None),
    };
    let offset = match (offset, &context.tz_factory) {
        (Some(minutes), Some(factory)) => Some(factory(minutes)?),
        (Some(minutes), None) => {
            log::debug!(
                "Discarding the offset of {minutes} minutes from `{value}`, no timezone factory is configured"
            );
            None
        }
        (None, _) => None,
    };
    let (second, micros) = match second.split_once('.') {
        Some((second, fraction)) => (second, fraction_to_micros(fraction)?),
        None => (second, 0),
    };
    let time = Time::from_hms_micro(
        parse_int(hour)?,
        parse_int(minute)?,
        parse_int(second)?,
        micros,
    )?;
    Ok((time, offset))
}

/// Parses `YYYY-MM-DD`, `infinity` and `-infinity` map to [`MAX_DATE`] and [`MIN_DATE`].
pub fn parse_date(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    let value = text(raw)?;
    match value {
        "infinity" => Ok(Value::Date(MAX_DATE)),
        "-infinity" => Ok(Value::Date(MIN_DATE)),
        _ => date_from_parts(value)
            .map(Value::Date)
            .map_err(|e| wrap_error(e, "date", value)),
    }
}

/// Parses a time, with a timezone when the value carries an offset and the context has
/// a timezone factory.
pub fn parse_time(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    let value = text(raw)?;
    match time_from_parts(value, context) {
        Ok((time, Some(offset))) => Ok(Value::TimeWithTimezone(time, offset)),
        Ok((time, None)) => Ok(Value::Time(time)),
        Err(e) => Err(e.context(TypecastError::Conversion {
            kind: "time",
            value: value.to_owned(),
        })),
    }
}

/// Parses a date and a time separated by one space.
pub fn parse_datetime(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    let value = text(raw)?;
    match value {
        "infinity" => return Ok(Value::Timestamp(MAX_DATETIME)),
        "-infinity" => return Ok(Value::Timestamp(MIN_DATETIME)),
        _ => {}
    }
    let parse = || -> Result<Value> {
        let mut parts = value.split(' ');
        let (Some(date), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TypecastError::conversion("datetime", value));
        };
        let date = date_from_parts(date)?;
        let (time, offset) = time_from_parts(time, context)?;
        let datetime = PrimitiveDateTime::new(date, time);
        Ok(match offset {
            Some(offset) => Value::TimestampWithTimezone(datetime.assume_offset(offset)),
            None => Value::Timestamp(datetime),
        })
    };
    parse().map_err(|e| wrap_error(e, "datetime", value))
}

/// Parses the server interval output, for example `2 years 1 mon 3 days -10:01:39.1`.
///
/// Months count as 30 days and years as 365 days, the result is not calendar accurate.
/// The sign of the time part applies to both its seconds and microseconds.
pub fn parse_interval(
    raw: Option<&[u8]>,
    _length: Option<usize>,
    _context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    let value = text(raw)?;
    let error = || TypecastError::conversion("interval", value);
    let captures = INTERVAL_PATTERN
        .captures(value)
        .filter(|c| c.iter().skip(1).any(|g| g.is_some()))
        .ok_or_else(error)?;
    let number = |i: usize| -> Result<i64> {
        captures
            .get(i)
            .map_or(Ok(0), |m| parse_int::<i64>(m.as_str()))
    };
    let (years, months, days) = (number(1)?, number(2)?, number(3)?);
    let days = years
        .checked_mul(Interval::DAYS_IN_YEAR)
        .and_then(|v| v.checked_add(months.checked_mul(Interval::DAYS_IN_MONTH)?))
        .and_then(|v| v.checked_add(days))
        .ok_or_else(error)?;
    let (mut seconds, mut micros) = (0, 0);
    if captures.get(5).is_some() {
        let (hours, minutes, secs) = (number(5)?, number(6)?, number(7)?);
        seconds = hours
            .checked_mul(3600)
            .and_then(|v| v.checked_add(minutes.checked_mul(60)?))
            .and_then(|v| v.checked_add(secs))
            .ok_or_else(error)?;
        micros = captures
            .get(8)
            .map_or(Ok(0), |m| fraction_to_micros(m.as_str()))? as i64;
        if captures.get(4).map(|m| m.as_str()) == Some("-") {
            seconds = -seconds;
            micros = -micros;
        }
    }
    Interval::checked_new(days, seconds, micros)
        .map(Value::Interval)
        .ok_or_else(error)
}
