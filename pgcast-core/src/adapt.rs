use crate::{Result, TypecastError};
use std::fmt::Write;
use time::{Date, Month, OffsetDateTime};

/// Date to be sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateAdapter(pub Date);

impl DateAdapter {
    /// Renders the value as a SQL literal, for example `'2020-01-31'::date`.
    pub fn to_sql_literal(&self) -> String {
        let mut out = String::with_capacity(18);
        let _ = write!(
            out,
            "'{:04}-{:02}-{:02}'::date",
            self.0.year(),
            self.0.month() as u8,
            self.0.day()
        );
        out
    }
}

/// Bytes to be sent to the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryAdapter(pub Box<[u8]>);

impl BinaryAdapter {
    /// Renders the value as a hex `bytea` literal, for example `'\x0aff'::bytea`.
    pub fn to_sql_literal(&self) -> String {
        let mut out = String::with_capacity(self.0.len() * 2 + 12);
        out.push_str("'\\x");
        out.push_str(&hex::encode(&self.0));
        out.push_str("'::bytea");
        out
    }
}

pub fn date(year: i32, month: u8, day: u8) -> Result<DateAdapter> {
    let invalid = || TypecastError::conversion("date", format!("{year}-{month}-{day}"));
    let month = Month::try_from(month).map_err(|_| invalid())?;
    Date::from_calendar_date(year, month, day)
        .map(DateAdapter)
        .map_err(|_| invalid())
}

/// Date of a Unix timestamp, in UTC.
pub fn date_from_ticks(ticks: i64) -> Result<DateAdapter> {
    OffsetDateTime::from_unix_timestamp(ticks)
        .map(|v| DateAdapter(v.date()))
        .map_err(|_| TypecastError::conversion("date", ticks.to_string()))
}

pub fn binary(bytes: impl Into<Box<[u8]>>) -> BinaryAdapter {
    BinaryAdapter(bytes.into())
}
