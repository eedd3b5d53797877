use crate::Interval;
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// A value produced by a parser.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Int64(i64),
    Int128(i128),
    Float64(f64),
    Decimal(Decimal),
    Varchar(String),
    Blob(Box<[u8]>),
    Date(Date),
    Time(Time),
    TimeWithTimezone(Time, UtcOffset),
    Timestamp(PrimitiveDateTime),
    TimestampWithTimezone(OffsetDateTime),
    Interval(Interval),
    /// Parsed array, possibly nested.
    List(Vec<Value>),
    /// Raw text of a value whose type is not known.
    Unknown(String),
}

impl Value {
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, used in conversion errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(..) => "Boolean",
            Value::Int64(..) => "Int64",
            Value::Int128(..) => "Int128",
            Value::Float64(..) => "Float64",
            Value::Decimal(..) => "Decimal",
            Value::Varchar(..) => "Varchar",
            Value::Blob(..) => "Blob",
            Value::Date(..) => "Date",
            Value::Time(..) => "Time",
            Value::TimeWithTimezone(..) => "TimeWithTimezone",
            Value::Timestamp(..) => "Timestamp",
            Value::TimestampWithTimezone(..) => "TimestampWithTimezone",
            Value::Interval(..) => "Interval",
            Value::List(..) => "List",
            Value::Unknown(..) => "Unknown",
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }
}

impl From<&'static str> for Value {
    fn from(value: &'static str) -> Self {
        Value::Varchar(value.into())
    }
}
