use crate::{Error, Interval, Result, Value};
use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use std::any;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};

/// Conversion between native Rust types and [`Value`].
///
/// `try_from_value` accepts the variant a parser produces for the type, plus the
/// variants that convert without loss (integer widening, a naive timestamp read as
/// UTC). Narrowing conversions are range checked.
///
/// ```rust
/// use pgcast_core::{AsValue, Value};
/// let n: i32 = AsValue::try_from_value(Value::Int64(42)).unwrap();
/// assert_eq!(n, 42);
/// assert!(i32::try_from_value(Value::Int64(i64::MAX)).is_err());
/// ```
pub trait AsValue {
    fn as_value(self) -> Value;
    fn try_from_value(value: Value) -> Result<Self>
    where
        Self: Sized;
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}

fn mismatch<T>(value: &Value) -> Error {
    Error::msg(format!(
        "Cannot convert Value::{} to {}",
        value.kind(),
        any::type_name::<T>()
    ))
}

fn out_of_range<T>(value: impl ToString) -> Error {
    Error::msg(format!(
        "Value {} is out of range for {}",
        value.to_string(),
        any::type_name::<T>()
    ))
}

macro_rules! impl_as_value {
    ($source:ty, $destination:path $(, $pat_rest:pat => $expr_rest:expr)* $(,)?) => {
        impl AsValue for $source {
            fn as_value(self) -> Value {
                $destination(self.into())
            }
            fn try_from_value(value: Value) -> Result<Self> {
                match value {
                    $destination(v) => Ok(v.into()),
                    $($pat_rest => $expr_rest,)*
                    #[allow(unreachable_patterns)]
                    _ => Err(mismatch::<Self>(&value)),
                }
            }
        }
    };
}
impl_as_value!(bool, Value::Boolean);
impl_as_value!(
    i64,
    Value::Int64,
    Value::Int128(v) => i64::try_from(v).map_err(|_| out_of_range::<Self>(v)),
);
impl_as_value!(
    i128,
    Value::Int128,
    Value::Int64(v) => Ok(v.into()),
);
impl_as_value!(
    f64,
    Value::Float64,
    Value::Int64(v) => Ok(v as _),
    Value::Decimal(v) => v.to_f64().ok_or_else(|| out_of_range::<Self>(v)),
);
impl_as_value!(
    Decimal,
    Value::Decimal,
    Value::Int64(v) => Ok(v.into()),
    Value::Int128(v) => Decimal::from_i128(v).ok_or_else(|| out_of_range::<Self>(v)),
);
impl_as_value!(
    String,
    Value::Varchar,
    Value::Unknown(v) => Ok(v),
);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(
    Time,
    Value::Time,
    Value::TimeWithTimezone(v, _) => Ok(v),
);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(
    OffsetDateTime,
    Value::TimestampWithTimezone,
    Value::Timestamp(v) => Ok(v.assume_utc()),
);
impl_as_value!(Interval, Value::Interval);
impl_as_value!(time::Duration, Value::Interval);

impl AsValue for i32 {
    fn as_value(self) -> Value {
        Value::Int64(self.into())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::Int64(v) => i32::try_from(v).map_err(|_| out_of_range::<Self>(v)),
            Value::Int128(v) => i32::try_from(v).map_err(|_| out_of_range::<Self>(v)),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

impl<T: AsValue> AsValue for Option<T> {
    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => Value::Null,
        }
    }
    fn try_from_value(value: Value) -> Result<Self> {
        Ok(if value.is_null() {
            None
        } else {
            Some(T::try_from_value(value)?)
        })
    }
}

impl<T: AsValue> AsValue for Vec<T> {
    fn as_value(self) -> Value {
        Value::List(self.into_iter().map(AsValue::as_value).collect())
    }
    fn try_from_value(value: Value) -> Result<Self> {
        match value {
            Value::List(v) => v.into_iter().map(T::try_from_value).collect(),
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}
