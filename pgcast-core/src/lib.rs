mod adapt;
mod array;
mod as_value;
pub mod builtins;
mod context;
mod descriptor;
mod error;
mod interval;
mod parser;
mod registry;
mod scalar;
mod temporal;
mod util;
mod value;

pub use ::anyhow::Context;
pub use adapt::*;
pub use array::*;
pub use as_value::*;
pub use builtins::{
    BINARY, BINARYARRAY, BOOLEAN, BOOLEANARRAY, DATE, DATEARRAY, DATETIME, DATETIMEARRAY,
    DECIMAL, DECIMALARRAY, FLOAT, FLOATARRAY, INTEGER, INTEGERARRAY, INTERVAL, INTERVALARRAY,
    LONGINTEGER, LONGINTEGERARRAY, NUMBER, ROWID, ROWIDARRAY, STRING, STRINGARRAY, TIME,
    TIMEARRAY, UNICODE, UNICODEARRAY, UNKNOWN, default_registry,
};
pub use context::*;
pub use descriptor::*;
pub use error::*;
pub use interval::*;
pub use parser::*;
pub use registry::*;
pub use scalar::*;
pub use temporal::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;

/// Server side type identifier.
pub type Oid = u32;
