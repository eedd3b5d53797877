//! Server type identifiers and the descriptors registered by default.
use crate::{Parser, TypeDescriptor, TypeRegistry};
use std::sync::{Arc, LazyLock};

pub mod oid {
    use crate::Oid;

    pub const BOOL: Oid = 16;
    pub const BYTEA: Oid = 17;
    pub const CHAR: Oid = 18;
    pub const NAME: Oid = 19;
    pub const INT8: Oid = 20;
    pub const INT2: Oid = 21;
    pub const INT4: Oid = 23;
    pub const TEXT: Oid = 25;
    pub const OID: Oid = 26;
    pub const FLOAT4: Oid = 700;
    pub const FLOAT8: Oid = 701;
    pub const TINTERVAL: Oid = 704;
    pub const UNKNOWN: Oid = 705;
    pub const BOOL_ARRAY: Oid = 1000;
    pub const BYTEA_ARRAY: Oid = 1001;
    pub const CHAR_ARRAY: Oid = 1002;
    pub const NAME_ARRAY: Oid = 1003;
    pub const INT2_ARRAY: Oid = 1005;
    pub const INT2VECTOR_ARRAY: Oid = 1006;
    pub const INT4_ARRAY: Oid = 1007;
    pub const TEXT_ARRAY: Oid = 1009;
    pub const OID_ARRAY: Oid = 1028;
    pub const TID_ARRAY: Oid = 1013;
    pub const BPCHAR_ARRAY: Oid = 1014;
    pub const VARCHAR_ARRAY: Oid = 1015;
    pub const INT8_ARRAY: Oid = 1016;
    pub const POINT_ARRAY: Oid = 1017;
    pub const FLOAT4_ARRAY: Oid = 1021;
    pub const FLOAT8_ARRAY: Oid = 1022;
    pub const BPCHAR: Oid = 1042;
    pub const VARCHAR: Oid = 1043;
    pub const DATE: Oid = 1082;
    pub const TIME: Oid = 1083;
    pub const TIMESTAMP: Oid = 1114;
    pub const TIMESTAMP_ARRAY: Oid = 1115;
    pub const DATE_ARRAY: Oid = 1182;
    pub const TIME_ARRAY: Oid = 1183;
    pub const TIMESTAMPTZ: Oid = 1184;
    pub const TIMESTAMPTZ_ARRAY: Oid = 1185;
    pub const INTERVAL: Oid = 1186;
    pub const INTERVAL_ARRAY: Oid = 1187;
    pub const NUMERIC_ARRAY: Oid = 1231;
    pub const TIMETZ: Oid = 1266;
    pub const TIMETZ_ARRAY: Oid = 1270;
    pub const NUMERIC: Oid = 1700;
}

use oid::*;

macro_rules! builtin {
    ($(#[$meta:meta])* $name:ident, [$($oid:expr),+ $(,)?], $parser:expr) => {
        $(#[$meta])*
        pub static $name: LazyLock<Arc<TypeDescriptor>> = LazyLock::new(|| {
            Arc::new(TypeDescriptor::builtin(stringify!($name), &[$($oid),+], $parser))
        });
    };
}

macro_rules! builtin_array {
    ($name:ident, [$($oid:expr),+ $(,)?], $base:ident) => {
        builtin!($name, [$($oid),+], Parser::array_of($base.parser().clone()));
    };
}

builtin!(
    /// Type object of binary columns.
    BINARY, [BYTEA], Parser::Binary
);
builtin!(
    /// Type object of date and time columns.
    DATETIME, [TIMESTAMP, TIMESTAMPTZ, TINTERVAL, oid::INTERVAL], Parser::DateTime
);
builtin!(
    /// Type object of numeric columns.
    NUMBER, [INT8, 33, INT2, FLOAT8, FLOAT4, NUMERIC], Parser::Float
);
builtin!(
    /// Type object of row identifiers.
    ROWID, [OID], Parser::Integer
);
builtin!(
    /// Type object of string columns.
    STRING, [NAME, CHAR, TEXT, BPCHAR, VARCHAR], Parser::String
);
builtin!(BOOLEAN, [BOOL], Parser::Boolean);
builtin!(DATE, [oid::DATE], Parser::Date);
builtin!(DECIMAL, [NUMERIC], Parser::Decimal);
builtin!(FLOAT, [FLOAT8, FLOAT4], Parser::Float);
builtin!(INTEGER, [INT4, INT2], Parser::Integer);
builtin!(INTERVAL, [TINTERVAL, oid::INTERVAL], Parser::Interval);
builtin!(LONGINTEGER, [INT8], Parser::LongInteger);
builtin!(TIME, [oid::TIME, TIMETZ], Parser::Time);
builtin!(
    /// Fallback for identifiers no scope knows.
    UNKNOWN, [oid::UNKNOWN], Parser::Unknown
);
builtin!(
    /// Text decoded with the encoding of the context. Not registered by default.
    UNICODE, [NAME, CHAR, TEXT, BPCHAR, VARCHAR], Parser::Unicode
);

builtin_array!(BINARYARRAY, [BYTEA_ARRAY], BINARY);
builtin_array!(BOOLEANARRAY, [BOOL_ARRAY], BOOLEAN);
builtin_array!(DATEARRAY, [DATE_ARRAY], DATE);
builtin_array!(DATETIMEARRAY, [TIMESTAMP_ARRAY, TIMESTAMPTZ_ARRAY], DATETIME);
builtin_array!(DECIMALARRAY, [NUMERIC_ARRAY], DECIMAL);
builtin_array!(FLOATARRAY, [POINT_ARRAY, FLOAT4_ARRAY, FLOAT8_ARRAY], FLOAT);
builtin_array!(INTEGERARRAY, [INT2_ARRAY, INT2VECTOR_ARRAY, INT4_ARRAY], INTEGER);
builtin_array!(INTERVALARRAY, [INTERVAL_ARRAY], INTERVAL);
builtin_array!(LONGINTEGERARRAY, [INT8_ARRAY], LONGINTEGER);
builtin_array!(ROWIDARRAY, [TID_ARRAY, OID_ARRAY], ROWID);
builtin_array!(
    STRINGARRAY,
    [CHAR_ARRAY, NAME_ARRAY, TEXT_ARRAY, BPCHAR_ARRAY, VARCHAR_ARRAY],
    STRING
);
builtin_array!(TIMEARRAY, [TIME_ARRAY, TIMETZ_ARRAY], TIME);
builtin_array!(
    UNICODEARRAY,
    [CHAR_ARRAY, NAME_ARRAY, TEXT_ARRAY, BPCHAR_ARRAY, VARCHAR_ARRAY],
    UNICODE
);

static DEFAULT_REGISTRY: LazyLock<TypeRegistry> = LazyLock::new(|| {
    let mut registry = TypeRegistry::new();
    // Order matters, later descriptors take over the identifiers they share.
    for descriptor in [
        &BINARY,
        &DATETIME,
        &NUMBER,
        &ROWID,
        &STRING,
        &BOOLEAN,
        &DATE,
        &DECIMAL,
        &FLOAT,
        &INTEGER,
        &INTERVAL,
        &LONGINTEGER,
        &TIME,
        &UNKNOWN,
        &BINARYARRAY,
        &BOOLEANARRAY,
        &DATEARRAY,
        &DATETIMEARRAY,
        &DECIMALARRAY,
        &FLOATARRAY,
        &INTEGERARRAY,
        &INTERVALARRAY,
        &LONGINTEGERARRAY,
        &ROWIDARRAY,
        &STRINGARRAY,
        &TIMEARRAY,
    ] {
        registry.insert(Arc::clone(descriptor));
    }
    registry
});

/// The immutable table of default descriptors, built on first use.
pub fn default_registry() -> &'static TypeRegistry {
    &DEFAULT_REGISTRY
}
