use crate::{
    CastContext, Result, Value, parse_array, parse_binary, parse_boolean, parse_date,
    parse_datetime, parse_decimal, parse_float, parse_integer, parse_interval,
    parse_long_integer, parse_string, parse_time, parse_unicode, parse_unknown, scalar::text,
};
use std::{fmt, sync::Arc};

/// Signature shared by the scalar parsers.
pub type ParseFn = fn(Option<&[u8]>, Option<usize>, &CastContext) -> Result<Value>;

/// User supplied conversion, it receives `None` for null values.
pub type Caster = Arc<dyn Fn(Option<&str>, &CastContext) -> Result<Value> + Send + Sync>;

/// Conversion routine bound to a type descriptor.
#[derive(Clone)]
pub enum Parser {
    Unknown,
    String,
    Unicode,
    Boolean,
    Integer,
    LongInteger,
    Float,
    Decimal,
    Binary,
    Date,
    Time,
    DateTime,
    Interval,
    /// Array literal whose elements are converted by the inner parser.
    Array(Box<Parser>),
    Custom(Caster),
}

impl Parser {
    pub fn array_of(element: Parser) -> Self {
        Parser::Array(Box::new(element))
    }

    pub fn custom(
        caster: impl Fn(Option<&str>, &CastContext) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Parser::Custom(Arc::new(caster))
    }

    /// The scalar routine of this parser, `None` for arrays and custom parsers.
    pub fn scalar(&self) -> Option<ParseFn> {
        Some(match self {
            Parser::Unknown => parse_unknown,
            Parser::String => parse_string,
            Parser::Unicode => parse_unicode,
            Parser::Boolean => parse_boolean,
            Parser::Integer => parse_integer,
            Parser::LongInteger => parse_long_integer,
            Parser::Float => parse_float,
            Parser::Decimal => parse_decimal,
            Parser::Binary => parse_binary,
            Parser::Date => parse_date,
            Parser::Time => parse_time,
            Parser::DateTime => parse_datetime,
            Parser::Interval => parse_interval,
            Parser::Array(..) | Parser::Custom(..) => return None,
        })
    }

    /// Converts a raw value, `None` stands for a null one.
    pub fn cast(
        &self,
        raw: Option<&[u8]>,
        length: Option<usize>,
        context: &CastContext,
    ) -> Result<Value> {
        match self {
            Parser::Array(element) => parse_array(element, raw, length, context),
            Parser::Custom(caster) => caster(raw.map(text).transpose()?, context),
            _ => match self.scalar() {
                Some(parse) => parse(raw, length, context),
                None => Ok(Value::Null),
            },
        }
    }
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parser::Unknown => f.write_str("Unknown"),
            Parser::String => f.write_str("String"),
            Parser::Unicode => f.write_str("Unicode"),
            Parser::Boolean => f.write_str("Boolean"),
            Parser::Integer => f.write_str("Integer"),
            Parser::LongInteger => f.write_str("LongInteger"),
            Parser::Float => f.write_str("Float"),
            Parser::Decimal => f.write_str("Decimal"),
            Parser::Binary => f.write_str("Binary"),
            Parser::Date => f.write_str("Date"),
            Parser::Time => f.write_str("Time"),
            Parser::DateTime => f.write_str("DateTime"),
            Parser::Interval => f.write_str("Interval"),
            Parser::Array(element) => f.debug_tuple("Array").field(element).finish(),
            Parser::Custom(..) => f.write_str("Custom(..)"),
        }
    }
}
