use crate::{Error, Result, TypecastError};
use std::{borrow::Cow, fmt, sync::Arc};
use time::UtcOffset;

/// Builds the timezone of a parsed time from its offset in minutes east of UTC.
pub type TzFactory = Arc<dyn Fn(i32) -> Result<UtcOffset> + Send + Sync>;

/// Converts the server escaped representation of a `bytea` into raw bytes.
pub type Unescape = Arc<dyn Fn(&[u8]) -> Result<Vec<u8>> + Send + Sync>;

/// Ambient information the parsers read while converting a value.
///
/// Owned by the connection (or cursor) that fetched the row. The registry never looks
/// inside it, it is only forwarded to the parsers.
#[derive(Clone)]
pub struct CastContext {
    pub encoding: Cow<'static, str>,
    pub tz_factory: Option<TzFactory>,
    pub unescape: Unescape,
}

impl CastContext {
    pub fn new() -> Self {
        Self {
            encoding: "UTF8".into(),
            tz_factory: None,
            unescape: Arc::new(unescape_bytea),
        }
    }

    pub fn with_encoding(mut self, encoding: impl Into<Cow<'static, str>>) -> Self {
        self.encoding = encoding.into();
        self
    }

    pub fn with_tz_factory(
        mut self,
        factory: impl Fn(i32) -> Result<UtcOffset> + Send + Sync + 'static,
    ) -> Self {
        self.tz_factory = Some(Arc::new(factory));
        self
    }

    pub fn with_unescape(
        mut self,
        unescape: impl Fn(&[u8]) -> Result<Vec<u8>> + Send + Sync + 'static,
    ) -> Self {
        self.unescape = Arc::new(unescape);
        self
    }

    /// Decodes `value` using the encoding of this context.
    pub fn decode<'a>(&self, value: &'a [u8]) -> Result<Cow<'a, str>> {
        decode_text(value, &self.encoding)
    }
}

impl Default for CastContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CastContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CastContext")
            .field("encoding", &self.encoding)
            .field("tz_factory", &self.tz_factory.as_ref().map(|_| ".."))
            .finish_non_exhaustive()
    }
}

/// Timezone factory producing a fixed offset from UTC.
pub fn fixed_offset(minutes: i32) -> Result<UtcOffset> {
    let error = |reason: &dyn std::fmt::Display| -> Error {
        TypecastError::Conversion {
            kind: "UtcOffset",
            value: format!("{minutes} minutes ({reason})"),
        }
        .into()
    };
    let seconds = minutes
        .checked_mul(60)
        .ok_or_else(|| error(&"out of range"))?;
    UtcOffset::from_whole_seconds(seconds).map_err(|e| error(&e))
}

/// Unescapes a `bytea` in either the hex (`\x0102`) or the escape (`\001\\`) format.
///
/// In the escape format a backslash that does not start a known sequence is dropped and
/// the following byte is kept as is.
pub fn unescape_bytea(value: &[u8]) -> Result<Vec<u8>> {
    if let Some(hex) = value.strip_prefix(b"\\x") {
        let hex: Vec<u8> = hex
            .iter()
            .copied()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        return hex::decode(hex).map_err(|e| {
            TypecastError::Conversion {
                kind: "bytea",
                value: format!("{} ({e})", String::from_utf8_lossy(value)),
            }
            .into()
        });
    }
    let is_octal = |b: Option<&u8>| matches!(b, Some(b'0'..=b'7'));
    let mut result = Vec::with_capacity(value.len());
    let mut i = 0;
    while i < value.len() {
        if value[i] != b'\\' {
            result.push(value[i]);
            i += 1;
        } else if value.get(i + 1) == Some(&b'\\') {
            result.push(b'\\');
            i += 2;
        } else if matches!(value.get(i + 1), Some(b'0'..=b'3'))
            && is_octal(value.get(i + 2))
            && is_octal(value.get(i + 3))
        {
            let byte = value[i + 1..i + 4]
                .iter()
                .fold(0u8, |acc, b| (acc << 3) | (b - b'0'));
            result.push(byte);
            i += 4;
        } else {
            i += 1;
        }
    }
    Ok(result)
}

/// Decodes text received in the given server encoding.
pub fn decode_text<'a>(value: &'a [u8], encoding: &str) -> Result<Cow<'a, str>> {
    let normalized: String = encoding
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect();
    match normalized.as_str() {
        "UTF8" | "UNICODE" => std::str::from_utf8(value)
            .map(Cow::Borrowed)
            .map_err(|e| TypecastError::decoding(encoding, e)),
        "SQLASCII" | "ASCII" => match value.iter().position(|b| !b.is_ascii()) {
            None => Ok(Cow::Borrowed(
                std::str::from_utf8(value).map_err(|e| TypecastError::decoding(encoding, e))?,
            )),
            Some(i) => Err(TypecastError::decoding(
                encoding,
                format!("byte 0x{:02x} at position {i} is not ascii", value[i]),
            )),
        },
        "LATIN1" | "ISO88591" => Ok(Cow::Owned(value.iter().map(|b| *b as char).collect())),
        _ => Err(TypecastError::decoding(encoding, "unsupported encoding")),
    }
}
