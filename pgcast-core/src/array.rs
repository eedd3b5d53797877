use crate::{CastContext, Context, Parser, Result, TypecastError, Value, util::lossy_truncated};
use std::mem;

/// Deepest nesting accepted in an array literal.
pub const MAX_DIMENSIONS: usize = 16;

/// Parses a server array literal such as `{{1,2},{3,NULL}}`, converting every element
/// with `element`.
///
/// Elements are separated by commas, spaces between them are skipped. An element is
/// either bare text or double quoted text, a backslash makes the next character
/// literal. The unquoted token `NULL` (any case) is a null element and is converted by
/// passing no value to `element`. Sibling arrays may have different lengths and depths.
pub fn parse_array(
    element: &Parser,
    raw: Option<&[u8]>,
    _length: Option<usize>,
    context: &CastContext,
) -> Result<Value> {
    let Some(raw) = raw else {
        return Ok(Value::Null);
    };
    if raw.first() == Some(&b'}') {
        return Err(TypecastError::UnbalancedBraces(lossy_truncated(raw)).into());
    }
    if raw.len() < 2 || raw[0] != b'{' || raw[raw.len() - 1] != b'}' {
        return Err(TypecastError::MalformedArray(lossy_truncated(raw)).into());
    }
    ArrayParser {
        element,
        context,
        literal: raw,
        end: raw.len() - 1,
        pos: 1,
    }
    .parse()
}

struct ArrayParser<'a> {
    element: &'a Parser,
    context: &'a CastContext,
    literal: &'a [u8],
    /// Index of the outer closing brace.
    end: usize,
    pos: usize,
}

impl<'a> ArrayParser<'a> {
    fn parse(mut self) -> Result<Value> {
        let mut current = Vec::new();
        let mut parents: Vec<Vec<Value>> = Vec::new();
        while self.pos < self.end {
            match self.literal[self.pos] {
                b'{' => {
                    parents.push(mem::take(&mut current));
                    if parents.len() + 1 > MAX_DIMENSIONS {
                        return Err(TypecastError::ExcessiveDimensions.into());
                    }
                    self.pos += 1;
                }
                b'}' => {
                    let Some(parent) = parents.pop() else {
                        return Err(
                            TypecastError::UnbalancedBraces(lossy_truncated(self.literal)).into(),
                        );
                    };
                    let nested = mem::replace(&mut current, parent);
                    current.push(Value::List(nested));
                    self.pos += 1;
                }
                b',' | b' ' => self.pos += 1,
                _ => current.push(self.element()?),
            }
        }
        if !parents.is_empty() {
            return Err(TypecastError::MalformedArray(lossy_truncated(self.literal)).into());
        }
        Ok(Value::List(current))
    }

    /// Consumes one element, up to the first comma or closing brace outside quotes.
    fn element(&mut self) -> Result<Value> {
        let mut token = Vec::new();
        let mut quotes = 0;
        let mut escaped = false;
        while self.pos < self.end {
            let c = self.literal[self.pos];
            if escaped {
                escaped = false;
                token.push(c);
            } else if c == b'"' {
                quotes += 1;
            } else if c == b'\\' {
                escaped = true;
            } else if quotes % 2 == 0 && (c == b',' || c == b'}') {
                break;
            } else {
                token.push(c);
            }
            self.pos += 1;
        }
        let value = if quotes == 0 && token.eq_ignore_ascii_case(b"null") {
            self.element.cast(None, None, self.context)
        } else {
            self.element
                .cast(Some(&token), Some(token.len()), self.context)
        };
        value.with_context(|| {
            format!(
                "While parsing element `{}` of array `{}`",
                lossy_truncated(&token),
                lossy_truncated(self.literal),
            )
        })
    }
}
