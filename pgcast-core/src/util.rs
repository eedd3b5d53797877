use crate::{Result, TypecastError};
use atoi::FromRadix10SignedChecked;
use std::{any, cmp::min};

macro_rules! truncate_long {
    ($value:expr) => {
        format_args!(
            "{}{}",
            &$value[..$crate::util::floor_char_boundary(&$value, 497)].trim_end(),
            if $value.len() > 497 { "..." } else { "" },
        )
    };
}

/// Largest char boundary not after `index`.
pub(crate) fn floor_char_boundary(value: &str, index: usize) -> usize {
    let mut index = min(index, value.len());
    while !value.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Bounded, lossy rendering of a raw value for error messages.
pub(crate) fn lossy_truncated(value: &[u8]) -> String {
    let value = String::from_utf8_lossy(value);
    format!("{}", truncate_long!(value))
}

/// Parses the whole string as a signed decimal integer, surrounding whitespace allowed.
pub(crate) fn parse_int<T: FromRadix10SignedChecked>(value: &str) -> Result<T> {
    let trimmed = value.trim_ascii();
    let (result, len) = T::from_radix_10_signed_checked(trimmed.as_bytes());
    match result {
        Some(v) if len == trimmed.len() && trimmed.bytes().any(|b| b.is_ascii_digit()) => Ok(v),
        _ => Err(TypecastError::conversion(any::type_name::<T>(), value)),
    }
}

/// Splits at the first occurrence of any of the separators, returning the separator too.
pub(crate) fn split_once_any<'a>(
    value: &'a str,
    separators: &[char],
) -> Option<(&'a str, char, &'a str)> {
    let index = value.find(separators)?;
    let separator = value[index..].chars().next()?;
    Some((
        &value[..index],
        separator,
        &value[index + separator.len_utf8()..],
    ))
}
