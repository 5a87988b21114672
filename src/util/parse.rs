use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses the integer a message starts with.
///
/// Leading and trailing whitespace is ignored, as is anything after the digits, so
/// `"12 nice"` parses as `12`. Text that does not start with an ASCII digit, or whose
/// digits do not fit in a `u64`, has no leading number.
///
/// # Arguments
/// - `text` - Raw message content
///
/// # Returns
/// - `Some(u64)` - The leading integer
/// - `None` - The text does not start with a representable number
pub fn parse_leading_number(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    let digits_end = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(trimmed.len());

    if digits_end == 0 {
        return None;
    }

    trimmed[..digits_end].parse::<u64>().ok()
}

/// Truncates text to at most `max_chars` characters for use in notices.
pub fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
