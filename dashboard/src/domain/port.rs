//! Port candidate generation and validation.

use serde_json::Value;

use crate::domain::error::PortError;

/// How many alternatives are offered when a port is taken.
pub const ALTERNATIVE_COUNT: u16 = 5;

/// Ports `start, start+1, …` for at most `max_attempts` candidates, never
/// past 65535.
pub fn candidates(start: u16, max_attempts: u16) -> impl Iterator<Item = u16> {
    (0..max_attempts).map_while(move |offset| start.checked_add(offset))
}

/// Ports `base+1 ..= base+count`, never past 65535.
pub fn alternatives(base: u16, count: u16) -> impl Iterator<Item = u16> {
    (1..=count).map_while(move |offset| base.checked_add(offset))
}

/// Validate a client-supplied port.
///
/// Accepts a JSON integer or a numeric string in `1..=65535`.
///
/// # Errors
///
/// Returns [`PortError::Invalid`] for anything else.
pub fn parse_port(value: &Value) -> Result<u16, PortError> {
    let number = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    number
        .and_then(|n| u16::try_from(n).ok())
        .filter(|port| *port != 0)
        .ok_or_else(|| PortError::Invalid(value.to_string()))
}
