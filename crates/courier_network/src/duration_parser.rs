use jiff::SignedDuration;

use crate::error::NetworkError;

const MINUTE_UNITS: [&str; 4] = ["minute", "minutes", "min", "mins"];

/// Parses arc durations such as `"12 minutes"` or `"3 mins"` into whole minutes.
pub fn parse_duration_minutes(input: &str) -> Result<SignedDuration, NetworkError> {
    let malformed = || NetworkError::MalformedDuration {
        value: input.to_owned(),
    };

    let mut parts = input.split_whitespace();
    let (Some(value), Some(unit), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    if !MINUTE_UNITS
        .iter()
        .any(|candidate| unit.eq_ignore_ascii_case(candidate))
    {
        return Err(malformed());
    }

    let minutes = value.parse::<i64>().map_err(|_| malformed())?;
    if minutes < 0 {
        return Err(malformed());
    }

    minutes
        .checked_mul(60)
        .map(SignedDuration::from_secs)
        .ok_or_else(malformed)
}
