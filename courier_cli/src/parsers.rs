use jiff::civil::{Date, Time};

pub fn parse_day(input: &str) -> Result<Date, String> {
    input
        .trim()
        .parse::<Date>()
        .map_err(|error| format!("Invalid day \"{input}\", expected YYYY-MM-DD: {error}"))
}

pub fn parse_time(input: &str) -> Result<Time, String> {
    input
        .trim()
        .parse::<Time>()
        .map_err(|error| format!("Invalid time \"{input}\", expected HH:MM:SS: {error}"))
}
