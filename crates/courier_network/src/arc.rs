use jiff::{
    SignedDuration,
    civil::{Date, DateTime, Time},
};
use serde::{Deserialize, Serialize};

use crate::{duration_parser::parse_duration_minutes, error::NetworkError, node::Node};

/// An arc as it appears in arc files. `Day` and `Time` are only optional for static networks.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct ArcRecord {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    pub duration: String,
}

impl ArcRecord {
    pub fn parse_duration(&self) -> Result<SignedDuration, NetworkError> {
        parse_duration_minutes(&self.duration)
    }

    fn parse_day(&self) -> Result<Date, NetworkError> {
        let value = self
            .day
            .as_deref()
            .ok_or_else(|| NetworkError::MissingDeparture {
                origin: self.from.clone(),
                destination: self.to.clone(),
                field: "Day",
            })?;

        value.trim().parse().map_err(|_| NetworkError::InvalidDay {
            origin: self.from.clone(),
            destination: self.to.clone(),
            value: value.to_owned(),
        })
    }

    fn parse_time(&self) -> Result<Time, NetworkError> {
        let value = self
            .time
            .as_deref()
            .ok_or_else(|| NetworkError::MissingDeparture {
                origin: self.from.clone(),
                destination: self.to.clone(),
                field: "Time",
            })?;

        value.trim().parse().map_err(|_| NetworkError::InvalidTime {
            origin: self.from.clone(),
            destination: self.to.clone(),
            value: value.to_owned(),
        })
    }
}

/// A directional travel-duration observation, valid for one departure day and time of day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelArc {
    origin: Node,
    destination: Node,
    day: Date,
    departure_time: Time,
    duration: SignedDuration,
}

impl TravelArc {
    pub fn new(
        origin: Node,
        destination: Node,
        departure: DateTime,
        duration: SignedDuration,
    ) -> Self {
        TravelArc {
            origin,
            destination,
            day: departure.date(),
            departure_time: departure.time(),
            duration,
        }
    }

    pub fn from_record(record: &ArcRecord) -> Result<Self, NetworkError> {
        let day = record.parse_day()?;
        let departure_time = record.parse_time()?;
        let duration = record.parse_duration()?;

        Ok(TravelArc {
            origin: Node::from(record.from.as_str()),
            destination: Node::from(record.to.as_str()),
            day,
            departure_time,
            duration,
        })
    }

    pub fn origin(&self) -> &Node {
        &self.origin
    }

    pub fn destination(&self) -> &Node {
        &self.destination
    }

    pub fn day(&self) -> Date {
        self.day
    }

    pub fn departure_time(&self) -> Time {
        self.departure_time
    }

    pub fn departure(&self) -> DateTime {
        self.day.to_datetime(self.departure_time)
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }
}
