use courier_network::{define_index_newtype, node::Node};
use jiff::civil::DateTime;
use serde::Serialize;

use crate::{error::InstanceError, problem::time_window::TimeWindow};

define_index_newtype!(RequestIdx, Request);

/// A party to carry from `origin` to `destination`, picked up within its time window.
#[derive(Serialize, Debug, Clone)]
pub struct Request {
    name: String,
    origin: Node,
    destination: Node,
    time_window: TimeWindow,
    pre_departure: DateTime,
    pre_arrival: DateTime,
    party_size: u32,
    max_transfer: u32,
}

impl Request {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn origin(&self) -> &Node {
        &self.origin
    }

    pub fn destination(&self) -> &Node {
        &self.destination
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn earliest(&self) -> DateTime {
        self.time_window.earliest()
    }

    pub fn latest(&self) -> DateTime {
        self.time_window.latest()
    }

    /// Requested departure, orders the requests during dispatch.
    pub fn pre_departure(&self) -> DateTime {
        self.pre_departure
    }

    /// Informational only.
    pub fn pre_arrival(&self) -> DateTime {
        self.pre_arrival
    }

    pub fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Not enforced by dispatch.
    pub fn max_transfer(&self) -> u32 {
        self.max_transfer
    }
}

#[derive(Default)]
pub struct RequestBuilder {
    name: Option<String>,
    origin: Option<Node>,
    destination: Option<Node>,
    earliest: Option<DateTime>,
    latest: Option<DateTime>,
    pre_departure: Option<DateTime>,
    pre_arrival: Option<DateTime>,
    party_size: Option<u32>,
    max_transfer: Option<u32>,
}

impl RequestBuilder {
    pub fn set_name(&mut self, name: String) -> &mut RequestBuilder {
        self.name = Some(name);
        self
    }

    pub fn set_origin(&mut self, origin: Node) -> &mut RequestBuilder {
        self.origin = Some(origin);
        self
    }

    pub fn set_destination(&mut self, destination: Node) -> &mut RequestBuilder {
        self.destination = Some(destination);
        self
    }

    pub fn set_time_window(&mut self, earliest: DateTime, latest: DateTime) -> &mut RequestBuilder {
        self.earliest = Some(earliest);
        self.latest = Some(latest);
        self
    }

    pub fn set_pre_departure(&mut self, pre_departure: DateTime) -> &mut RequestBuilder {
        self.pre_departure = Some(pre_departure);
        self
    }

    pub fn set_pre_arrival(&mut self, pre_arrival: DateTime) -> &mut RequestBuilder {
        self.pre_arrival = Some(pre_arrival);
        self
    }

    pub fn set_party_size(&mut self, party_size: u32) -> &mut RequestBuilder {
        self.party_size = Some(party_size);
        self
    }

    pub fn set_max_transfer(&mut self, max_transfer: u32) -> &mut RequestBuilder {
        self.max_transfer = Some(max_transfer);
        self
    }

    pub fn build(self) -> Result<Request, InstanceError> {
        let missing = |field| InstanceError::MissingField {
            entity: "Request",
            field,
        };

        let name = self.name.ok_or(missing("name"))?;
        let earliest = self.earliest.ok_or(missing("earliest"))?;
        let latest = self.latest.ok_or(missing("latest"))?;

        let time_window = TimeWindow::new(earliest, latest);
        if time_window.is_empty() {
            return Err(InstanceError::InvalidTimeWindow {
                request: name,
                earliest,
                latest,
            });
        }

        Ok(Request {
            origin: self.origin.ok_or(missing("origin"))?,
            destination: self.destination.ok_or(missing("destination"))?,
            pre_departure: self.pre_departure.unwrap_or(earliest),
            pre_arrival: self.pre_arrival.unwrap_or(latest),
            party_size: self.party_size.unwrap_or(1),
            max_transfer: self.max_transfer.unwrap_or(0),
            time_window,
            name,
        })
    }
}
