use courier_network::{node::Node, routing::static_network::StaticNetwork};
use fxhash::FxHashMap;
use jiff::{SignedDuration, civil::Time};
use rand::{Rng, seq::IndexedRandom};
use tracing::debug;

use crate::{
    error::GeneratorError,
    generator::generator_params::GeneratorParams,
    json::types::{JsonInstance, JsonRequest, JsonVehicle},
};

/// Draws random instances over the cities of a [`StaticNetwork`].
///
/// Request time windows are sized with the nominal travel time between the two cities, so a
/// request always leaves enough room to be driven before its latest arrival.
pub struct InstanceGenerator<'a> {
    network: &'a StaticNetwork,
    params: &'a GeneratorParams,
    origins: Vec<Node>,
    destinations: FxHashMap<Node, Vec<(Node, SignedDuration)>>,
}

impl<'a> InstanceGenerator<'a> {
    pub fn new(
        network: &'a StaticNetwork,
        params: &'a GeneratorParams,
    ) -> Result<Self, GeneratorError> {
        params.validate()?;

        let origins: Vec<Node> = network
            .nodes()
            .iter()
            .filter(|node| !network.is_isolated(node))
            .cloned()
            .collect();

        if origins.len() < 2 {
            return Err(GeneratorError::NotEnoughCities);
        }

        Ok(InstanceGenerator {
            network,
            params,
            origins,
            destinations: FxHashMap::default(),
        })
    }

    pub fn generate<R: Rng>(
        &mut self,
        vehicles: usize,
        requests: usize,
        rng: &mut R,
    ) -> Result<JsonInstance, GeneratorError> {
        let vehicles = (0..vehicles)
            .map(|index| self.generate_vehicle(index, rng))
            .collect::<Result<Vec<_>, _>>()?;
        let requests = (0..requests)
            .map(|index| self.generate_request(index, rng))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JsonInstance { vehicles, requests })
    }

    fn generate_vehicle<R: Rng>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<JsonVehicle, GeneratorError> {
        let [min_capacity, max_capacity] = self.params.vehicles.capacity_range;
        let origin = self
            .network
            .nodes()
            .choose(rng)
            .ok_or(GeneratorError::NotEnoughCities)?;

        Ok(JsonVehicle {
            name: format!("V_{index}"),
            capacity: rng.random_range(min_capacity..=max_capacity),
            origin: origin.name().to_owned(),
        })
    }

    fn generate_request<R: Rng>(
        &mut self,
        index: usize,
        rng: &mut R,
    ) -> Result<JsonRequest, GeneratorError> {
        let params = &self.params.requests;
        let origin = self
            .origins
            .choose(rng)
            .ok_or(GeneratorError::NotEnoughCities)?;

        let network = self.network;
        let (destination, travel) = self
            .destinations
            .entry(origin.clone())
            .or_insert_with(|| reachable_destinations(network, origin))
            .choose(rng)
            .ok_or(GeneratorError::NotEnoughCities)?;

        let travel = travel.as_secs();
        let earliest = seconds_of_day(params.earliest_departure_time_range);
        let latest = seconds_of_day(params.latest_arrival_time);
        let max_pre_departure = latest.saturating_sub(travel).max(earliest);

        let mut pre_departure = rng.random_range(earliest..=max_pre_departure);
        pre_departure -= pre_departure % 60;

        let mut pre_arrival = pre_departure.saturating_add(travel);
        if pre_arrival > latest {
            pre_departure -= pre_arrival - latest;
            pre_arrival = latest;
        }

        let [min_party, max_party] = params.party_size_range;
        let max_transfer = params
            .max_transfers
            .choose(rng)
            .copied()
            .ok_or(GeneratorError::EmptyMaxTransfers)?;

        debug!(
            request = index,
            origin = %origin,
            destination = %destination,
            travel_minutes = travel / 60,
            "Generated request"
        );

        Ok(JsonRequest {
            name: format!("R_{index}"),
            earliest: params.earliest_departure_time_range,
            pre_departure: time_of_day(pre_departure),
            pre_arrival: time_of_day(pre_arrival),
            latest: params.latest_arrival_time,
            max_transfer,
            party_size: rng.random_range(min_party..=max_party),
            origin: origin.name().to_owned(),
            destination: destination.name().to_owned(),
        })
    }
}

fn reachable_destinations(network: &StaticNetwork, origin: &Node) -> Vec<(Node, SignedDuration)> {
    network
        .nodes()
        .iter()
        .filter(|&node| node != origin)
        .filter_map(|node| {
            network
                .travel_time(origin, node)
                .map(|travel| (node.clone(), travel))
        })
        .collect()
}

fn seconds_of_day(time: Time) -> i64 {
    Time::midnight().duration_until(time).as_secs()
}

fn time_of_day(seconds: i64) -> Time {
    Time::midnight()
        .checked_add(SignedDuration::from_secs(seconds.clamp(0, 86_399)))
        .unwrap_or(Time::MAX)
}
