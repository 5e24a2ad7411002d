use std::collections::HashMap;

use aoc2023_helper::cycle::History;
use miette::*;
use tracing::debug;

use crate::modules::{Network, PulseCount};

const PUSHES: usize = 1000;

/// Low times high pulses sent over a thousand button pushes. Pushes from a
/// state already seen send the same pulses, so each distinct state is pushed
/// only once.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = Network::parse(input)?;
    let history = History::record(network, Network::pushed, Network::state, PUSHES);
    debug!(states = history.len(), cycle = ?history.cycle(), "recorded pushes");

    let mut per_state: HashMap<usize, PulseCount> = HashMap::new();
    let mut total = PulseCount::default();
    for push in 0..PUSHES {
        let index = history.cycle().map_or(push, |cycle| cycle.normalize(push));
        let count = match per_state.get(&index) {
            Some(&count) => count,
            None => {
                let mut state = history
                    .state_at(index)
                    .ok_or_else(|| miette!("no state recorded for push {index}"))?
                    .clone();
                let count = state.push(|_| {});
                per_state.insert(index, count);
                count
            }
        };
        total += count;
    }

    Ok((total.low * total.high).to_string())
}
