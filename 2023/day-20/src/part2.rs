use aoc2023_helper::math::lcm_all;
use miette::*;
use tracing::{debug, info};

use crate::modules::{Kind, Network};

/// Pushes searched before giving up on an input that never sends high.
const MAX_PUSHES: u64 = 1 << 20;

/// `rx` is fed by a single conjunction, which sends it a low pulse once all
/// of its inputs last sent high. Each input sends its high pulse on a fixed
/// period, so the answer is the least common multiple of the pushes at which
/// each does so first.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let mut network = Network::parse(input)?;
    let rx = network
        .index_of("rx")
        .ok_or_else(|| miette!("network has no rx module"))?;
    let feeder = match network.inputs(rx) {
        [feeder] => *feeder,
        inputs => bail!("rx must have exactly one input, found {}", inputs.len()),
    };
    if !matches!(network.kind(feeder), Kind::Conjunction { .. }) {
        bail!("rx is fed by {}, which is not a conjunction", network.name(feeder));
    }

    let inputs = network.inputs(feeder).to_vec();
    let mut first_high: Vec<Option<u64>> = vec![None; inputs.len()];
    for push in 1..=MAX_PUSHES {
        network.push(|pulse| {
            if pulse.to != feeder || !pulse.high {
                return;
            }
            if let Some(slot) = pulse
                .from
                .and_then(|from| inputs.iter().position(|&input| input == from))
            {
                first_high[slot].get_or_insert(push);
            }
        });
        if first_high.iter().all(Option::is_some) {
            break;
        }
    }

    let periods = first_high
        .iter()
        .zip(&inputs)
        .map(|(push, &input)| {
            let push = push.ok_or_else(|| {
                miette!("{} never sent a high pulse", network.name(input))
            })?;
            debug!(input = network.name(input), push, "first high pulse");
            Ok(push)
        })
        .collect::<Result<Vec<u64>>>()?;

    let pushes = lcm_all(periods).ok_or_else(|| miette!("rx feeder has no inputs"))?;
    info!(pushes, "rx receives a low pulse");
    Ok(pushes.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTERS: &str = "broadcaster -> a, c
%a -> b
%b -> ix
&ix -> hub
%c -> d
%d -> e
%e -> iy
&iy -> hub
&hub -> rx";

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("8", process(COUNTERS)?);
        Ok(())
    }

    #[test]
    fn matches_pushing_until_rx_goes_low() -> Result<()> {
        let mut network = Network::parse(COUNTERS)?;
        let rx = network.index_of("rx").ok_or_else(|| miette!("rx"))?;
        let mut pushes = 0;
        let mut low = false;
        while !low {
            pushes += 1;
            network.push(|pulse| low |= pulse.to == rx && !pulse.high);
        }
        assert_eq!(pushes.to_string(), process(COUNTERS)?);
        Ok(())
    }

    #[test]
    fn needs_a_conjunction_before_rx() {
        assert!(process("broadcaster -> a\n%a -> rx").is_err());
        assert!(process("broadcaster -> a\n%a -> output").is_err());
    }
}
