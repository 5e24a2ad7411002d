use aoc2023_helper::math::lcm_all;
use itertools::Itertools;
use miette::*;
use tracing::debug;

use crate::network::Network;

/// Every ghost starts on an `..A` node and the answer is the first step at
/// which all of them stand on `..Z` nodes. Each ghost's walk loops back to
/// its first `..Z` node with the same period, so the answer is the least
/// common multiple of the first arrivals.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let network = Network::parse(input)?;

    let arrivals: Vec<u64> = network
        .nodes()
        .filter(|node| node.ends_with('A'))
        .sorted()
        .map(|start| {
            let steps = network.steps(start, |node| node.ends_with('Z'))?;
            debug!(start, steps, "ghost arrived");
            Ok(steps)
        })
        .collect::<Result<_>>()?;

    let steps = lcm_all(arrivals).ok_or_else(|| miette!("no starting nodes"))?;
    Ok(steps.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() -> Result<()> {
        let input = "LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)";
        assert_eq!("6", process(input)?);
        Ok(())
    }

    #[test]
    fn needs_a_starting_node() {
        assert!(process("L\n\nBBB = (BBB, BBB)").is_err());
    }
}
