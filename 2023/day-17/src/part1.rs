use aoc2023_helper::pathfinding::RunLimits;
use miette::*;

use crate::least_heat_loss;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let limits = RunLimits::new(1, 3)?;
    Ok(least_heat_loss(input, limits)?.to_string())
}
