use aoc2023_helper::reach::{Garden, Wrap};
use miette::*;

pub const STEPS: u64 = 64;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    process_steps(input, STEPS)
}

/// Garden plots the elf can end on after exactly `steps` steps, never
/// leaving the map.
pub fn process_steps(input: &str, steps: u64) -> Result<String> {
    let garden: Garden = input.parse()?;
    let reachable = garden.count_reachable(garden.start(), steps, Wrap::NONE);
    Ok(reachable.to_string())
}
