use aoc2023_helper::cycle::state_after;
use miette::*;

use crate::dish::Dish;

const SPINS: usize = 1_000_000_000;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let dish = Dish::parse(input)?;
    let spun = state_after(dish, Dish::spun, SPINS);
    Ok(spun.north_load().to_string())
}
