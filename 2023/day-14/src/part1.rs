use aoc2023_helper::Direction;
use miette::*;

use crate::dish::Dish;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let mut dish = Dish::parse(input)?;
    dish.tilt(Direction::North);
    Ok(dish.north_load().to_string())
}
