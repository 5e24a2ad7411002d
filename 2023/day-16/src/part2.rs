use aoc2023_helper::beam::{max_energized_from_edges, Optic};
use aoc2023_helper::Grid;
use miette::*;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid: Grid<Optic> = input.parse()?;
    Ok(max_energized_from_edges(&grid).to_string())
}
