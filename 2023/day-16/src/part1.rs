use aoc2023_helper::beam::{trace, Optic};
use aoc2023_helper::{Direction, Grid, Point};
use miette::*;
use tracing::debug;

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let grid: Grid<Optic> = input.parse()?;
    let energized = trace(&grid, Point::ZERO, Direction::East);

    let picture = Grid::from_fn(grid.width(), grid.height(), |pos| {
        if energized.contains(pos) {
            '#'
        } else {
            '.'
        }
    });
    debug!("energized tiles:\n{picture}");

    Ok(energized.count().to_string())
}
