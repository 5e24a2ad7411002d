use aoc2023_helper::pathfinding::{render_route, shortest_path, RunLimits};
use aoc2023_helper::{Grid, Point};
use miette::*;
use tracing::debug;

pub mod part1;
pub mod part2;

/// Heat lost on the cheapest crucible route from the top-left block to the
/// bottom-right one.
pub fn least_heat_loss(input: &str, limits: RunLimits) -> Result<u32> {
    let grid = Grid::parse(input, |c| c.to_digit(10))?;
    let factory = Point::new(grid.width() as i32 - 1, grid.height() as i32 - 1);

    let route = shortest_path(&grid, Point::ZERO, factory, limits)?;
    debug!("route:\n{}", render_route(&grid, &route));
    Ok(route.cost)
}

#[cfg(test)]
pub(crate) const EXAMPLE: &str = "2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533";
