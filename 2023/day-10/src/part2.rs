use std::collections::HashSet;

use aoc2023_helper::geometry::winding_number;
use miette::*;
use rayon::prelude::*;

use crate::maze::Maze;

/// Tiles enclosed by the loop: every tile off the loop around which the
/// loop winds at least once.
#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    let maze = Maze::parse(input)?;
    let tiles = maze.find_loop()?;
    let on_loop: HashSet<_> = tiles.iter().copied().collect();

    let enclosed = maze
        .grid()
        .positions()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter(|pos| !on_loop.contains(pos) && winding_number(*pos, &tiles) != 0)
        .count();

    Ok(enclosed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........",
        "4"
    )]
    #[case(
        "..........
.S------7.
.|F----7|.
.||....||.
.||....||.
.|L-7F-J|.
.|..||..|.
.L--JL--J.
..........",
        "4"
    )]
    #[case(
        ".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...",
        "8"
    )]
    #[case(
        "FF7FSF7F7F7F7F7F---7
L|LJ||||||||||||F--J
FL-7LJLJ||||||LJL-77
F--JF--7||LJLJ7F7FJ-
L---JF-JLJ.||-FJLJJ7
|F|F-JF---7F7-L7L|7|
|FFJF7L7F-JF7|JL---7
7-L-JL7||F7|L7F-7F7|
L.L7LFJ|||||FJL7||LJ
L7JLJL-JLJLJL--JLJ.L",
        "10"
    )]
    fn it_works(#[case] input: &str, #[case] expected: &str) -> Result<()> {
        assert_eq!(expected, process(input)?);
        Ok(())
    }
}
