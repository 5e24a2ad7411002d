pub mod maze;
pub mod part1;
pub mod part2;
