pub mod modules;
pub mod part1;
pub mod part2;
